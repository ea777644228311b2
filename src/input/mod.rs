//! # Input Module
//!
//! Key mapping for player commands.

pub mod commands;

pub use commands::*;

use crate::game::Direction;

/// Maps single key presses to player commands.
///
/// Movement uses the vi layout: `hjkl` for the cardinal directions and
/// `yubn` for the diagonals.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use wukong::{Direction, InputHandler, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(input_handler.map_key('k'), Some(PlayerInput::Move(Direction::North)));
    /// assert_eq!(input_handler.map_key('x'), None);
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Returns the command bound to `key`, or `None` for unbound keys.
    pub fn map_key(&self, key: char) -> Option<PlayerInput> {
        let input = match key {
            'h' => PlayerInput::Move(Direction::West),
            'j' => PlayerInput::Move(Direction::South),
            'k' => PlayerInput::Move(Direction::North),
            'l' => PlayerInput::Move(Direction::East),
            'y' => PlayerInput::Move(Direction::Northwest),
            'u' => PlayerInput::Move(Direction::Northeast),
            'b' => PlayerInput::Move(Direction::Southwest),
            'n' => PlayerInput::Move(Direction::Southeast),
            ',' => PlayerInput::PickUp,
            '.' => PlayerInput::UseItem,
            'i' => PlayerInput::ShowInventory,
            'Q' => PlayerInput::Quit,
            _ => return None,
        };
        Some(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;

    #[test]
    fn test_movement_keys() {
        let handler = InputHandler::new();
        let expected = [
            ('h', (-1, 0)),
            ('j', (0, 1)),
            ('k', (0, -1)),
            ('l', (1, 0)),
            ('y', (-1, -1)),
            ('u', (1, -1)),
            ('b', (-1, 1)),
            ('n', (1, 1)),
        ];
        for (key, (dx, dy)) in expected {
            match handler.map_key(key) {
                Some(PlayerInput::Move(direction)) => {
                    assert_eq!(direction.to_delta(), Position::new(dx, dy), "key {key}")
                }
                other => panic!("key {key} mapped to {other:?}"),
            }
        }
    }

    #[test]
    fn test_command_keys() {
        let handler = InputHandler::new();
        assert_eq!(handler.map_key(','), Some(PlayerInput::PickUp));
        assert_eq!(handler.map_key('.'), Some(PlayerInput::UseItem));
        assert_eq!(handler.map_key('i'), Some(PlayerInput::ShowInventory));
        assert_eq!(handler.map_key('Q'), Some(PlayerInput::Quit));
        // Lowercase q is not quit
        assert_eq!(handler.map_key('q'), None);
    }
}
