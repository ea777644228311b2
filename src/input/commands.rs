//! # Command Definitions
//!
//! Commands the player can issue from the keyboard.

use crate::game::Direction;

/// Player input types that can be processed by the turn engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Step or attack in a direction
    Move(Direction),
    /// Pick up the first item under the player
    PickUp,
    /// Use an inventory item; prompts for the slot
    UseItem,
    /// List the inventory on the message line
    ShowInventory,
    /// Quit the game
    Quit,
}
