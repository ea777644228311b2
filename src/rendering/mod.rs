//! # Rendering Module
//!
//! The [`Display`] capability the turn engine paints through and the render
//! pass that turns a [`GameState`] into screen cells.
//!
//! Two displays ship with the crate: [`TerminalDisplay`] drives a real
//! terminal through crossterm, [`HeadlessDisplay`] keeps the screen in memory
//! and replays scripted keys for tests.

pub mod display;
pub mod headless;
pub mod ui;

pub use display::*;
pub use headless::*;
pub use ui::*;

use crate::config;
use crate::game::{GameState, Position};
use crate::WukongResult;

/// Character-grid output plus single-key input.
pub trait Display {
    /// Puts one character at a map position.
    fn draw_glyph(&mut self, pos: Position, glyph: char) -> WukongResult<()>;

    /// Blanks a map position.
    fn clear_glyph(&mut self, pos: Position) -> WukongResult<()> {
        self.draw_glyph(pos, ' ')
    }

    /// Replaces the content of a whole screen row.
    fn write_line(&mut self, row: u16, text: &str) -> WukongResult<()>;

    fn move_cursor(&mut self, pos: Position) -> WukongResult<()>;

    /// Returns a pending key press without blocking for long.
    fn poll_key(&mut self) -> WukongResult<Option<char>>;

    /// Blocks until a key is pressed.
    fn read_key(&mut self) -> WukongResult<char> {
        loop {
            if let Some(key) = self.poll_key()? {
                return Ok(key);
            }
        }
    }

    fn flush(&mut self) -> WukongResult<()>;
}

/// Map glyph of a tile given what the player knows about it.
///
/// Lit cells show walls and floor; remembered cells only show walls.
pub fn tile_glyph(state: &GameState, pos: Position) -> char {
    let wall = state.grid.is_opaque(pos);
    if state.fov.is_visible(pos) {
        if wall {
            '#'
        } else {
            '.'
        }
    } else if state.grid.is_explored(pos) && wall {
        '#'
    } else {
        ' '
    }
}

/// Draws the whole screen: map, visible entities, player and status line.
///
/// Recomputes the field of view first if a move invalidated it.
pub fn render_all<D: Display + ?Sized>(
    state: &mut GameState,
    display: &mut D,
    enemy_count: usize,
) -> WukongResult<()> {
    state.refresh_visibility();

    for pos in state.grid.positions() {
        display.draw_glyph(pos, tile_glyph(state, pos))?;
    }

    for entity in state.entities.iter().skip(1) {
        if state.fov.is_visible(entity.position) {
            display.draw_glyph(entity.position, entity.glyph)?;
        }
    }
    let player = state.player();
    display.draw_glyph(player.position, player.glyph)?;

    if let Some(fighter) = state.player_fighter() {
        let status = status_line(&player.name, fighter, enemy_count);
        display.write_line(config::STATUS_ROW, &status)?;
    }
    display.move_cursor(player.position)?;
    display.flush()
}

/// Blanks every entity's cell before enemies move.
pub fn clear_entities<D: Display + ?Sized>(state: &GameState, display: &mut D) -> WukongResult<()> {
    for entity in &state.entities {
        display.clear_glyph(entity.position)?;
    }
    Ok(())
}
