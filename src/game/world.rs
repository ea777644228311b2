//! # World Representation
//!
//! The tile grid of a single level and the per-cell terrain state.

use crate::game::Position;
use serde::{Deserialize, Serialize};

/// One grid cell's terrain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Blocks movement
    pub blocked: bool,
    /// Blocks line of sight
    pub blocks_sight: bool,
    /// Has been seen by the player at least once
    pub explored: bool,
}

impl Tile {
    /// Solid rock: blocks movement and sight.
    pub fn wall() -> Self {
        Self {
            blocked: true,
            blocks_sight: true,
            explored: false,
        }
    }

    /// Open floor.
    pub fn floor() -> Self {
        Self {
            blocked: false,
            blocks_sight: false,
            explored: false,
        }
    }

    /// Whether light stops at this tile.
    pub fn is_opaque(&self) -> bool {
        self.blocked || self.blocks_sight
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::wall()
    }
}

/// Width x height grid of tiles, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Creates a grid where every cell is a wall.
    ///
    /// # Examples
    ///
    /// ```
    /// use wukong::{Position, TileGrid};
    ///
    /// let grid = TileGrid::new(80, 22);
    /// assert!(grid.is_blocked(Position::new(3, 3)));
    /// ```
    pub fn new(width: i32, height: i32) -> Self {
        let cells = width.max(0) as usize * height.max(0) as usize;
        Self {
            width,
            height,
            tiles: vec![Tile::wall(); cells],
        }
    }

    /// Checks if a position is within the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some((pos.y * self.width + pos.x) as usize)
        } else {
            None
        }
    }

    pub fn get(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.index(pos).map(move |i| &mut self.tiles[i])
    }

    /// Out-of-bounds cells count as blocked.
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.get(pos).map(|tile| tile.blocked).unwrap_or(true)
    }

    /// Out-of-bounds cells count as opaque.
    pub fn is_opaque(&self, pos: Position) -> bool {
        self.get(pos).map(Tile::is_opaque).unwrap_or(true)
    }

    pub fn is_explored(&self, pos: Position) -> bool {
        self.get(pos).map(|tile| tile.explored).unwrap_or(false)
    }

    /// Opens a cell for movement and sight. Ignores out-of-bounds positions.
    pub fn carve(&mut self, pos: Position) {
        if let Some(tile) = self.get_mut(pos) {
            tile.blocked = false;
            tile.blocks_sight = false;
        }
    }

    /// Marks a cell as explored. Never clears the flag.
    pub fn mark_explored(&mut self, pos: Position) {
        if let Some(tile) = self.get_mut(pos) {
            tile.explored = true;
        }
    }

    /// Iterates over every position of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// Number of cells open for movement.
    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|tile| !tile.blocked).count()
    }
}
