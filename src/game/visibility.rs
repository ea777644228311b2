//! # Field of View
//!
//! Ray casting from the observer to every cell of the square around it. Each
//! ray stops at the first opaque cell, which is itself visible so walls next
//! to lit floor get drawn.

use crate::game::{Position, TileGrid};
use crate::utils::line;
use std::collections::HashSet;

/// Computes the cells visible from `origin` within the square of `radius`.
///
/// Pure: the grid is only read. Use [`FieldOfView::refresh`] to also record
/// exploration.
pub fn compute_visible(origin: Position, radius: i32, grid: &TileGrid) -> HashSet<Position> {
    let mut visible = HashSet::new();

    for dx in -radius..=radius {
        for dy in -radius..=radius {
            let target = Position::new(origin.x + dx, origin.y + dy);
            if !grid.in_bounds(target) {
                continue;
            }
            for cell in line(origin, target) {
                visible.insert(cell);
                if grid.is_opaque(cell) {
                    break;
                }
            }
        }
    }

    visible
}

/// The memoised visible set of the player.
///
/// Recomputed only after [`FieldOfView::invalidate`]; readers in between see
/// the cached set.
#[derive(Debug, Clone)]
pub struct FieldOfView {
    pub radius: i32,
    visible: HashSet<Position>,
    dirty: bool,
}

impl FieldOfView {
    /// Starts dirty so the first render computes the set.
    pub fn new(radius: i32) -> Self {
        Self {
            radius,
            visible: HashSet::new(),
            dirty: true,
        }
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Recomputes the set if it was invalidated and marks every visible cell
    /// explored. Returns whether a recomputation happened.
    pub fn refresh(&mut self, origin: Position, grid: &mut TileGrid) -> bool {
        if !self.dirty {
            return false;
        }
        self.visible = compute_visible(origin, self.radius, grid);
        for &pos in &self.visible {
            grid.mark_explored(pos);
        }
        self.dirty = false;
        log::trace!("field of view recomputed: {} cells", self.visible.len());
        true
    }

    pub fn is_visible(&self, pos: Position) -> bool {
        self.visible.contains(&pos)
    }
}
