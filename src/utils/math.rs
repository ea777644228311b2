//! # Grid Mathematics
//!
//! Integer line rasterization used by the field of view.

use crate::game::Position;

/// Rasterizes the segment `from -> to` with an integer Bresenham walk.
///
/// The result starts at `from`, ends at `to` and every consecutive pair of
/// cells are neighbours (orthogonal or diagonal).
///
/// # Examples
///
/// ```
/// use wukong::{line, Position};
///
/// let cells = line(Position::new(0, 0), Position::new(3, 1));
/// assert_eq!(cells.first(), Some(&Position::new(0, 0)));
/// assert_eq!(cells.last(), Some(&Position::new(3, 1)));
/// assert_eq!(cells.len(), 4);
/// ```
pub fn line(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut cells = Vec::with_capacity(dx.max(dy) as usize + 1);
    let (mut x, mut y) = (from.x, from.y);

    if dx > dy {
        let mut err = dx / 2;
        while x != to.x {
            cells.push(Position::new(x, y));
            x += sx;
            err -= dy;
            if err < 0 {
                y += sy;
                err += dx;
            }
        }
    } else {
        let mut err = dy / 2;
        while y != to.y {
            cells.push(Position::new(x, y));
            y += sy;
            err -= dx;
            if err < 0 {
                x += sx;
                err += dy;
            }
        }
    }

    cells.push(to);
    cells
}
