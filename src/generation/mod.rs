//! # Generation Module
//!
//! Procedural level generation: room layout, corridors and room population.
//!
//! A level is produced by [`DungeonGenerator`], which carves rooms and
//! corridors and hands every accepted room to the [`RoomPopulator`]s that fill
//! it with enemies and spells.

pub mod dungeon;
pub mod encounters;
pub mod items;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::config;
use crate::game::{Entity, Position, TileGrid};
use crate::{WukongError, WukongResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for procedural generation and level setup.
///
/// Every field has a default taken from [`crate::config`], so a JSON file only
/// needs to list the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Map width in tiles
    pub map_width: i32,
    /// Map height in tiles
    pub map_height: i32,
    /// Minimum room side, walls included
    pub min_room_size: i32,
    /// Maximum room side, walls included
    pub max_room_size: i32,
    /// Room placement attempts (not a guaranteed room count)
    pub max_rooms: u32,
    /// Upper bound of the enemy roll per accepted room
    pub max_room_monsters: u32,
    /// Upper bound of the item roll per accepted room
    pub max_room_items: u32,
    /// Field of view radius of the player
    pub fov_radius: i32,
    /// QI attack spells in the starting inventory
    pub starting_qi_attacks: usize,
}

impl GenerationConfig {
    /// Creates the standard configuration for the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use wukong::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.map_width, 80);
    /// assert_eq!(config.map_height, 22);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            map_width: config::MAP_WIDTH,
            map_height: config::MAP_HEIGHT,
            min_room_size: config::ROOM_MIN_SIZE,
            max_room_size: config::ROOM_MAX_SIZE,
            max_rooms: config::MAX_ROOMS,
            max_room_monsters: config::MAX_ROOM_MONSTERS,
            max_room_items: config::MAX_ROOM_ITEMS,
            fov_radius: config::FOV_RADIUS,
            starting_qi_attacks: config::STARTING_QI_ATTACKS,
        }
    }

    /// Creates a configuration for testing: an empty level with a single room.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            max_rooms: 1,
            max_room_monsters: 0,
            max_room_items: 0,
            starting_qi_attacks: 0,
            ..Self::new(seed)
        }
    }

    /// Loads overrides from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> WukongResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the generator cannot work with.
    pub fn validate(&self) -> WukongResult<()> {
        let sides = 1..=config::MAX_MAP_SIDE;
        if !sides.contains(&self.map_width) || !sides.contains(&self.map_height) {
            return Err(WukongError::Configuration(format!(
                "map size {}x{} outside 1..={} per side",
                self.map_width,
                self.map_height,
                config::MAX_MAP_SIDE
            )));
        }
        if self.min_room_size < 3 {
            return Err(WukongError::Configuration(format!(
                "min_room_size must be at least 3, got {}",
                self.min_room_size
            )));
        }
        if self.min_room_size > self.max_room_size {
            return Err(WukongError::Configuration(format!(
                "min_room_size {} exceeds max_room_size {}",
                self.min_room_size, self.max_room_size
            )));
        }
        if self.max_room_size >= self.map_width || self.max_room_size >= self.map_height {
            return Err(WukongError::Configuration(format!(
                "rooms of side {} do not fit a {}x{} map",
                self.max_room_size, self.map_width, self.map_height
            )));
        }
        if self.max_rooms == 0 {
            return Err(WukongError::Configuration(
                "max_rooms must be at least 1".to_string(),
            ));
        }
        if self.fov_radius < 0 {
            return Err(WukongError::Configuration(format!(
                "fov_radius must not be negative, got {}",
                self.fov_radius
            )));
        }
        if self.starting_qi_attacks > config::INVENTORY_CAPACITY {
            return Err(WukongError::Configuration(format!(
                "starting inventory of {} exceeds capacity {}",
                self.starting_qi_attacks,
                config::INVENTORY_CAPACITY
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Creates a seeded random number generator from the config.
pub fn create_rng(config: &GenerationConfig) -> StdRng {
    StdRng::seed_from_u64(config.seed)
}

/// Axis-aligned room rectangle.
///
/// `x1,y1` is the top-left wall corner and `x2,y2` the bottom-right one; the
/// walkable interior lies strictly between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Creates a rectangle from its origin and size.
    ///
    /// # Examples
    ///
    /// ```
    /// use wukong::{Position, Rect};
    ///
    /// let room = Rect::new(2, 3, 6, 6);
    /// assert_eq!(room.center(), Position::new(5, 6));
    /// assert!(room.interior_contains(Position::new(3, 4)));
    /// assert!(!room.interior_contains(Position::new(2, 4)));
    /// ```
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "empty rect {width}x{height}");
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Overlap test that also counts shared or touching borders.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    pub fn interior_contains(&self, pos: Position) -> bool {
        pos.x > self.x1 && pos.x < self.x2 && pos.y > self.y1 && pos.y < self.y2
    }

    /// All interior positions, row by row.
    pub fn interior(&self) -> impl Iterator<Item = Position> {
        let (x1, x2) = (self.x1, self.x2);
        ((self.y1 + 1)..self.y2).flat_map(move |y| ((x1 + 1)..x2).map(move |x| Position::new(x, y)))
    }
}

/// Fills an accepted room with content.
pub trait RoomPopulator {
    /// Spawns entities into `room`, appending them to `spawn.entities`.
    fn populate(&self, room: &Rect, spawn: &mut SpawnContext<'_>, rng: &mut StdRng);

    /// Gets the populator name for logging.
    fn populator_type(&self) -> &'static str;
}

/// What a populator needs to know about the level under construction.
pub struct SpawnContext<'a> {
    pub grid: &'a TileGrid,
    pub entities: &'a mut Vec<Entity>,
    /// Cell reserved for the player
    pub player_start: Position,
    pub config: &'a GenerationConfig,
}

impl SpawnContext<'_> {
    /// A blocking entity may not stand here.
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.grid.is_blocked(pos)
            || pos == self.player_start
            || self.entities.iter().any(|e| e.blocks && e.position == pos)
    }

    /// Nothing at all may be placed here.
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.grid.is_blocked(pos)
            || pos == self.player_start
            || self.entities.iter().any(|e| e.position == pos)
    }
}

/// Uniform random cell of a room's interior.
pub(crate) fn random_interior_cell(room: &Rect, rng: &mut StdRng) -> Position {
    use rand::Rng;
    Position::new(
        rng.gen_range((room.x1 + 1)..=(room.x2 - 1)),
        rng.gen_range((room.y1 + 1)..=(room.y2 - 1)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_defaults() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.min_room_size, 6);
        assert_eq!(config.max_room_size, 12);
        assert_eq!(config.max_rooms, 30);
        assert_eq!(config.max_room_monsters, 5);
        assert_eq!(config.max_room_items, 2);
        assert_eq!(config.fov_radius, 10);
    }

    #[test]
    fn test_config_validation() {
        let mut config = GenerationConfig::new(1);
        config.min_room_size = 13;
        assert!(matches!(
            config.validate(),
            Err(WukongError::Configuration(_))
        ));

        let mut config = GenerationConfig::new(1);
        config.max_room_size = 22;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::new(1);
        config.max_rooms = 0;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::new(1);
        config.starting_qi_attacks = 27;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{ "seed": 9, "max_rooms": 4 }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.max_rooms, 4);
        assert_eq!(config.map_width, 80);
    }

    #[test]
    fn test_rect_geometry() {
        let room = Rect::new(5, 5, 10, 8);
        assert_eq!(room.x2, 15);
        assert_eq!(room.y2, 13);
        assert_eq!(room.center(), Position::new(10, 9));
        assert_eq!(room.interior().count(), 9 * 7);
        assert!(room.interior().all(|p| room.interior_contains(p)));
    }

    #[test]
    fn test_rect_intersection_is_inclusive() {
        let a = Rect::new(0, 0, 6, 6);
        let touching = Rect::new(6, 0, 6, 6);
        let apart = Rect::new(7, 0, 6, 6);
        let below = Rect::new(2, 7, 6, 6);

        assert!(a.intersects(&touching));
        assert!(touching.intersects(&a));
        assert!(!a.intersects(&apart));
        assert!(!a.intersects(&below));
        assert!(a.intersects(&a));
    }
}
