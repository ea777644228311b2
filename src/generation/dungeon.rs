//! # Dungeon Generation
//!
//! Room-and-corridor layout generation.
//!
//! The generator tries a fixed number of random rooms. A candidate touching any
//! accepted room is dropped without retry, so a level may end up with fewer
//! rooms than attempts. Each accepted room is carved, joined to the previous
//! one with an L-shaped corridor and populated before the next attempt.

use crate::game::{Entity, Position, TileGrid};
use crate::generation::{
    EncounterGenerator, GenerationConfig, ItemGenerator, Rect, RoomPopulator, SpawnContext,
};
use crate::{WukongError, WukongResult};
use rand::{rngs::StdRng, Rng};

/// Everything the generator produces for one level.
#[derive(Debug, Clone)]
pub struct GeneratedLevel {
    pub grid: TileGrid,
    /// Accepted rooms in acceptance order
    pub rooms: Vec<Rect>,
    /// Enemies and items, items first so they draw beneath enemies
    pub entities: Vec<Entity>,
    /// Center of the first accepted room
    pub player_start: Position,
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> WukongResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> WukongResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Primary dungeon generator using the room-and-corridor algorithm.
pub struct DungeonGenerator {
    populators: Vec<Box<dyn RoomPopulator>>,
}

impl DungeonGenerator {
    /// Creates a generator that spawns enemies, then items, in every room.
    ///
    /// # Examples
    ///
    /// ```
    /// use wukong::{create_rng, DungeonGenerator, GenerationConfig, Generator};
    ///
    /// let config = GenerationConfig::new(3);
    /// let mut rng = create_rng(&config);
    /// let level = DungeonGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert!(!level.rooms.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            populators: vec![Box::new(EncounterGenerator), Box::new(ItemGenerator)],
        }
    }

    /// Creates a generator that only carves rooms and corridors.
    pub fn layout_only() -> Self {
        Self {
            populators: Vec::new(),
        }
    }

    /// Rolls a candidate room that fits inside the map.
    fn room_candidate(&self, config: &GenerationConfig, rng: &mut StdRng) -> Rect {
        let width = rng.gen_range(config.min_room_size..=config.max_room_size);
        let height = rng.gen_range(config.min_room_size..=config.max_room_size);
        let x = rng.gen_range(0..=(config.map_width - width - 1));
        let y = rng.gen_range(0..=(config.map_height - height - 1));
        Rect::new(x, y, width, height)
    }

    /// Carves a corridor between two room centers, bending at a random corner.
    fn connect(&self, grid: &mut TileGrid, from: Position, to: Position, rng: &mut StdRng) {
        if rng.gen_bool(0.5) {
            carve_h_tunnel(grid, from.x, to.x, from.y);
            carve_v_tunnel(grid, from.y, to.y, to.x);
        } else {
            carve_v_tunnel(grid, from.y, to.y, from.x);
            carve_h_tunnel(grid, from.x, to.x, to.y);
        }
    }
}

impl Default for DungeonGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Opens the interior of a room, leaving its border ring solid.
pub fn carve_room(grid: &mut TileGrid, room: &Rect) {
    for pos in room.interior() {
        grid.carve(pos);
    }
}

/// Opens every cell of the horizontal run `x1..=x2` on row `y`.
pub fn carve_h_tunnel(grid: &mut TileGrid, x1: i32, x2: i32, y: i32) {
    for x in x1.min(x2)..=x1.max(x2) {
        grid.carve(Position::new(x, y));
    }
}

/// Opens every cell of the vertical run `y1..=y2` on column `x`.
pub fn carve_v_tunnel(grid: &mut TileGrid, y1: i32, y2: i32, x: i32) {
    for y in y1.min(y2)..=y1.max(y2) {
        grid.carve(Position::new(x, y));
    }
}

impl Generator<GeneratedLevel> for DungeonGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> WukongResult<GeneratedLevel> {
        config.validate()?;

        let mut grid = TileGrid::new(config.map_width, config.map_height);
        let mut rooms: Vec<Rect> = Vec::new();
        let mut entities = Vec::new();
        let mut player_start = None;

        for _ in 0..config.max_rooms {
            let room = self.room_candidate(config, rng);
            if rooms.iter().any(|other| room.intersects(other)) {
                continue;
            }

            carve_room(&mut grid, &room);
            let center = room.center();
            match rooms.last() {
                None => player_start = Some(center),
                Some(previous) => self.connect(&mut grid, previous.center(), center, rng),
            }

            let start = player_start.unwrap_or(center);
            let mut spawn = SpawnContext {
                grid: &grid,
                entities: &mut entities,
                player_start: start,
                config,
            };
            for populator in &self.populators {
                populator.populate(&room, &mut spawn, rng);
            }

            rooms.push(room);
        }

        let player_start = player_start.ok_or_else(|| {
            WukongError::GenerationFailed("Failed to place any rooms".to_string())
        })?;

        log::debug!(
            "{}: {} rooms from {} attempts, {} entities, start {:?}",
            self.generator_type(),
            rooms.len(),
            config.max_rooms,
            entities.len(),
            player_start
        );

        let level = GeneratedLevel {
            grid,
            rooms,
            entities,
            player_start,
        };
        self.validate(&level, config)?;
        Ok(level)
    }

    fn validate(&self, level: &GeneratedLevel, _config: &GenerationConfig) -> WukongResult<()> {
        if level.grid.floor_count() == 0 {
            return Err(WukongError::GenerationFailed(
                "Level has no floor tiles".to_string(),
            ));
        }
        match level.rooms.first() {
            Some(first) if first.interior_contains(level.player_start) => Ok(()),
            _ => Err(WukongError::GenerationFailed(format!(
                "Player start {:?} is not inside the first room",
                level.player_start
            ))),
        }
    }

    fn generator_type(&self) -> &'static str {
        "DungeonGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::create_rng;

    fn single_room_config(seed: u64) -> GenerationConfig {
        GenerationConfig {
            min_room_size: 6,
            max_room_size: 6,
            ..GenerationConfig::for_testing(seed)
        }
    }

    #[test]
    fn test_single_room_level() {
        let config = single_room_config(12345);
        let mut rng = create_rng(&config);
        let level = DungeonGenerator::new().generate(&config, &mut rng).unwrap();

        assert_eq!(level.rooms.len(), 1);
        let room = level.rooms[0];
        assert_eq!(level.player_start, room.center());

        // A 6x6 room has a 5x5 interior and there are no corridors
        assert_eq!(level.grid.floor_count(), 25);
        for pos in level.grid.positions() {
            assert_eq!(level.grid.is_blocked(pos), !room.interior_contains(pos));
        }
        assert!(level.entities.is_empty());
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let config = GenerationConfig::new(777);
        let a = DungeonGenerator::new()
            .generate(&config, &mut create_rng(&config))
            .unwrap();
        let b = DungeonGenerator::new()
            .generate(&config, &mut create_rng(&config))
            .unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.rooms, b.rooms);
        assert_eq!(a.player_start, b.player_start);
    }

    #[test]
    fn test_rooms_never_touch() {
        for seed in 0..20 {
            let config = GenerationConfig::new(seed);
            let level = DungeonGenerator::layout_only()
                .generate(&config, &mut create_rng(&config))
                .unwrap();
            assert!(level.rooms.len() <= config.max_rooms as usize);
            for (i, a) in level.rooms.iter().enumerate() {
                for b in &level.rooms[i + 1..] {
                    assert!(!a.intersects(b), "seed {seed}: {a:?} touches {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_rooms_stay_inside_map() {
        let config = GenerationConfig::new(99);
        let level = DungeonGenerator::layout_only()
            .generate(&config, &mut create_rng(&config))
            .unwrap();
        for room in &level.rooms {
            assert!(room.x1 >= 0 && room.y1 >= 0);
            assert!(room.x2 < config.map_width && room.y2 < config.map_height);
        }
    }

    #[test]
    fn test_room_centers_are_connected() {
        let config = GenerationConfig::new(4242);
        let level = DungeonGenerator::layout_only()
            .generate(&config, &mut create_rng(&config))
            .unwrap();

        // Flood fill from the start reaches every room center
        let mut seen = std::collections::HashSet::new();
        let mut stack = vec![level.player_start];
        while let Some(pos) = stack.pop() {
            if level.grid.is_blocked(pos) || !seen.insert(pos) {
                continue;
            }
            for d in crate::game::Direction::all() {
                stack.push(pos + d.to_delta());
            }
        }
        for room in &level.rooms {
            assert!(seen.contains(&room.center()));
        }
    }

    #[test]
    fn test_tunnels_are_inclusive() {
        let mut grid = TileGrid::new(10, 10);
        carve_h_tunnel(&mut grid, 7, 2, 4);
        assert_eq!(grid.floor_count(), 6);
        carve_v_tunnel(&mut grid, 1, 1, 0);
        assert!(!grid.is_blocked(Position::new(0, 1)));
        assert_eq!(grid.floor_count(), 7);
    }

    #[test]
    fn test_spawns_avoid_player_start_and_walls() {
        for seed in 0..10 {
            let config = GenerationConfig::new(seed);
            let level = DungeonGenerator::new()
                .generate(&config, &mut create_rng(&config))
                .unwrap();
            for entity in &level.entities {
                assert_ne!(entity.position, level.player_start);
                assert!(!level.grid.is_blocked(entity.position));
                assert!(level
                    .rooms
                    .iter()
                    .any(|room| room.interior_contains(entity.position)));
            }
        }
    }
}
