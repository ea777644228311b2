//! # Item Generation
//!
//! Spell placement for accepted rooms: QI cultivation spells paired with
//! QI attack spells.

use crate::game::{Entity, ItemKind, Position};
use crate::generation::{random_interior_cell, Rect, RoomPopulator, SpawnContext};
use rand::rngs::StdRng;
use rand::Rng;

/// Places up to `max_room_items` spell pairs per room.
///
/// Each roll puts a QI cultivation spell on a free cell, then rolls a second
/// cell for a QI attack spell, which is placed only if that cell is free and
/// shares neither row nor column with the first. Items go to the front of the
/// entity list so they draw beneath enemies.
pub struct ItemGenerator;

impl RoomPopulator for ItemGenerator {
    fn populate(&self, room: &Rect, spawn: &mut SpawnContext<'_>, rng: &mut StdRng) {
        let count = rng.gen_range(0..=spawn.config.max_room_items);
        for _ in 0..count {
            let heal_pos = random_interior_cell(room, rng);
            if !spawn.is_occupied(heal_pos) {
                self.place(spawn, ItemKind::QiCultivation, heal_pos);
            }

            let attack_pos = random_interior_cell(room, rng);
            if !spawn.is_occupied(attack_pos)
                && attack_pos.x != heal_pos.x
                && attack_pos.y != heal_pos.y
            {
                self.place(spawn, ItemKind::QiAttack, attack_pos);
            }
        }
    }

    fn populator_type(&self) -> &'static str {
        "ItemGenerator"
    }
}

impl ItemGenerator {
    fn place(&self, spawn: &mut SpawnContext<'_>, kind: ItemKind, pos: Position) {
        log::trace!("{}: {:?} at {:?}", self.populator_type(), kind, pos);
        spawn.entities.insert(0, Entity::item(kind, pos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EnemyKind, Position, TileGrid};
    use crate::generation::{carve_room, GenerationConfig};
    use rand::SeedableRng;

    #[test]
    fn test_items_go_beneath_enemies() {
        let room = Rect::new(0, 0, 12, 12);
        let mut grid = TileGrid::new(13, 13);
        carve_room(&mut grid, &room);
        let config = GenerationConfig {
            max_room_items: 2,
            ..GenerationConfig::new(0)
        };
        let mut entities = vec![Entity::enemy(EnemyKind::HungryGhost, Position::new(2, 2))];
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..5 {
            let mut spawn = SpawnContext {
                grid: &grid,
                entities: &mut entities,
                player_start: Position::new(6, 6),
                config: &config,
            };
            ItemGenerator.populate(&room, &mut spawn, &mut rng);
        }

        let last = entities.len() - 1;
        assert_eq!(entities[last].glyph, 'H');
        assert!(entities[..last].iter().all(|e| e.item.is_some() && !e.blocks));
        assert!(entities.iter().all(|e| e.position != Position::new(6, 6)));
    }

    #[test]
    fn test_single_roll_places_both_spell_kinds() {
        let room = Rect::new(0, 0, 12, 12);
        let mut grid = TileGrid::new(13, 13);
        carve_room(&mut grid, &room);
        let config = GenerationConfig {
            max_room_items: 1,
            ..GenerationConfig::new(0)
        };

        let mut paired = false;
        for seed in 0..200 {
            let mut entities = Vec::new();
            let mut spawn = SpawnContext {
                grid: &grid,
                entities: &mut entities,
                player_start: Position::new(6, 6),
                config: &config,
            };
            let mut rng = StdRng::seed_from_u64(seed);
            ItemGenerator.populate(&room, &mut spawn, &mut rng);

            let heals: Vec<_> = entities.iter().filter(|e| e.glyph == '!').collect();
            let attacks: Vec<_> = entities.iter().filter(|e| e.glyph == '~').collect();
            assert!(heals.len() <= 1 && attacks.len() <= 1);
            if let (Some(heal), Some(attack)) = (heals.first(), attacks.first()) {
                assert_ne!(heal.position.x, attack.position.x);
                assert_ne!(heal.position.y, attack.position.y);
                paired = true;
            }
        }
        assert!(paired);
    }

    #[test]
    fn test_room_can_hold_two_pairs() {
        let room = Rect::new(0, 0, 12, 12);
        let mut grid = TileGrid::new(13, 13);
        carve_room(&mut grid, &room);
        let config = GenerationConfig {
            max_room_items: 2,
            ..GenerationConfig::new(0)
        };

        let full_rooms = (0..2000)
            .filter(|&seed| {
                let mut entities = Vec::new();
                let mut spawn = SpawnContext {
                    grid: &grid,
                    entities: &mut entities,
                    player_start: Position::new(6, 6),
                    config: &config,
                };
                let mut rng = StdRng::seed_from_u64(seed);
                ItemGenerator.populate(&room, &mut spawn, &mut rng);
                entities.len() == 4
            })
            .count();
        assert!(full_rooms > 0);
    }
}
