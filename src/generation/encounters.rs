//! # Encounter Generation
//!
//! Enemy placement for accepted rooms. The enemy tier is drawn from the fixed
//! spawn weights of [`EnemyKind`].

use crate::game::{EnemyKind, Entity};
use crate::generation::{random_interior_cell, Rect, RoomPopulator, SpawnContext};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::Rng;

/// Draws an enemy tier by spawn weight.
pub fn roll_enemy_kind(rng: &mut StdRng) -> EnemyKind {
    let weights = EnemyKind::ALL.map(|kind| kind.stats().spawn_weight);
    match WeightedIndex::new(weights) {
        Ok(dist) => EnemyKind::ALL[dist.sample(rng)],
        Err(_) => EnemyKind::HungryGhost,
    }
}

/// Places up to `max_room_monsters` enemies per room.
///
/// A roll that lands on a blocked cell is dropped, not retried.
pub struct EncounterGenerator;

impl RoomPopulator for EncounterGenerator {
    fn populate(&self, room: &Rect, spawn: &mut SpawnContext<'_>, rng: &mut StdRng) {
        let count = rng.gen_range(0..=spawn.config.max_room_monsters);
        for _ in 0..count {
            let pos = random_interior_cell(room, rng);
            if spawn.is_blocked(pos) {
                continue;
            }
            let kind = roll_enemy_kind(rng);
            log::trace!("{}: {:?} at {:?}", self.populator_type(), kind, pos);
            spawn.entities.push(Entity::enemy(kind, pos));
        }
    }

    fn populator_type(&self) -> &'static str {
        "EncounterGenerator"
    }
}
