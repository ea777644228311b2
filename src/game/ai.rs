//! # Enemy Behavior
//!
//! One decision per enemy per turn, made against the player's cached visible
//! set: enemies the player cannot see stay put, seen enemies close in and
//! attack once adjacent.

use crate::game::{Behavior, EntityId, GameState};

impl GameState {
    /// Lets every entity with a behavior act once, in draw order.
    pub fn run_enemy_turns(&mut self) {
        let actors: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|e| e.behavior.is_some())
            .map(|e| e.id)
            .collect();

        for id in actors {
            if !self.is_playing() {
                break;
            }
            // Looked up again because a death earlier in the turn may reorder entities
            if let Some(index) = self.entity_index(id) {
                self.take_enemy_turn(index);
            }
        }
        self.end_turn();
    }

    /// Single decision of the entity at `index`.
    pub fn take_enemy_turn(&mut self, index: usize) {
        let Some(enemy) = self.entities.get(index) else {
            return;
        };
        match enemy.behavior {
            Some(Behavior::BasicEnemy) => self.basic_enemy_turn(index),
            None => {}
        }
    }

    fn basic_enemy_turn(&mut self, index: usize) {
        let enemy = &self.entities[index];
        if !self.fov.is_visible(enemy.position) {
            return;
        }

        let player = self.player();
        let distance = enemy.distance_to(player);
        let player_alive = player.is_alive_fighter();
        let target = player.position;

        if distance >= 2.0 {
            let moved = self.move_towards(index, target);
            log::trace!("{} approaches (moved: {})", self.entities[index].name, moved);
        } else if player_alive {
            log::trace!("{} attacks", self.entities[index].name);
            self.attack(index, 0);
        }
    }
}
