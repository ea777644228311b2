//! # Combat
//!
//! Attack resolution and the two death effects.

use crate::config;
use crate::game::{capitalize, kill_bonus_for_glyph, DeathEffect, GameCompletionState, GameState};

impl GameState {
    /// Resolves one attack of `attacker` on `target` and returns the damage.
    ///
    /// Damage is `power - defense`. Zero or negative damage leaves the target
    /// untouched and only reports that the attack had no effect. Enemy
    /// attackers are announced with their current stats.
    pub fn attack(&mut self, attacker: usize, target: usize) -> i32 {
        let fighters = (
            self.entities.get(attacker).and_then(|e| e.fighter.as_ref()),
            self.entities.get(target).and_then(|e| e.fighter.as_ref()),
        );
        let (Some(attacker_fighter), Some(target_fighter)) = fighters else {
            debug_assert!(false, "attack between {attacker} and {target} without fighters");
            return 0;
        };
        let damage = attacker_fighter.damage_against(target_fighter);

        let mut attacker_name = capitalize(&self.entities[attacker].name);
        if attacker != 0 {
            attacker_name.push_str(&format!(
                "(HP:{}/{} Power:{} Defence:{})",
                attacker_fighter.hp,
                attacker_fighter.max_hp,
                attacker_fighter.power,
                attacker_fighter.defense
            ));
        }
        let target_name = self.entities[target].name.clone();
        if damage > 0 {
            self.message(format!(
                "{attacker_name} attacks {target_name} for {damage} hit points."
            ));
            self.apply_damage(target, damage);
        } else {
            self.message(format!(
                "{attacker_name} attacks {target_name} but it has no effect!"
            ));
        }
        damage
    }

    /// Lowers the target's hp and runs its death effect if this hit armed it.
    pub fn apply_damage(&mut self, target: usize, amount: i32) {
        let effect = self
            .entities
            .get_mut(target)
            .and_then(|e| e.fighter.as_mut())
            .and_then(|fighter| fighter.take_damage(amount));

        if let Some(effect) = effect {
            self.handle_death(target, effect);
        }
    }

    fn handle_death(&mut self, index: usize, effect: DeathEffect) {
        match effect {
            DeathEffect::Player => {
                log::info!("player died on turn {}", self.turn_number);
                self.message("You died!");
                self.completion_state = GameCompletionState::Dead;
                self.entities[index].glyph = config::CORPSE_GLYPH;
            }
            DeathEffect::Enemy => {
                let name = self.entities[index].name.clone();
                let bonus = kill_bonus_for_glyph(self.entities[index].glyph);
                log::info!("{} killed, bonus {}", name, bonus);
                self.message(format!("{} is dead!", capitalize(&name)));

                if let Some(player) = self.entities[0].fighter.as_mut() {
                    if player.max_hp + config::KILL_MAX_HP_BONUS < config::MAX_HP_CAP {
                        player.max_hp += config::KILL_MAX_HP_BONUS;
                    }
                    player.power += bonus;
                    player.defense += bonus;
                }

                let corpse = &mut self.entities[index];
                corpse.glyph = config::CORPSE_GLYPH;
                corpse.blocks = false;
                corpse.fighter = None;
                corpse.behavior = None;
                self.send_to_back(index);
            }
        }
    }
}
