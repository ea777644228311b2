//! # Inventory
//!
//! The player's carried items, addressed by letter slots `a` to `z`, and the
//! pick-up and use operations on the game state.

use crate::config;
use crate::game::{
    capitalize, Entity, GameState, ItemEffect, ItemKind, Position, TurnOutcome, UseOutcome,
};

/// Items carried by the player, in pick-up order.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<Entity>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inventory holding `count` QI attack spells, capped at capacity.
    pub fn with_starting_spells(count: usize) -> Self {
        let items = (0..count.min(config::INVENTORY_CAPACITY))
            .map(|_| Entity::item(ItemKind::QiAttack, Position::new(0, 0)))
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= config::INVENTORY_CAPACITY
    }

    pub fn get(&self, slot: usize) -> Option<&Entity> {
        self.items.get(slot)
    }

    pub fn items(&self) -> &[Entity] {
        &self.items
    }

    /// Slot addressed by a letter key, if that slot is filled.
    pub fn slot_for_key(&self, key: char) -> Option<usize> {
        if !key.is_ascii_lowercase() {
            return None;
        }
        let slot = (key as u8 - b'a') as usize;
        (slot < self.items.len()).then_some(slot)
    }

    /// Effect of the item in `slot`. `None` for an empty slot, `Some(None)`
    /// for an item that cannot be used.
    pub fn effect_at(&self, slot: usize) -> Option<Option<ItemEffect>> {
        self.items
            .get(slot)
            .map(|item| item.item.and_then(|semantics| semantics.on_use))
    }

    /// `(a) name (b) name ...`
    pub fn listing(&self) -> String {
        self.items
            .iter()
            .zip('a'..='z')
            .map(|(item, letter)| format!("({}) {}", letter, item.name))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn push(&mut self, item: Entity) {
        debug_assert!(!self.is_full());
        self.items.push(item);
    }

    fn remove(&mut self, slot: usize) -> Option<Entity> {
        (slot < self.items.len()).then(|| self.items.remove(slot))
    }
}

impl GameState {
    /// Picks up the first item lying under the player. Never takes a turn.
    pub fn pick_up(&mut self) -> TurnOutcome {
        let position = self.player().position;
        let found = self
            .entities
            .iter()
            .skip(1)
            .position(|e| e.item.is_some() && e.position == position)
            .map(|offset| offset + 1);

        match found {
            Some(index) => {
                self.pick_up_entity(index);
            }
            None => self.message("There is nothing here to pick up."),
        }
        TurnOutcome::DidNotTakeTurn
    }

    /// Moves the entity at `index` from the level into the inventory.
    ///
    /// A full inventory leaves both untouched and only reports the failure.
    pub fn pick_up_entity(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entities.len() {
            return false;
        }
        if self.inventory.is_full() {
            let name = self.entities[index].name.clone();
            self.message(format!("Your inventory is full, cannot pick up {}.", name));
            return false;
        }
        let item = self.entities.remove(index);
        self.message(format!("You picked up a {}!", item.name));
        log::debug!("picked up {} ({} carried)", item.name, self.inventory.len() + 1);
        self.inventory.push(item);
        true
    }

    /// Uses the item in `slot`. `target` is the glyph key for targeted items.
    ///
    /// The item is consumed unless the effect reports [`UseOutcome::Cancelled`].
    pub fn use_item(&mut self, slot: usize, target: Option<char>) -> UseOutcome {
        let Some(effect) = self.inventory.effect_at(slot) else {
            log::warn!("use of empty inventory slot {}", slot);
            self.message("There is no such item!");
            return UseOutcome::Cancelled;
        };

        let outcome = match effect {
            None => {
                let name = self.inventory.items[slot].name.clone();
                self.message(format!("The {} cannot be used.", name));
                UseOutcome::Cancelled
            }
            Some(ItemEffect::Heal) => self.cast_heal(),
            Some(ItemEffect::QiAttack) => self.cast_qi_attack(target),
        };

        if outcome == UseOutcome::Used {
            self.inventory.remove(slot);
        }
        outcome
    }

    /// Shows the inventory on the message line. Never takes a turn.
    pub fn list_inventory(&mut self) -> TurnOutcome {
        if self.inventory.is_empty() {
            self.message("Inventory is empty");
        } else {
            let listing = self.inventory.listing();
            self.message(listing);
        }
        TurnOutcome::DidNotTakeTurn
    }

    fn cast_heal(&mut self) -> UseOutcome {
        let at_full_health = self
            .player_fighter()
            .map_or(true, |fighter| fighter.is_at_full_health());
        if at_full_health {
            self.message("You are already at full health.");
            return UseOutcome::Cancelled;
        }
        if let Some(fighter) = self.player_mut().fighter.as_mut() {
            fighter.heal(config::HEAL_AMOUNT);
        }
        self.message("You feel your body filling with QI!");
        UseOutcome::Used
    }

    fn cast_qi_attack(&mut self, target: Option<char>) -> UseOutcome {
        let found = target.and_then(|glyph| {
            self.entities.iter().skip(1).position(|e| {
                e.fighter.is_some() && e.glyph == glyph && self.fov.is_visible(e.position)
            })
        });

        match found.map(|offset| offset + 1) {
            Some(index) => {
                let name = capitalize(&self.entities[index].name);
                self.attack(0, index);
                self.message(format!("You used QI to attack {}", name));
                UseOutcome::Used
            }
            None => {
                let glyph = target.map(String::from).unwrap_or_default();
                self.message(format!("There is no enemy {}!", glyph));
                UseOutcome::Cancelled
            }
        }
    }
}
