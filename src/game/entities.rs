//! # Entities
//!
//! Every actor or object in a level is an [`Entity`]: a positioned glyph with a
//! name that may carry any subset of three capabilities. A [`Fighter`] can
//! attack and be attacked, a [`Behavior`] acts on its own each turn and an
//! [`ItemSemantics`] can be picked up and used. No capability implies another.

use crate::config;
use crate::game::{new_entity_id, EntityId, Position};
use serde::{Deserialize, Serialize};

/// What happens when a fighter's hit points drop to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathEffect {
    /// Ends the game
    Player,
    /// Rewards the player and leaves a corpse
    Enemy,
}

/// Combat statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub max_hp: i32,
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
    /// Taken (and thereby disarmed) the first time hp reaches zero
    pub on_death: Option<DeathEffect>,
}

impl Fighter {
    pub fn new(hp: i32, defense: i32, power: i32, on_death: Option<DeathEffect>) -> Self {
        Self {
            max_hp: hp,
            hp,
            defense,
            power,
            on_death,
        }
    }

    /// Damage this fighter deals to `target` per hit.
    pub fn damage_against(&self, target: &Fighter) -> i32 {
        self.power - target.defense
    }

    /// Subtracts `amount` hit points.
    ///
    /// Returns the death effect exactly once: on the hit that brings hp to zero
    /// or below. Later hits keep lowering hp but return `None`.
    pub fn take_damage(&mut self, amount: i32) -> Option<DeathEffect> {
        if amount <= 0 {
            return None;
        }
        self.hp -= amount;
        if self.hp <= 0 {
            self.on_death.take()
        } else {
            None
        }
    }

    /// Restores hit points, never above `max_hp`.
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    pub fn is_at_full_health(&self) -> bool {
        self.hp >= self.max_hp
    }
}

/// Autonomous per-turn decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    /// Walks towards the player while seen and attacks when adjacent
    BasicEnemy,
}

/// Effect triggered by using an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    /// Restores a fixed amount of hit points
    Heal,
    /// Strikes a visible enemy picked by its glyph
    QiAttack,
}

impl ItemEffect {
    /// Whether using the item needs a follow-up target key.
    pub fn needs_target(self) -> bool {
        matches!(self, ItemEffect::QiAttack)
    }
}

/// Result of applying an item effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseOutcome {
    /// The item was spent
    Used,
    /// Nothing happened and the item stays in the inventory
    Cancelled,
}

/// Pick-up and use semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSemantics {
    pub on_use: Option<ItemEffect>,
}

/// A positioned actor or object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub position: Position,
    pub glyph: char,
    pub name: String,
    /// Blocks other blocking entities from entering its cell
    pub blocks: bool,
    pub fighter: Option<Fighter>,
    pub behavior: Option<Behavior>,
    pub item: Option<ItemSemantics>,
}

impl Entity {
    /// Creates a bare entity without capabilities.
    pub fn new(position: Position, glyph: char, name: impl Into<String>, blocks: bool) -> Self {
        Self {
            id: new_entity_id(),
            position,
            glyph,
            name: name.into(),
            blocks,
            fighter: None,
            behavior: None,
            item: None,
        }
    }

    pub fn with_fighter(mut self, fighter: Fighter) -> Self {
        self.fighter = Some(fighter);
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = Some(behavior);
        self
    }

    pub fn with_item(mut self, item: ItemSemantics) -> Self {
        self.item = Some(item);
        self
    }

    /// The player character at its starting stats.
    ///
    /// # Examples
    ///
    /// ```
    /// use wukong::{Entity, Position};
    ///
    /// let player = Entity::player(Position::new(5, 5));
    /// assert_eq!(player.glyph, '@');
    /// assert_eq!(player.fighter.as_ref().unwrap().hp, 10);
    /// ```
    pub fn player(position: Position) -> Self {
        Self::new(position, '@', "Wukong", true).with_fighter(Fighter::new(
            config::PLAYER_START_HP,
            config::PLAYER_START_DEFENSE,
            config::PLAYER_START_POWER,
            Some(DeathEffect::Player),
        ))
    }

    pub fn enemy(kind: EnemyKind, position: Position) -> Self {
        let stats = kind.stats();
        Self::new(position, stats.glyph, stats.name, true)
            .with_fighter(Fighter::new(
                stats.hp,
                stats.defense,
                stats.power,
                Some(DeathEffect::Enemy),
            ))
            .with_behavior(Behavior::BasicEnemy)
    }

    pub fn item(kind: ItemKind, position: Position) -> Self {
        let (glyph, name) = match kind {
            ItemKind::QiCultivation => ('!', "QI cultivation spell"),
            ItemKind::QiAttack => ('~', "QI attack spell"),
        };
        Self::new(position, glyph, name, false).with_item(ItemSemantics {
            on_use: Some(kind.effect()),
        })
    }

    /// Living fighter: has combat stats and hp above zero.
    pub fn is_alive_fighter(&self) -> bool {
        self.fighter.as_ref().map(|f| f.hp > 0).unwrap_or(false)
    }

    pub fn distance_to(&self, other: &Entity) -> f64 {
        self.position.euclidean_distance(other.position)
    }
}

/// Capitalizes the first character of a name for sentence starts.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Enemy tiers, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    HungryGhost,
    WhiteBoneDemon,
    BullDemon,
    SpiderQueen,
    ErlanShen,
}

/// Fixed numbers of one enemy tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyStats {
    pub glyph: char,
    pub name: &'static str,
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
    /// Relative spawn weight in percent
    pub spawn_weight: u32,
    /// Power and defense granted to the player on a kill
    pub kill_bonus: i32,
}

const ENEMY_TABLE: [EnemyStats; 5] = [
    EnemyStats {
        glyph: 'H',
        name: "hungry ghost",
        hp: 5,
        defense: 0,
        power: 5,
        spawn_weight: 40,
        kill_bonus: 1,
    },
    EnemyStats {
        glyph: 'W',
        name: "white bone demon",
        hp: 7,
        defense: 2,
        power: 7,
        spawn_weight: 20,
        kill_bonus: 3,
    },
    EnemyStats {
        glyph: 'B',
        name: "bull demon",
        hp: 15,
        defense: 5,
        power: 10,
        spawn_weight: 20,
        kill_bonus: 5,
    },
    EnemyStats {
        glyph: 'S',
        name: "spider queen",
        hp: 30,
        defense: 7,
        power: 15,
        spawn_weight: 10,
        kill_bonus: 7,
    },
    EnemyStats {
        glyph: 'E',
        name: "erlan shen",
        hp: 50,
        defense: 10,
        power: 20,
        spawn_weight: 10,
        kill_bonus: 9,
    },
];

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::HungryGhost,
        EnemyKind::WhiteBoneDemon,
        EnemyKind::BullDemon,
        EnemyKind::SpiderQueen,
        EnemyKind::ErlanShen,
    ];

    pub fn stats(self) -> &'static EnemyStats {
        &ENEMY_TABLE[self as usize]
    }

    /// Looks up the tier drawn with `glyph`.
    pub fn from_glyph(glyph: char) -> Option<EnemyKind> {
        Self::ALL.into_iter().find(|kind| kind.stats().glyph == glyph)
    }
}

/// Kill reward keyed by the dead enemy's glyph; unknown glyphs give nothing.
pub fn kill_bonus_for_glyph(glyph: char) -> i32 {
    EnemyKind::from_glyph(glyph)
        .map(|kind| kind.stats().kill_bonus)
        .unwrap_or(0)
}

/// Consumables found in rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    QiCultivation,
    QiAttack,
}

impl ItemKind {
    pub fn effect(self) -> ItemEffect {
        match self {
            ItemKind::QiCultivation => ItemEffect::Heal,
            ItemKind::QiAttack => ItemEffect::QiAttack,
        }
    }
}
