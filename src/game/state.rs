//! # Game State Module
//!
//! Central simulation state for one level.
//!
//! [`GameState`] owns the tile grid, the ordered entity list, the inventory,
//! the message log and the cached field of view. It is the only thing the turn
//! engine mutates; combat, enemy decisions and inventory handling are
//! implemented on it in their own modules.

use crate::game::{Direction, Entity, EntityId, FieldOfView, Fighter, Inventory, Position, TileGrid};
use crate::generation::{create_rng, DungeonGenerator, GeneratedLevel, GenerationConfig, Generator};
use crate::{config, WukongResult};

/// Whether the game is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCompletionState {
    /// Game is still in progress
    Playing,
    /// Player died
    Dead,
}

/// What a dispatched command meant for the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Enemies get to act
    TookTurn,
    /// Informational or transactional; enemies wait
    DidNotTakeTurn,
    /// Leave the game immediately
    Exit,
}

/// Messages produced since the display last showed them.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    pending: Vec<String>,
}

impl MessageLog {
    pub fn push(&mut self, text: impl Into<String>) {
        self.pending.push(text.into());
    }

    /// Hands out and forgets everything pending.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Central game state for one level.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Terrain of the current level
    pub grid: TileGrid,
    /// All entities on the level; index 0 is always the player
    pub entities: Vec<Entity>,
    /// Items carried by the player
    pub inventory: Inventory,
    /// Current game completion state
    pub completion_state: GameCompletionState,
    /// Memoised visible set of the player
    pub fov: FieldOfView,
    /// Messages waiting to be shown
    pub messages: MessageLog,
    /// Completed turns
    pub turn_number: u64,
}

impl GameState {
    /// Generates a level from the config and sets the player up on it.
    ///
    /// # Examples
    ///
    /// ```
    /// use wukong::{GameCompletionState, GameState, GenerationConfig};
    ///
    /// let game_state = GameState::new(&GenerationConfig::new(12345)).unwrap();
    /// assert_eq!(game_state.completion_state, GameCompletionState::Playing);
    /// assert_eq!(game_state.player().glyph, '@');
    /// assert_eq!(game_state.inventory.len(), 3);
    /// ```
    pub fn new(config: &GenerationConfig) -> WukongResult<Self> {
        let mut rng = create_rng(config);
        let level = DungeonGenerator::new().generate(config, &mut rng)?;
        Ok(Self::from_level(level, config))
    }

    /// Builds the state around an already generated level.
    pub fn from_level(level: GeneratedLevel, config: &GenerationConfig) -> Self {
        let mut game_state = Self::new_with_level(level.grid, level.player_start);
        game_state.fov = FieldOfView::new(config.fov_radius);
        game_state.entities.extend(level.entities);
        game_state.inventory = Inventory::with_starting_spells(config.starting_qi_attacks);
        log::info!(
            "level ready: {} rooms, {} enemies, player at {:?}",
            level.rooms.len(),
            game_state.enemy_count(),
            level.player_start
        );
        game_state
    }

    /// Creates a state with a hand-made grid and only the player on it.
    pub fn new_with_level(grid: TileGrid, player_start: Position) -> Self {
        Self {
            grid,
            entities: vec![Entity::player(player_start)],
            inventory: Inventory::new(),
            completion_state: GameCompletionState::Playing,
            fov: FieldOfView::new(config::FOV_RADIUS),
            messages: MessageLog::default(),
            turn_number: 0,
        }
    }

    /// Adds an entity on top of the draw order and returns its ID.
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    pub fn player(&self) -> &Entity {
        &self.entities[0]
    }

    pub fn player_mut(&mut self) -> &mut Entity {
        &mut self.entities[0]
    }

    /// The player's fighter. Present for the player's whole lifetime.
    pub fn player_fighter(&self) -> Option<&Fighter> {
        self.player().fighter.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.completion_state == GameCompletionState::Playing
    }

    pub fn message(&mut self, text: impl Into<String>) {
        self.messages.push(text);
    }

    /// Finds the current index of an entity.
    pub fn entity_index(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id == id)
    }

    /// Entities other than the player that still carry combat stats.
    pub fn enemy_count(&self) -> usize {
        self.entities
            .iter()
            .skip(1)
            .filter(|e| e.fighter.is_some())
            .count()
    }

    /// Blocked tile or a blocking entity standing on it.
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.grid.is_blocked(pos) || self.entities.iter().any(|e| e.blocks && e.position == pos)
    }

    /// First entity with a fighter standing on `pos`.
    pub fn fighter_at(&self, pos: Position) -> Option<usize> {
        self.entities
            .iter()
            .position(|e| e.fighter.is_some() && e.position == pos)
    }

    /// Moves an entity by `delta` unless the destination is blocked.
    ///
    /// Returns whether the entity moved.
    pub fn move_entity(&mut self, index: usize, delta: Position) -> bool {
        let Some(entity) = self.entities.get(index) else {
            debug_assert!(false, "move of missing entity {index}");
            return false;
        };
        let destination = entity.position + delta;
        if self.is_blocked(destination) {
            return false;
        }
        self.entities[index].position = destination;
        true
    }

    /// One step straight towards `target`; no pathfinding, no sliding.
    pub fn move_towards(&mut self, index: usize, target: Position) -> bool {
        let Some(entity) = self.entities.get(index) else {
            return false;
        };
        let step = entity.position.step_towards(target);
        if step == Position::new(0, 0) {
            return false;
        }
        self.move_entity(index, step)
    }

    /// Moves the entity just behind the player so it draws under live ones.
    pub fn send_to_back(&mut self, index: usize) {
        if index <= 1 || index >= self.entities.len() {
            return;
        }
        let entity = self.entities.remove(index);
        self.entities.insert(1, entity);
    }

    /// Bump-to-attack movement of the player.
    ///
    /// A fighter on the destination is attacked, which always takes a turn. A
    /// plain step takes a turn only if it succeeds; bumping into a wall or a
    /// blocking non-fighter costs nothing.
    pub fn player_move_or_attack(&mut self, direction: Direction) -> TurnOutcome {
        let delta = direction.to_delta();
        let destination = self.player().position + delta;

        if let Some(target) = self.fighter_at(destination).filter(|&index| index != 0) {
            self.attack(0, target);
            return TurnOutcome::TookTurn;
        }

        if self.move_entity(0, delta) {
            self.fov.invalidate();
            TurnOutcome::TookTurn
        } else {
            log::trace!("player bumped into {:?}", destination);
            TurnOutcome::DidNotTakeTurn
        }
    }

    /// Recomputes the player's visible set if a move invalidated it.
    pub fn refresh_visibility(&mut self) -> bool {
        let origin = self.entities[0].position;
        self.fov.refresh(origin, &mut self.grid)
    }

    /// Closes a turn in which enemies acted.
    pub fn end_turn(&mut self) {
        self.turn_number += 1;
    }
}

/// A 7x7 walled room with the player in its center.
#[cfg(test)]
pub(crate) fn arena() -> GameState {
    let mut grid = TileGrid::new(7, 7);
    for y in 1..6 {
        for x in 1..6 {
            grid.carve(Position::new(x, y));
        }
    }
    GameState::new_with_level(grid, Position::new(3, 3))
}
