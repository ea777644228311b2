//! # Turn Engine
//!
//! Drives one game from the first render to victory, defeat or quit.
//!
//! Every iteration of the loop renders the screen, checks for the end of the
//! game, reads and applies one player command, and lets the enemies act if the
//! command took a turn. Only then are the turn's messages shown, so they never
//! interleave with a prompt.

use crate::game::{GameState, TurnOutcome};
use crate::input::{InputHandler, PlayerInput};
use crate::rendering::{clear_entities, render_all, show_message, Display};
use crate::WukongResult;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// Every enemy is dead
    Victory,
    /// The player died
    Defeat,
    /// The player quit
    Quit,
}

/// The single owner and mutator of a running game.
pub struct TurnEngine<D: Display> {
    game_state: GameState,
    display: D,
    input_handler: InputHandler,
}

impl<D: Display> TurnEngine<D> {
    pub fn new(game_state: GameState, display: D) -> Self {
        Self {
            game_state,
            display,
            input_handler: InputHandler::new(),
        }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn into_parts(self) -> (GameState, D) {
        (self.game_state, self.display)
    }

    /// Runs turns until the game ends.
    pub fn run(&mut self) -> WukongResult<GameOutcome> {
        log::info!("game started");
        loop {
            if let Some(outcome) = self.step()? {
                log::info!("game ended: {:?} after {} turns", outcome, self.game_state.turn_number);
                return Ok(outcome);
            }
        }
    }

    /// Plays one iteration of the loop. Returns the outcome once the game ends.
    pub fn step(&mut self) -> WukongResult<Option<GameOutcome>> {
        let enemy_count = self.game_state.enemy_count();
        render_all(&mut self.game_state, &mut self.display, enemy_count)?;

        if enemy_count == 0 || !self.game_state.is_playing() {
            let outcome = if self.game_state.is_playing() {
                show_message(&mut self.display, "You killed all enemies!")?;
                GameOutcome::Victory
            } else {
                GameOutcome::Defeat
            };
            self.display.read_key()?;
            return Ok(Some(outcome));
        }

        let turn = self.handle_command()?;
        if turn == TurnOutcome::Exit {
            return Ok(Some(GameOutcome::Quit));
        }

        clear_entities(&self.game_state, &mut self.display)?;
        if self.game_state.is_playing() && turn == TurnOutcome::TookTurn {
            self.game_state.run_enemy_turns();
        }

        self.flush_messages()?;
        Ok(None)
    }

    /// Reads one key and applies the command bound to it.
    fn handle_command(&mut self) -> WukongResult<TurnOutcome> {
        let key = self.display.read_key()?;
        let Some(input) = self.input_handler.map_key(key) else {
            log::trace!("unbound key {:?}", key);
            return Ok(TurnOutcome::DidNotTakeTurn);
        };
        log::debug!("command {:?}", input);

        let outcome = match input {
            PlayerInput::Move(direction) => self.game_state.player_move_or_attack(direction),
            PlayerInput::PickUp => self.game_state.pick_up(),
            PlayerInput::ShowInventory => self.game_state.list_inventory(),
            PlayerInput::UseItem => self.use_item()?,
            PlayerInput::Quit => TurnOutcome::Exit,
        };
        Ok(outcome)
    }

    /// Asks for an inventory slot and, for targeted items, a target glyph.
    fn use_item(&mut self) -> WukongResult<TurnOutcome> {
        if self.game_state.inventory.is_empty() {
            self.game_state.message("You have no items to use!");
            return Ok(TurnOutcome::DidNotTakeTurn);
        }

        show_message(
            &mut self.display,
            "What to use? (inventory item, e.g. \"a\" or \"b\")",
        )?;
        let key = self.display.read_key()?;
        let Some(slot) = self.game_state.inventory.slot_for_key(key) else {
            self.game_state.message("There is no such item!");
            return Ok(TurnOutcome::DidNotTakeTurn);
        };

        let target = match self.game_state.inventory.effect_at(slot) {
            Some(Some(effect)) if effect.needs_target() => {
                show_message(
                    &mut self.display,
                    "Who to attack? (enemy char, e.g. \"H\" or \"W\")",
                )?;
                Some(self.display.read_key()?)
            }
            _ => None,
        };

        let result = self.game_state.use_item(slot, target);
        log::debug!("used slot {} with target {:?}: {:?}", slot, target, result);
        Ok(TurnOutcome::DidNotTakeTurn)
    }

    /// Shows everything that happened this turn on the message line.
    fn flush_messages(&mut self) -> WukongResult<()> {
        let text = self.game_state.messages.drain().join(" ");
        show_message(&mut self.display, &text)
    }
}
