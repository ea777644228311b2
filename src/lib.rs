//! # Wukong Roguelike
//!
//! A turn-based dungeon crawl in a character grid: Wukong wanders a freshly
//! carved level, fights the demons living in its rooms and gathers qi spells.
//!
//! ## Architecture Overview
//!
//! The crate is split the same way a single turn flows through it:
//!
//! - **Generation**: random non-overlapping rooms joined by L-shaped corridors,
//!   then populated with enemies and spells
//! - **Game State**: the tile grid, the ordered entity list (player first), the
//!   inventory, the message log and the cached field of view
//! - **Entity Model**: one entity type carrying optional fighter, behavior and
//!   item capabilities
//! - **Rendering**: the [`Display`] capability the engine paints through, with a
//!   crossterm terminal implementation and a headless one for tests
//! - **Scenes**: the turn engine that reads a command, applies it and lets every
//!   enemy act

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use scenes::*;
pub use utils::*;

/// Core error type for the Wukong game engine.
#[derive(thiserror::Error, Debug)]
pub enum WukongError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// The environment or a config file cannot host a game
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A scripted key source has no keys left
    #[error("Input exhausted")]
    InputExhausted,
}

/// Result type used throughout the Wukong codebase.
pub type WukongResult<T> = Result<T, WukongError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Terminal columns required by the game screen
    pub const SCREEN_WIDTH: u16 = 80;

    /// Terminal rows required by the game screen
    pub const SCREEN_HEIGHT: u16 = 24;

    /// Dungeon width in tiles
    pub const MAP_WIDTH: i32 = SCREEN_WIDTH as i32;

    /// Dungeon height in tiles (two rows are reserved for the message and status lines)
    pub const MAP_HEIGHT: i32 = SCREEN_HEIGHT as i32 - 2;

    /// Screen row of the message line
    pub const MESSAGE_ROW: u16 = 22;

    /// Screen row of the status line
    pub const STATUS_ROW: u16 = 23;

    /// Smallest room side, walls included
    pub const ROOM_MIN_SIZE: i32 = 6;

    /// Largest room side, walls included
    pub const ROOM_MAX_SIZE: i32 = 12;

    /// Room placement attempts per level
    pub const MAX_ROOMS: u32 = 30;

    /// Upper bound of the per-room enemy roll
    pub const MAX_ROOM_MONSTERS: u32 = 5;

    /// Upper bound of the per-room item roll
    pub const MAX_ROOM_ITEMS: u32 = 2;

    /// Field of view radius around the player
    pub const FOV_RADIUS: i32 = 10;

    /// Player starting hit points
    pub const PLAYER_START_HP: i32 = 10;

    /// Player starting defense
    pub const PLAYER_START_DEFENSE: i32 = 0;

    /// Player starting power
    pub const PLAYER_START_POWER: i32 = 5;

    /// Number of QI attack spells the player starts with
    pub const STARTING_QI_ATTACKS: usize = 3;

    /// Hit points restored by the QI cultivation spell
    pub const HEAL_AMOUNT: i32 = 5;

    /// One inventory slot per letter a-z
    pub const INVENTORY_CAPACITY: usize = 26;

    /// Max hp gained per kill
    pub const KILL_MAX_HP_BONUS: i32 = 5;

    /// Max hp never grows to this value through kills
    pub const MAX_HP_CAP: i32 = 99;

    /// Largest map side a config file may ask for
    pub const MAX_MAP_SIDE: i32 = 1024;

    /// Glyph of anything that died
    pub const CORPSE_GLYPH: char = '%';
}
