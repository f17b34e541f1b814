//! Falling Blocks - dodge the blocks raining down the canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `input`: Keyboard state consumed at tick boundaries
//! - `game_loop`: Frame driver turning host timestamps into simulation ticks
//! - `renderer`: Drawing onto a 2D surface (Canvas2D on web)
//! - `settings`: Playfield and entity configuration

pub mod game_loop;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game_loop::{GameLoop, LoopControl};
pub use input::{InputState, Key, TickInput};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions (the browser canvas overrides these)
    pub const FIELD_WIDTH: f32 = 480.0;
    pub const FIELD_HEIGHT: f32 = 640.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 25.0;
    pub const PLAYER_HEIGHT: f32 = 25.0;
    /// Pixels per second, per axis
    pub const PLAYER_SPEED: f32 = 480.0;

    /// Falling block defaults
    pub const BLOCK_WIDTH: f32 = 35.0;
    pub const BLOCK_HEIGHT: f32 = 35.0;
    pub const BLOCK_COUNT: usize = 8;

    /// Block speed = (step + BASE) * UNIT px/s, step drawn from 1..=STEPS
    pub const BLOCK_SPEED_BASE: u32 = 10;
    pub const BLOCK_SPEED_STEPS: u32 = 4;
    pub const BLOCK_SPEED_UNIT: f32 = 60.0;

    /// Timestamp value meaning "no tick seen since (re)start"
    pub const UNSET_TIMESTAMP: f64 = 0.0;
}
