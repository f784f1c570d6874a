//! Dino Volley - a single-screen arcade volleyball mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball kinematics, collisions, scoring, opponent AI)
//! - `input`: Pointer-to-paddle mapping
//! - `platform`: Browser timer plumbing
//! - `settings`: Player display preferences

pub mod input;
pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Field dimensions in CSS pixels
    pub const FIELD_WIDTH: f32 = 384.0;
    pub const FIELD_HEIGHT: f32 = 320.0;

    /// Paddle dimensions - one paddle pinned to each horizontal band
    pub const PADDLE_WIDTH: f32 = 48.0;
    pub const PADDLE_HEIGHT: f32 = 48.0;

    /// Ball bounding box (square)
    pub const BALL_SIZE: f32 = 32.0;

    /// Tick engine cadence (~60 Hz)
    pub const TICK_INTERVAL_MS: i32 = 1000 / 60;

    /// Difficulty ramp cadence and increment
    pub const RAMP_INTERVAL_MS: i32 = 10_000;
    pub const RAMP_INCREMENT: f32 = 0.1;

    /// Opponent tracking speed cap, pixels per tick before the multiplier
    pub const OPPONENT_STEP: f32 = 3.0;

    /// Rightmost legal left-edge for a paddle
    pub const PADDLE_MAX_X: f32 = FIELD_WIDTH - PADDLE_WIDTH;
}
