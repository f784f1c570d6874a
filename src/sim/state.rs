//! Match state and initial literals
//!
//! `MatchState` is the only mutable game entity. It is owned by the tick
//! engine and touched from exactly three places: `tick`, `ramp`, and the
//! input adapter's clamped paddle write.

use glam::Vec2;

use crate::consts::*;

/// Complete match state for one run
#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    /// Left edge of the player paddle (bottom band)
    pub player_x: f32,
    /// Left edge of the opponent paddle (top band)
    pub opponent_x: f32,
    /// Top-left of the ball bounding box
    pub ball_pos: Vec2,
    /// Per-tick velocity, sign encodes direction
    pub ball_vel: Vec2,
    /// Successful player returns
    pub score: u32,
    /// Terminal flag; once set, `tick` is a no-op until `reset`
    pub game_over: bool,
    /// Global scalar applied to ball and opponent motion, grows without bound
    pub speed_multiplier: f32,
}

impl MatchState {
    /// Create a fresh match with the fixed serve literals
    pub fn new() -> Self {
        Self {
            player_x: 150.0,
            opponent_x: 150.0,
            ball_pos: Vec2::new(200.0, 160.0),
            ball_vel: Vec2::new(2.0, -2.0),
            score: 0,
            game_over: false,
            speed_multiplier: 1.0,
        }
    }

    /// Restore the initial literals. Timer scheduling is untouched; only the
    /// multiplier value returns to 1.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Clamped paddle write from the input adapter. Last writer wins: rapid
    /// pointer events between ticks simply overwrite each other.
    pub fn set_player_x(&mut self, x: f32) {
        self.player_x = x.clamp(0.0, PADDLE_MAX_X);
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}
