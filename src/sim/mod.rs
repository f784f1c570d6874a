//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No rendering or platform dependencies
//! - No RNG: the match plays out identically for identical inputs

pub mod state;
pub mod tick;

pub use state::MatchState;
pub use tick::{ramp, tick};
