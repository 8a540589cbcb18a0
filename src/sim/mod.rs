//! Deterministic match simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame, no wall-clock time
//! - No RNG
//! - No rendering or platform dependencies

pub mod clock;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use state::{Ball, Difficulty, FormFactor, MatchEvent, MatchState, Paddle, Scores, Side, Winner};
pub use tick::{LoopControl, step};
