//! Pong AI - player paddle versus a reactive computer paddle
//!
//! Core modules:
//! - `sim`: Match state and the per-frame update loop
//! - `session`: Host adapter driving the loop and notifying an observer
//! - `scene`: Renderer-agnostic draw list for a match frame
//! - `input`: Pointer to paddle position mapping
//! - `autoplay`: Seeded pointer driver for demos and soak tests
//! - `settings`: JSON-backed configuration

pub mod autoplay;
pub mod input;
pub mod scene;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{MatchLoop, MatchObserver, MatchView};
pub use settings::Settings;
pub use sim::{Difficulty, FormFactor, LoopControl, MatchState, Winner, step};

/// Game configuration constants
pub mod consts {
    /// Nominal display refresh the physics constants were tuned against
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum frames run for one host callback
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest host delta accepted before clamping (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Canvas dimensions
    pub const WIDTH: f32 = 500.0;
    pub const HEIGHT: f32 = 700.0;
    /// Dashed divider between the two halves
    pub const CENTER_LINE_Y: f32 = 350.0;

    /// Paddle dimensions
    pub const PADDLE_WIDTH: f32 = 50.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Paddle zone depth, also the paddle's half-width reference point
    pub const PADDLE_DIFF: f32 = 25.0;
    /// Paddle start x (centred)
    pub const PADDLE_START_X: f32 = 225.0;
    /// Drawn y of the player's paddle (top edge)
    pub const PADDLE_BOTTOM_Y: f32 = HEIGHT - 20.0;
    /// Drawn y of the computer's paddle (top edge)
    pub const PADDLE_TOP_Y: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 5.0;
    /// Vertical speed restored on every ball reset (negative = toward the player)
    pub const BALL_RESET_SPEED_Y: f32 = -5.0;
    /// Vertical speed magnitude cap before the rally speed resets
    pub const BALL_MAX_SPEED_Y: f32 = 8.0;
    /// Magnitude the vertical speed falls back to after passing the cap
    pub const BALL_FLOOR_SPEED_Y: f32 = 5.0;
    /// Horizontal speed per unit of offset from the paddle centre
    pub const DEFLECTION_FACTOR: f32 = 0.3;

    /// Computer paddle speed after a rally passes the vertical cap
    pub const COMPUTER_RATCHET_SPEED: f32 = 6.0;

    /// Points needed to win a match
    pub const WINNING_SCORE: u32 = 1;
}
