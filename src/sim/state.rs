//! Match state and core simulation types
//!
//! Everything the loop mutates between frames lives in one owned `MatchState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Computer paddle difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Normal,
    Challenging,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Normal => "Normal",
            Difficulty::Challenging => "Challenging",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(Difficulty::Normal),
            "challenging" | "hard" => Some(Difficulty::Challenging),
            _ => None,
        }
    }

    /// Computer paddle step per frame for this level
    pub fn computer_speed(&self, form_factor: FormFactor) -> f32 {
        let base = match self {
            Difficulty::Normal => 4.0,
            Difficulty::Challenging => 8.0,
        };
        base * form_factor.speed_scale()
    }
}

/// Device class the match is played on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FormFactor {
    #[default]
    Desktop,
    /// Narrow screens (max-width 600px)
    Mobile,
}

impl FormFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormFactor::Desktop => "Desktop",
            FormFactor::Mobile => "Mobile",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" => Some(FormFactor::Desktop),
            "mobile" | "narrow" => Some(FormFactor::Mobile),
            _ => None,
        }
    }

    /// Multiplier applied to the computer paddle speed
    pub fn speed_scale(&self) -> f32 {
        match self {
            FormFactor::Desktop => 1.0,
            FormFactor::Mobile => 0.5,
        }
    }

    /// Ball speed (both axes) before the first start
    fn initial_ball_speed(&self) -> f32 {
        match self {
            FormFactor::Desktop => -5.0,
            FormFactor::Mobile => -2.0,
        }
    }
}

/// Which end of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Bottom paddle, pointer controlled
    Player,
    /// Top paddle, AI controlled
    Computer,
}

/// Match result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Computer,
}

impl Winner {
    /// Label shown on the game-over screen
    pub fn label(&self) -> &'static str {
        match self {
            Winner::Player => "Player 1",
            Winner::Computer => "Computer",
        }
    }
}

/// Something that happened during a single step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    WallBounce,
    PaddleHit { side: Side },
    /// Vertical speed passed the cap and the computer paddle sped up
    SpeedRatchet { computer_speed: f32 },
    PointScored { by: Side },
    GameOver { winner: Winner },
}

/// The ball
///
/// `vel.y` follows the field's "speed toward the top" convention: each frame
/// moves the ball by `-vel.y` in canvas space, so negative values travel down
/// toward the player and positive values up toward the computer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(speed: f32) -> Self {
        Self {
            pos: Vec2::new(WIDTH / 2.0, HEIGHT / 2.0),
            vel: Vec2::splat(speed),
            radius: BALL_RADIUS,
        }
    }
}

/// A paddle, identified by its left edge
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self { x: PADDLE_START_X }
    }
}

impl Paddle {
    /// Strict overlap test against the paddle span (edges miss)
    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        x > self.x && x < self.x + PADDLE_WIDTH
    }

    /// Reference centre used for AI pursuit and deflection
    #[inline]
    pub fn center(&self) -> f32 {
        self.x + PADDLE_DIFF
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub player: u32,
    pub computer: u32,
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub ball: Ball,
    /// Player paddle
    pub paddle_bottom: Paddle,
    /// Computer paddle
    pub paddle_top: Paddle,
    /// Set on the first pointer input, never cleared
    pub player_moved: bool,
    /// Ball has touched the player paddle since the last reset
    pub paddle_contact: bool,
    pub scores: Scores,
    pub difficulty: Difficulty,
    pub form_factor: FormFactor,
    /// Computer paddle step per frame
    pub computer_speed: f32,
    pub is_game_over: bool,
    pub is_new_game: bool,
    pub winner: Option<Winner>,
    /// Frames stepped since the last start
    pub frame: u64,
    /// Events from the most recent step
    #[serde(skip)]
    pub events: Vec<MatchEvent>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(FormFactor::Desktop)
    }
}

impl MatchState {
    /// Fresh state waiting for its first `start()`
    pub fn new(form_factor: FormFactor) -> Self {
        let difficulty = Difficulty::default();
        Self {
            ball: Ball::new(form_factor.initial_ball_speed()),
            paddle_bottom: Paddle::default(),
            paddle_top: Paddle::default(),
            player_moved: false,
            paddle_contact: false,
            scores: Scores::default(),
            difficulty,
            form_factor,
            computer_speed: difficulty.computer_speed(form_factor),
            is_game_over: true,
            is_new_game: true,
            winner: None,
            frame: 0,
            events: Vec::new(),
        }
    }

    /// Select the computer paddle's difficulty
    pub fn configure(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.computer_speed = difficulty.computer_speed(self.form_factor);
    }

    /// Begin a new match: zero the scores and serve from the centre
    pub fn start(&mut self) {
        self.computer_speed = self.difficulty.computer_speed(self.form_factor);
        self.is_game_over = false;
        self.is_new_game = false;
        self.winner = None;
        self.scores = Scores::default();
        self.frame = 0;
        self.events.clear();
        self.ball_reset();
    }

    /// Re-centre the ball after a point. Horizontal speed carries over.
    pub fn ball_reset(&mut self) {
        self.ball.pos = Vec2::new(WIDTH / 2.0, HEIGHT / 2.0);
        self.ball.vel.y = BALL_RESET_SPEED_Y;
        self.paddle_contact = false;
    }

    /// Write the player paddle position (already clamped by the input layer)
    pub fn set_player_paddle(&mut self, x: f32) {
        self.paddle_bottom.x = x;
        self.player_moved = true;
    }
}
