//! Seeded pointer driver
//!
//! Plays the bottom paddle for the headless demo and soak tests. It chases
//! the ball with random jitter and occasionally hesitates, so matches end.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{PADDLE_DIFF, PADDLE_WIDTH, WIDTH};
use crate::session::MatchView;

pub struct AutoPlayer {
    rng: Pcg32,
    /// Maximum aim error either side of the ball (canvas units)
    pub reach: f32,
    /// Chance per frame of not moving at all
    pub hesitation: f64,
    last_x: Option<f32>,
}

impl AutoPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            reach: 30.0,
            hesitation: 0.2,
            last_x: None,
        }
    }

    /// Paddle x for the next frame, always inside the legal range
    pub fn next_paddle_x(&mut self, view: &MatchView) -> f32 {
        if let Some(last) = self.last_x {
            if self.rng.random_bool(self.hesitation) {
                return last;
            }
        }

        let jitter = if self.reach > 0.0 {
            self.rng.random_range(-self.reach..=self.reach)
        } else {
            0.0
        };
        let x = (view.ball_pos.x - PADDLE_DIFF + jitter).clamp(0.0, WIDTH - PADDLE_WIDTH);
        self.last_x = Some(x);
        x
    }
}
