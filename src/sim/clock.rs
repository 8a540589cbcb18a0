//! Fixed-step frame clock
//!
//! The physics constants are per-frame values tuned for a 60 Hz display.
//! The clock turns variable host deltas into a whole number of those frames
//! so motion stays the same on faster or slower refresh rates.

use crate::consts::{FRAME_DT, MAX_FRAME_DELTA, MAX_SUBSTEPS};

#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FRAME_DT, MAX_SUBSTEPS)
    }
}

impl FrameClock {
    pub fn new(frame_dt: f32, max_substeps: u32) -> Self {
        Self {
            frame_dt,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    /// Clock for a target frame rate in Hz
    pub fn with_rate(frame_rate: f32, max_substeps: u32) -> Self {
        let frame_dt = if frame_rate > 0.0 {
            1.0 / frame_rate
        } else {
            FRAME_DT
        };
        Self::new(frame_dt, max_substeps)
    }

    pub fn frame_dt(&self) -> f32 {
        self.frame_dt
    }

    /// Accumulate `dt` seconds and return how many frames are due
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, MAX_FRAME_DELTA);
        self.accumulator += dt;

        let mut frames = 0;
        while self.accumulator >= self.frame_dt && frames < self.max_substeps {
            self.accumulator -= self.frame_dt;
            frames += 1;
        }

        // Drop backlog beyond the substep cap to prevent a spiral of death
        if frames == self.max_substeps {
            self.accumulator = self.accumulator.min(self.frame_dt);
        }
        frames
    }

    /// Discard leftover time (on start or resume)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
