//! Pointer input mapping
//!
//! The canvas sits horizontally centred on the screen. A raw pointer x in
//! screen space becomes the player paddle's left edge in canvas space.

use crate::consts::{PADDLE_DIFF, PADDLE_WIDTH, WIDTH};

#[derive(Debug, Clone, Copy, Default)]
pub struct PointerMapper {
    /// Screen x of the canvas' left edge
    pub canvas_left: f32,
}

impl PointerMapper {
    pub fn new(canvas_left: f32) -> Self {
        Self { canvas_left }
    }

    /// Mapper for a canvas centred on a screen of the given width
    pub fn centered_on(screen_width: f32) -> Self {
        Self::new(screen_width / 2.0 - WIDTH / 2.0)
    }

    /// Paddle x for a pointer at `client_x`, clamped to the field
    ///
    /// Anything left of one paddle-half snaps flush to the left wall.
    pub fn paddle_x(&self, client_x: f32) -> f32 {
        let x = client_x - self.canvas_left - PADDLE_DIFF;
        if x < PADDLE_DIFF {
            0.0
        } else if x > WIDTH - PADDLE_WIDTH {
            WIDTH - PADDLE_WIDTH
        } else {
            x
        }
    }
}
