//! Draw list for one match frame
//!
//! Backends replay the commands in order onto whatever 2D surface they own.

use glam::Vec2;

use crate::consts::*;
use crate::session::MatchView;

pub type Color = [f32; 4];

pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const GREY: Color = [0.5, 0.5, 0.5, 1.0];

/// Score text style
pub const SCORE_FONT: &str = "32px Courier New";

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { pos: Vec2, size: Vec2, color: Color },
    DashedLine { from: Vec2, to: Vec2, dash: f32, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Text { text: String, pos: Vec2, font: &'static str, color: Color },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// Build the frame: field, paddles, divider, ball, then scores
pub fn build(view: &MatchView) -> Scene {
    let mut scene = Scene::default();
    let paddle_size = Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT);

    scene.push(DrawCommand::FillRect {
        pos: Vec2::ZERO,
        size: Vec2::new(WIDTH, HEIGHT),
        color: BLACK,
    });
    scene.push(DrawCommand::FillRect {
        pos: Vec2::new(view.paddle_bottom_x, PADDLE_BOTTOM_Y),
        size: paddle_size,
        color: WHITE,
    });
    scene.push(DrawCommand::FillRect {
        pos: Vec2::new(view.paddle_top_x, PADDLE_TOP_Y),
        size: paddle_size,
        color: WHITE,
    });
    scene.push(DrawCommand::DashedLine {
        from: Vec2::new(0.0, CENTER_LINE_Y),
        to: Vec2::new(WIDTH, CENTER_LINE_Y),
        dash: 10.0,
        color: GREY,
    });
    scene.push(DrawCommand::Circle {
        center: view.ball_pos,
        radius: view.ball_radius,
        color: WHITE,
    });

    // Player score sits under the divider, computer score above it
    scene.push(DrawCommand::Text {
        text: view.scores.player.to_string(),
        pos: Vec2::new(20.0, HEIGHT / 2.0 + 50.0),
        font: SCORE_FONT,
        color: WHITE,
    });
    scene.push(DrawCommand::Text {
        text: view.scores.computer.to_string(),
        pos: Vec2::new(20.0, HEIGHT / 2.0 - 30.0),
        font: SCORE_FONT,
        color: WHITE,
    });

    scene
}

/// CSS colour string for canvas backends
pub fn css_color(color: Color) -> String {
    let [r, g, b, a] = color;
    format!(
        "rgba({}, {}, {}, {})",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        a
    )
}
