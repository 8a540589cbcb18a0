//! Per-frame match update
//!
//! Advances the ball, resolves walls and paddles, drives the computer paddle
//! and decides whether the host should keep scheduling frames.

use super::state::{MatchEvent, MatchState, Side, Winner};
use crate::consts::*;

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Advance the match by one frame
pub fn step(state: &mut MatchState) -> LoopControl {
    if state.is_game_over {
        return LoopControl::Stop;
    }

    state.events.clear();
    state.frame += 1;

    move_ball(state);
    bounce_walls(state);
    resolve_player_end(state);
    resolve_computer_end(state);
    move_computer(state);

    if check_game_over(state) {
        LoopControl::Stop
    } else {
        LoopControl::Continue
    }
}

fn move_ball(state: &mut MatchState) {
    state.ball.pos.y += -state.ball.vel.y;
    // Ball travels straight until the player has engaged it
    if state.player_moved && state.paddle_contact {
        state.ball.pos.x += state.ball.vel.x;
    }
}

fn bounce_walls(state: &mut MatchState) {
    let ball = &mut state.ball;
    if (ball.pos.x < 0.0 && ball.vel.x < 0.0) || (ball.pos.x > WIDTH && ball.vel.x > 0.0) {
        ball.vel.x = -ball.vel.x;
        state.events.push(MatchEvent::WallBounce);
    }
}

fn resolve_player_end(state: &mut MatchState) {
    if state.ball.pos.y <= HEIGHT - PADDLE_DIFF {
        return;
    }

    if state.paddle_bottom.spans(state.ball.pos.x) {
        state.paddle_contact = true;
        if state.player_moved {
            state.ball.vel.y -= 1.0;
            if state.ball.vel.y < -BALL_MAX_SPEED_Y {
                state.ball.vel.y = -BALL_FLOOR_SPEED_Y;
                state.computer_speed = COMPUTER_RATCHET_SPEED;
                log::debug!("Rally speed cap reached, computer speed now {}", state.computer_speed);
                state.events.push(MatchEvent::SpeedRatchet {
                    computer_speed: state.computer_speed,
                });
            }
        }
        state.ball.vel.y = -state.ball.vel.y;

        let trajectory_x = state.ball.pos.x - state.paddle_bottom.center();
        state.ball.vel.x = trajectory_x * DEFLECTION_FACTOR;
        state.events.push(MatchEvent::PaddleHit { side: Side::Player });
    } else if state.ball.pos.y > HEIGHT {
        state.ball_reset();
        state.scores.computer += 1;
        log::debug!("Computer scores ({}-{})", state.scores.player, state.scores.computer);
        state.events.push(MatchEvent::PointScored { by: Side::Computer });
    }
}

fn resolve_computer_end(state: &mut MatchState) {
    if state.ball.pos.y >= PADDLE_DIFF {
        return;
    }

    if state.paddle_top.spans(state.ball.pos.x) {
        if state.player_moved {
            state.ball.vel.y += 1.0;
            if state.ball.vel.y > BALL_MAX_SPEED_Y {
                state.ball.vel.y = BALL_FLOOR_SPEED_Y;
            }
        }
        state.ball.vel.y = -state.ball.vel.y;
        state.events.push(MatchEvent::PaddleHit { side: Side::Computer });
    } else if state.ball.pos.y < 0.0 {
        state.ball_reset();
        state.scores.player += 1;
        log::debug!("Player scores ({}-{})", state.scores.player, state.scores.computer);
        state.events.push(MatchEvent::PointScored { by: Side::Player });
    }
}

/// Straight pursuit of the ball; no prediction, may oscillate around it
fn move_computer(state: &mut MatchState) {
    if !state.player_moved {
        return;
    }
    if state.paddle_top.center() < state.ball.pos.x {
        state.paddle_top.x += state.computer_speed;
    } else {
        state.paddle_top.x -= state.computer_speed;
    }
}

fn check_game_over(state: &mut MatchState) -> bool {
    let scores = state.scores;
    if scores.player != WINNING_SCORE && scores.computer != WINNING_SCORE {
        return false;
    }

    let winner = if scores.player == WINNING_SCORE {
        Winner::Player
    } else {
        Winner::Computer
    };
    state.is_game_over = true;
    state.winner = Some(winner);
    state.events.push(MatchEvent::GameOver { winner });
    log::info!("{} wins after {} frames", winner.label(), state.frame);
    true
}
