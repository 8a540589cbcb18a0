use glam::Vec2;
use pong_ai::autoplay::AutoPlayer;
use pong_ai::consts::*;
use pong_ai::sim::{MatchEvent, Side};
use pong_ai::{Difficulty, FormFactor, LoopControl, MatchLoop, MatchState, Settings, Winner, step};
use proptest::prelude::*;

fn started(difficulty: Difficulty) -> MatchState {
    let mut state = MatchState::default();
    state.configure(difficulty);
    state.start();
    state
}

#[test]
fn test_default_start() {
    let state = started(Difficulty::Normal);
    assert_eq!(state.scores.player, 0);
    assert_eq!(state.scores.computer, 0);
    assert_eq!(state.ball.pos, Vec2::new(WIDTH / 2.0, HEIGHT / 2.0));
    assert_eq!(state.ball.vel.y, -5.0);
    assert_eq!(state.computer_speed, 4.0);
    assert!(!state.is_game_over);
}

#[test]
fn test_bottom_paddle_contact() {
    let mut state = started(Difficulty::Normal);
    state.set_player_paddle(180.0);
    state.ball.pos = Vec2::new(215.0, 671.0);

    assert_eq!(step(&mut state), LoopControl::Continue);
    assert!(state.paddle_contact);
    assert_eq!(state.ball.vel.y.abs(), 6.0);
    assert!(state.ball.vel.y > 0.0, "ball should head back up");
    assert_eq!(state.ball.vel.x, (215.0 - (180.0 + 25.0)) * 0.3);
}

#[test]
fn test_miss_ends_match_for_computer() {
    let mut state = started(Difficulty::Normal);
    state.set_player_paddle(400.0);
    state.ball.pos = Vec2::new(250.0, 696.0);

    assert_eq!(step(&mut state), LoopControl::Stop);
    assert_eq!(state.scores.computer, 1);
    assert!(state.is_game_over);
    assert_eq!(state.winner.map(|w| w.label()), Some("Computer"));
}

#[test]
fn test_challenging_pursuit_speed() {
    let displacement = |difficulty, form_factor| {
        let mut state = MatchState::new(form_factor);
        state.configure(difficulty);
        state.start();
        state.player_moved = true;
        state.ball.pos.x = 60.0;
        step(&mut state);
        PADDLE_START_X - state.paddle_top.x
    };

    assert_eq!(displacement(Difficulty::Normal, FormFactor::Desktop), 4.0);
    assert_eq!(displacement(Difficulty::Challenging, FormFactor::Desktop), 8.0);
    assert_eq!(displacement(Difficulty::Normal, FormFactor::Mobile), 2.0);
    assert_eq!(displacement(Difficulty::Challenging, FormFactor::Mobile), 4.0);
}

#[test]
fn test_ratchet_lasts_until_restart() {
    let mut state = started(Difficulty::Challenging);
    state.set_player_paddle(PADDLE_START_X);

    // Four player hits: 5 -> 6 -> 7 -> 8 -> past the cap
    for (incoming, outgoing) in [(-5.0, 6.0), (-6.0, 7.0), (-7.0, 8.0), (-8.0, 5.0)] {
        state.ball.pos = Vec2::new(state.paddle_bottom.center(), 672.0);
        state.ball.vel.y = incoming;
        step(&mut state);
        assert_eq!(state.ball.vel.y, outgoing);
    }
    assert_eq!(state.computer_speed, COMPUTER_RATCHET_SPEED);

    // Survives later points within the match
    state.ball_reset();
    step(&mut state);
    assert_eq!(state.computer_speed, COMPUTER_RATCHET_SPEED);

    state.start();
    assert_eq!(state.computer_speed, 8.0);
}

#[test]
fn test_autoplay_matches_finish() {
    for seed in 0..8 {
        let mut session = MatchLoop::new(&Settings::default(), ());
        let mut player = AutoPlayer::new(seed);
        session.start();

        let mut frames = 0;
        while frames < 100_000 {
            let x = player.next_paddle_x(&session.view());
            session.set_paddle(x);
            if session.frame() == LoopControl::Stop {
                break;
            }
            frames += 1;
        }

        let state = session.state();
        assert!(state.is_game_over, "seed {} never finished", seed);
        let winner = state.winner.expect("finished match has a winner");
        assert_eq!(winner == Winner::Player, state.scores.player == WINNING_SCORE);
        assert!(state.events.iter().any(|e| matches!(e, MatchEvent::GameOver { .. })));
    }
}

#[test]
fn test_identical_inputs_identical_matches() {
    let run = || {
        let mut session = MatchLoop::new(&Settings::default(), ());
        let mut player = AutoPlayer::new(42);
        session.start();
        for _ in 0..500 {
            let x = player.next_paddle_x(&session.view());
            session.set_paddle(x);
            session.frame();
        }
        serde_json::to_string(session.state()).unwrap()
    };
    assert_eq!(run(), run());
}

proptest! {
    #[test]
    fn prop_ball_reset_always_centres(
        x in -100.0f32..600.0,
        y in -100.0f32..800.0,
        vx in -20.0f32..20.0,
        vy in -9.0f32..9.0,
        contact in any::<bool>(),
    ) {
        let mut state = started(Difficulty::Normal);
        state.ball.pos = Vec2::new(x, y);
        state.ball.vel = Vec2::new(vx, vy);
        state.paddle_contact = contact;

        state.ball_reset();
        prop_assert_eq!(state.ball.pos, Vec2::new(250.0, 350.0));
        prop_assert_eq!(state.ball.vel.y, -5.0);
        prop_assert!(!state.paddle_contact);
    }

    #[test]
    fn prop_x_frozen_unless_engaged(
        x in 1.0f32..499.0,
        y in 60.0f32..640.0,
        vx in -10.0f32..10.0,
        vy in -8.0f32..8.0,
        moved in any::<bool>(),
        contact in any::<bool>(),
    ) {
        let mut state = started(Difficulty::Normal);
        state.player_moved = moved;
        state.paddle_contact = contact;
        state.ball.pos = Vec2::new(x, y);
        state.ball.vel = Vec2::new(vx, vy);

        step(&mut state);
        if moved && contact {
            prop_assert_eq!(state.ball.pos.x, x + vx);
        } else {
            prop_assert_eq!(state.ball.pos.x, x);
        }
    }

    #[test]
    fn prop_computer_hit_keeps_vx(
        offset in 1.0f32..49.0,
        vx in -10.0f32..10.0,
        vy in 5.0f32..8.0,
        moved in any::<bool>(),
    ) {
        let mut state = started(Difficulty::Normal);
        state.player_moved = moved;
        state.paddle_contact = false;
        state.ball.pos = Vec2::new(PADDLE_START_X + offset, 24.0 + vy);
        state.ball.vel = Vec2::new(vx, vy);

        step(&mut state);
        let hit = state.events.contains(&MatchEvent::PaddleHit { side: Side::Computer });
        prop_assert!(hit, "computer paddle should return the ball");
        prop_assert_eq!(state.ball.vel.x, vx);
        prop_assert!(state.ball.vel.y < 0.0);
    }

    #[test]
    fn prop_scores_never_decrease(seed in any::<u64>()) {
        let mut session = MatchLoop::new(&Settings::default(), ());
        let mut player = AutoPlayer::new(seed);
        session.start();

        let mut last = session.state().scores;
        for _ in 0..2_000 {
            let x = player.next_paddle_x(&session.view());
            session.set_paddle(x);
            let control = session.frame();
            let scores = session.state().scores;
            prop_assert!(scores.player >= last.player && scores.computer >= last.computer);
            last = scores;
            if control == LoopControl::Stop {
                break;
            }
        }
    }
}
