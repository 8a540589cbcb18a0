//! Host adapter around the match loop
//!
//! Owns the match state, frame clock and pointer mapping, and reports what
//! happened each frame to a `MatchObserver` (renderer, HUD, sound, logs).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::input::PointerMapper;
use crate::settings::Settings;
use crate::sim::{Difficulty, FrameClock, LoopControl, MatchEvent, MatchState, Scores, Winner, step};

/// Read-only snapshot of what the presentation layer draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchView {
    pub ball_pos: Vec2,
    pub ball_radius: f32,
    pub paddle_bottom_x: f32,
    pub paddle_top_x: f32,
    pub scores: Scores,
    pub is_game_over: bool,
    pub winner: Option<Winner>,
}

impl From<&MatchState> for MatchView {
    fn from(state: &MatchState) -> Self {
        Self {
            ball_pos: state.ball.pos,
            ball_radius: state.ball.radius,
            paddle_bottom_x: state.paddle_bottom.x,
            paddle_top_x: state.paddle_top.x,
            scores: state.scores,
            is_game_over: state.is_game_over,
            winner: state.winner,
        }
    }
}

/// Callbacks from the match loop. All hooks default to no-ops.
pub trait MatchObserver {
    fn on_start(&mut self, _view: &MatchView) {}
    fn on_event(&mut self, _event: &MatchEvent) {}
    fn on_frame(&mut self, _view: &MatchView) {}
    fn on_game_over(&mut self, _winner: Winner) {}
}

impl MatchObserver for () {}

/// A running match and the observer watching it
pub struct MatchLoop<O: MatchObserver> {
    state: MatchState,
    clock: FrameClock,
    pointer: PointerMapper,
    observer: O,
    /// Result of the match that just ended, until a host takes it
    finished: Option<Winner>,
}

impl<O: MatchObserver> MatchLoop<O> {
    pub fn new(settings: &Settings, observer: O) -> Self {
        let mut state = MatchState::new(settings.form_factor.unwrap_or_default());
        state.configure(settings.difficulty);
        Self {
            state,
            clock: FrameClock::with_rate(settings.frame_rate, settings.max_substeps),
            pointer: PointerMapper::default(),
            observer,
            finished: None,
        }
    }

    pub fn with_pointer(mut self, pointer: PointerMapper) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn configure(&mut self, difficulty: Difficulty) {
        self.state.configure(difficulty);
        log::info!("Difficulty set to {}", difficulty.as_str());
    }

    pub fn start(&mut self) {
        self.state.start();
        self.clock.reset();
        self.finished = None;
        log::info!(
            "Match started ({}, {}, computer speed {})",
            self.state.difficulty.as_str(),
            self.state.form_factor.as_str(),
            self.state.computer_speed
        );
        let view = self.view();
        self.observer.on_start(&view);
    }

    /// Forward a raw pointer x (screen space) to the player paddle
    pub fn pointer_move(&mut self, client_x: f32) {
        let x = self.pointer.paddle_x(client_x);
        self.state.set_player_paddle(x);
    }

    /// Place the player paddle directly (canvas space, already clamped)
    pub fn set_paddle(&mut self, x: f32) {
        self.state.set_player_paddle(x);
    }

    /// Run exactly one frame, one per display refresh
    pub fn frame(&mut self) -> LoopControl {
        if !self.is_running() {
            return LoopControl::Stop;
        }

        let control = step(&mut self.state);
        for event in &self.state.events {
            self.observer.on_event(event);
        }
        let view = self.view();
        self.observer.on_frame(&view);

        if control == LoopControl::Stop {
            if let Some(winner) = self.state.winner {
                self.finished = Some(winner);
                self.observer.on_game_over(winner);
            }
        }
        control
    }

    /// Run as many fixed frames as `dt` seconds cover
    pub fn advance(&mut self, dt: f32) -> LoopControl {
        if !self.is_running() {
            return LoopControl::Stop;
        }

        let frames = self.clock.advance(dt);
        for _ in 0..frames {
            if self.frame() == LoopControl::Stop {
                return LoopControl::Stop;
            }
        }
        LoopControl::Continue
    }

    /// Winner of the match that just ended, returned once
    ///
    /// Hosts that share the loop behind a `RefCell` announce the result with
    /// this after releasing their borrow, so page callbacks can re-enter.
    pub fn take_finished(&mut self) -> Option<Winner> {
        self.finished.take()
    }

    pub fn is_running(&self) -> bool {
        !self.state.is_game_over
    }

    pub fn view(&self) -> MatchView {
        MatchView::from(&self.state)
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FormFactor, Side};

    #[derive(Default)]
    struct Recorder {
        starts: u32,
        frames: u32,
        events: Vec<MatchEvent>,
        winners: Vec<Winner>,
    }

    impl MatchObserver for Recorder {
        fn on_start(&mut self, _view: &MatchView) {
            self.starts += 1;
        }
        fn on_event(&mut self, event: &MatchEvent) {
            self.events.push(*event);
        }
        fn on_frame(&mut self, _view: &MatchView) {
            self.frames += 1;
        }
        fn on_game_over(&mut self, winner: Winner) {
            self.winners.push(winner);
        }
    }

    #[test]
    fn test_frames_only_after_start() {
        let mut session = MatchLoop::new(&Settings::default(), Recorder::default());
        assert!(!session.is_running());
        assert_eq!(session.frame(), LoopControl::Stop);
        assert_eq!(session.observer().frames, 0);

        session.start();
        assert!(session.is_running());
        assert_eq!(session.frame(), LoopControl::Continue);
        assert_eq!(session.observer().starts, 1);
        assert_eq!(session.observer().frames, 1);
    }

    #[test]
    fn test_game_over_reported_once() {
        let mut session = MatchLoop::new(&Settings::default(), Recorder::default());
        session.start();
        // Park the player paddle far from the straight serve
        session.set_paddle(0.0);

        let mut control = LoopControl::Continue;
        let mut frames = 0;
        while control == LoopControl::Continue && frames < 1_000 {
            control = session.frame();
            frames += 1;
        }
        assert_eq!(control, LoopControl::Stop);
        assert_eq!(session.frame(), LoopControl::Stop);

        let recorder = session.observer();
        assert_eq!(recorder.winners, vec![Winner::Computer]);
        assert!(recorder.events.contains(&MatchEvent::PointScored { by: Side::Computer }));
        assert_eq!(session.view().winner, Some(Winner::Computer));
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut session = MatchLoop::new(&Settings::default(), Recorder::default());
        session.start();
        session.set_paddle(0.0);
        while session.frame() == LoopControl::Continue {}

        session.configure(Difficulty::Challenging);
        session.start();
        assert!(session.is_running());
        assert_eq!(session.state().scores, Scores::default());
        assert_eq!(session.state().computer_speed, 8.0);
        assert_eq!(session.observer().starts, 2);
    }

    #[test]
    fn test_finished_taken_once_outside_borrow() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let session = Rc::new(RefCell::new(MatchLoop::new(&Settings::default(), ())));
        session.borrow_mut().start();
        session.borrow_mut().set_paddle(0.0);
        assert_eq!(session.borrow_mut().take_finished(), None);

        // Run to the end the way the animation-frame callback does
        let finished = loop {
            let mut s = session.borrow_mut();
            if s.advance(1.0 / 30.0) == LoopControl::Stop {
                break s.take_finished();
            }
        };
        assert_eq!(finished, Some(Winner::Computer));

        // Borrow released: a result listener can read and restart the match
        assert_eq!(session.borrow().view().winner, Some(Winner::Computer));
        assert_eq!(session.borrow_mut().take_finished(), None);
        session.borrow_mut().start();
        assert!(session.borrow().is_running());
        assert_eq!(session.borrow_mut().take_finished(), None);
    }

    #[test]
    fn test_advance_uses_clock() {
        let mut session = MatchLoop::new(&Settings::default(), Recorder::default());
        session.start();
        // ~3 frames worth of time at 60 Hz
        assert_eq!(session.advance(0.051), LoopControl::Continue);
        assert_eq!(session.observer().frames, 3);
        assert_eq!(session.state().ball.pos.y, 365.0);
    }

    #[test]
    fn test_pointer_move_maps_and_engages() {
        let settings = Settings {
            form_factor: Some(FormFactor::Mobile),
            ..Settings::default()
        };
        let mut session =
            MatchLoop::new(&settings, ()).with_pointer(PointerMapper::centered_on(1000.0));
        session.pointer_move(530.0);
        assert!(session.state().player_moved);
        assert_eq!(session.state().paddle_bottom.x, 255.0);
        assert_eq!(session.state().computer_speed, 2.0);
    }
}
