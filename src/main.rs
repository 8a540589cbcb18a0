//! Pong AI entry point
//!
//! Web: canvas adapter driven by animation frames, started from the page's
//! level buttons through `start_match`. Native: headless autoplay demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, CustomEvent, CustomEventInit, HtmlCanvasElement, MouseEvent};

    use pong_ai::consts::{HEIGHT, WIDTH};
    use pong_ai::input::PointerMapper;
    use pong_ai::scene::{self, DrawCommand, css_color};
    use pong_ai::{Difficulty, FormFactor, LoopControl, MatchLoop, MatchObserver, MatchView, Settings, Winner};

    /// Draws each frame onto the 2D canvas
    struct CanvasObserver {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl CanvasObserver {
        fn draw(&self, view: &MatchView) {
            for command in scene::build(view).commands {
                if let Err(e) = self.replay(&command) {
                    log::warn!("Draw error: {:?}", e);
                }
            }
        }

        fn replay(&self, command: &DrawCommand) -> Result<(), JsValue> {
            let ctx = &self.ctx;
            match command {
                DrawCommand::FillRect { pos, size, color } => {
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                }
                DrawCommand::DashedLine { from, to, dash, color } => {
                    ctx.begin_path();
                    let pattern = js_sys::Array::of1(&JsValue::from_f64(*dash as f64));
                    ctx.set_line_dash(&pattern)?;
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.set_stroke_style_str(&css_color(*color));
                    ctx.stroke();
                }
                DrawCommand::Circle { center, radius, color } => {
                    ctx.begin_path();
                    ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    )?;
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.fill();
                }
                DrawCommand::Text { text, pos, font, color } => {
                    ctx.set_font(font);
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
                }
            }
            Ok(())
        }
    }

    impl MatchObserver for CanvasObserver {
        fn on_start(&mut self, view: &MatchView) {
            self.canvas.set_hidden(false);
            self.draw(view);
        }

        fn on_frame(&mut self, view: &MatchView) {
            self.draw(view);
        }

        fn on_game_over(&mut self, winner: Winner) {
            log::info!("{} Wins!", winner.label());
            self.canvas.set_hidden(true);
        }
    }

    /// Fire `match-over` for the page's game-over screen.
    ///
    /// Dispatch runs listeners synchronously, so call this with no borrow of
    /// the game held: listeners may call `winner()` or `start_match()`.
    fn announce(canvas: &HtmlCanvasElement, winner: Winner) {
        let init = CustomEventInit::new();
        init.set_detail(&JsValue::from_str(winner.label()));
        match CustomEvent::new_with_event_init_dict("match-over", &init) {
            Ok(event) => {
                let _ = canvas.dispatch_event(&event);
            }
            Err(e) => log::warn!("Could not announce result: {:?}", e),
        }
    }

    struct Game {
        session: MatchLoop<CanvasObserver>,
        last_time: f64,
        frame_pending: bool,
    }

    thread_local! {
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    fn game() -> Result<Rc<RefCell<Game>>, JsValue> {
        GAME.with(|g| g.borrow().clone())
            .ok_or_else(|| JsValue::from_str("game not initialised"))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Pong AI starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        canvas.set_width(WIDTH as u32);
        canvas.set_height(HEIGHT as u32);
        canvas.set_hidden(true);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        let narrow = window
            .match_media("(max-width: 600px)")?
            .map(|mq| mq.matches())
            .unwrap_or(false);
        let detected = if narrow { FormFactor::Mobile } else { FormFactor::Desktop };

        let form_factor = Settings::default().resolve_form_factor(detected);
        let settings = Settings {
            form_factor: Some(form_factor),
            ..Settings::default()
        };
        log::info!("Form factor: {}", form_factor.as_str());

        let screen_width = window.screen()?.width()? as f32;
        let observer = CanvasObserver {
            canvas: canvas.clone(),
            ctx,
        };
        let session = MatchLoop::new(&settings, observer)
            .with_pointer(PointerMapper::centered_on(screen_width));

        let game = Rc::new(RefCell::new(Game {
            session,
            last_time: 0.0,
            frame_pending: false,
        }));
        setup_pointer(&canvas, game.clone());
        GAME.with(|g| *g.borrow_mut() = Some(game));

        log::info!("Pong AI ready");
        Ok(())
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let target = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            game.borrow_mut().session.pointer_move(event.client_x() as f32);
            let _ = target.style().set_property("cursor", "none");
        });
        let _ = canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub fn start(difficulty: &str) -> Result<(), JsValue> {
        let difficulty = Difficulty::from_str(difficulty)
            .ok_or_else(|| JsValue::from_str("unknown difficulty"))?;
        let game = game()?;
        let schedule = {
            let mut g = game.borrow_mut();
            g.session.configure(difficulty);
            g.session.start();
            g.last_time = 0.0;
            // A loop may still be pending from a match that just ended
            !std::mem::replace(&mut g.frame_pending, true)
        };
        if schedule {
            request_animation_frame(game);
        }
        Ok(())
    }

    pub fn winner() -> Option<String> {
        let game = game().ok()?;
        let g = game.borrow();
        g.session.view().winner.map(|w| w.label().to_string())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let (control, finished) = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                pong_ai::consts::FRAME_DT
            };
            g.last_time = time;

            let control = g.session.advance(dt);
            if control == LoopControl::Stop {
                g.frame_pending = false;
            }
            let finished = g
                .session
                .take_finished()
                .map(|winner| (g.session.observer().canvas.clone(), winner));
            (control, finished)
        };

        if let Some((canvas, winner)) = finished {
            announce(&canvas, winner);
        }

        // Stops scheduling once the match is over
        if control == LoopControl::Continue {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Begin a match at the given level ("normal" or "challenging")
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_match(difficulty: &str) -> Result<(), JsValue> {
    wasm_game::start(difficulty)
}

/// Winner label of the last finished match, if any
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn winner() -> Option<String> {
    wasm_game::winner()
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use pong_ai::autoplay::AutoPlayer;
    use pong_ai::sim::MatchEvent;
    use pong_ai::{Difficulty, LoopControl, MatchLoop, MatchObserver, MatchView, Settings, Winner};

    /// Frames before a demo match is abandoned
    const FRAME_LIMIT: u64 = 60 * 60 * 10;

    #[derive(Default)]
    struct Tally {
        rallies: u32,
    }

    impl MatchObserver for Tally {
        fn on_event(&mut self, event: &MatchEvent) {
            match event {
                MatchEvent::PaddleHit { .. } => self.rallies += 1,
                MatchEvent::SpeedRatchet { computer_speed } => {
                    log::info!("Rally speed capped, computer paddle now {}", computer_speed)
                }
                _ => {}
            }
        }

        fn on_game_over(&mut self, winner: Winner) {
            log::info!("{} Wins! ({} paddle hits)", winner.label(), self.rallies);
        }
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Pong AI (native) starting headless demo...");

        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load_from(std::path::Path::new(&path)),
            None => Settings::default(),
        };

        for (round, difficulty) in [Difficulty::Normal, Difficulty::Challenging].into_iter().enumerate() {
            let mut session = MatchLoop::new(&settings, Tally::default());
            let mut player = AutoPlayer::new(round as u64 + 1);
            session.configure(difficulty);
            session.start();

            let mut view: MatchView = session.view();
            while session.state().frame < FRAME_LIMIT {
                session.set_paddle(player.next_paddle_x(&view));
                if session.frame() == LoopControl::Stop {
                    break;
                }
                view = session.view();
            }

            if session.is_running() {
                log::warn!("Match abandoned after {} frames", FRAME_LIMIT);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
