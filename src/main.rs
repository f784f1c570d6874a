//! Dino Volley entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, MouseEvent, TouchEvent};

    use dino_volley::consts::*;
    use dino_volley::input;
    use dino_volley::platform::Interval;
    use dino_volley::settings::Settings;
    use dino_volley::sim::{MatchState, ramp, tick};

    /// Application state shared between timers and input handlers
    struct App {
        state: MatchState,
        settings: Settings,
        // Tick-rate tracking
        tick_times: [f64; 60],
        tick_index: usize,
        tps: u32,
    }

    impl App {
        fn new(settings: Settings) -> Self {
            Self {
                state: MatchState::new(),
                settings,
                tick_times: [0.0; 60],
                tick_index: 0,
                tps: 0,
            }
        }

        /// Record a tick timestamp and refresh the ticks-per-second estimate
        fn record_tick(&mut self, now_ms: f64) {
            self.tick_times[self.tick_index] = now_ms;
            self.tick_index = (self.tick_index + 1) % self.tick_times.len();

            let oldest = self.tick_times[self.tick_index];
            if oldest > 0.0 {
                let elapsed = now_ms - oldest;
                if elapsed > 0.0 {
                    self.tps = (60_000.0 / elapsed).round() as u32;
                }
            }
        }

        fn restart(&mut self) {
            self.state.reset();
            log::info!("Match restarted");
        }
    }

    /// Both repeating tasks, cancelled together when dropped
    struct Timers {
        _tick: Interval,
        _ramp: Interval,
    }

    thread_local! {
        static TIMERS: RefCell<Option<Timers>> = const { RefCell::new(None) };
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dino Volley starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let app = Rc::new(RefCell::new(App::new(Settings::load())));

        setup_input_handlers(&document, app.clone());
        setup_restart_button(&document, app.clone());
        setup_keyboard(app.clone());

        // Tick engine at ~60 Hz: advance the simulation, then read the
        // state back out into the DOM.
        let tick_timer = {
            let app = app.clone();
            let document = document.clone();
            Interval::start(TICK_INTERVAL_MS, move || {
                let mut a = app.borrow_mut();
                tick(&mut a.state);
                a.record_tick(js_sys::Date::now());
                render(&document, &a);
            })?
        };

        // Difficulty ramp on its own real-time schedule, firing whether or
        // not the match is over.
        let ramp_timer = {
            let app = app.clone();
            Interval::start(RAMP_INTERVAL_MS, move || {
                let mut a = app.borrow_mut();
                ramp(&mut a.state);
                log::info!("Speed multiplier now x{:.1}", a.state.speed_multiplier);
            })?
        };

        TIMERS.with(|t| {
            *t.borrow_mut() = Some(Timers {
                _tick: tick_timer,
                _ramp: ramp_timer,
            });
        });

        log::info!("Dino Volley running!");
        Ok(())
    }

    /// Tear down both timers. Safe to call more than once.
    pub fn shutdown() {
        TIMERS.with(|t| t.borrow_mut().take());
        log::info!("Timers cancelled");
    }

    /// Write the match state into the DOM. Missing elements are skipped.
    fn render(document: &Document, app: &App) {
        let state = &app.state;

        set_style_px(document, "opponent-paddle", "left", state.opponent_x);
        set_style_px(document, "ball", "left", state.ball_pos.x);
        set_style_px(document, "ball", "top", state.ball_pos.y);
        set_style_px(document, "player-paddle", "left", state.player_x);

        set_text(document, "score-value", &state.score.to_string());

        set_visible(document, "speed-readout", app.settings.show_speed);
        if app.settings.show_speed {
            set_text(
                document,
                "speed-value",
                &format!("x{:.1}", state.speed_multiplier),
            );
        }

        set_visible(document, "tps-readout", app.settings.show_tps);
        if app.settings.show_tps {
            set_text(document, "tps-value", &app.tps.to_string());
        }

        set_visible(document, "game-over", state.game_over);
        if state.game_over {
            set_text(document, "final-score", &state.score.to_string());
        }
    }

    fn set_style_px(document: &Document, id: &str, prop: &str, value: f32) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property(prop, &format!("{value}px"));
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Convert a viewport X into a paddle position and write it into the
    /// match state. Events arriving before the field exists are ignored.
    fn apply_pointer(field: &Element, app: &Rc<RefCell<App>>, client_x: f32) {
        let rect = field.get_bounding_client_rect();
        let field_x = client_x - rect.left() as f32;
        app.borrow_mut()
            .state
            .set_player_x(input::paddle_from_pointer(field_x));
    }

    fn setup_input_handlers(document: &Document, app: Rc<RefCell<App>>) {
        let Some(field) = document.get_element_by_id("field") else {
            log::warn!("No #field element; pointer input disabled");
            return;
        };

        // Mouse move
        {
            let app = app.clone();
            let field_clone = field.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                apply_pointer(&field_clone, &app, event.client_x() as f32);
            });
            let _ = field
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start and move share one handler
        for event_name in ["touchstart", "touchmove"] {
            let app = app.clone();
            let field_clone = field.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    apply_pointer(&field_clone, &app, touch.client_x() as f32);
                }
            });
            let _ =
                field.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut a = app.borrow_mut();
            match event.key().as_str() {
                "r" | "R" => a.restart(),
                "f" | "F" => {
                    a.settings.show_tps = !a.settings.show_tps;
                    a.settings.save();
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_app::run() {
        web_sys::console::error_1(&e);
    }
}

/// Explicit teardown hook: cancels both repeating tasks together.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn shutdown() {
    wasm_app::shutdown();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dino Volley (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Play out a short demo match with the player mirroring the ball
    demo_match();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_match() {
    use dino_volley::consts::*;
    use dino_volley::sim::{MatchState, ramp, tick};

    let mut state = MatchState::new();
    let ticks_per_ramp = (RAMP_INTERVAL_MS / TICK_INTERVAL_MS) as u64;

    for n in 1..=3600u64 {
        // Keep the paddle centered under the ball
        state.set_player_x(state.ball_pos.x - (PADDLE_WIDTH - BALL_SIZE) / 2.0);
        tick(&mut state);
        if n % ticks_per_ramp == 0 {
            ramp(&mut state);
        }
        if state.game_over {
            break;
        }
    }

    println!(
        "Demo match: score {}, speed x{:.1}, game over: {}",
        state.score, state.speed_multiplier, state.game_over
    );
}
