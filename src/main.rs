//! Hill Rider entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use hill_rider::Tuning;
    use hill_rider::sim::{
        FrameClock, FrameSnapshot, GameEvent, RunState, SimulationState, TickInput, tick,
    };
    use hill_rider::tuning::TrackPreset;

    /// Game instance holding all state
    struct Game {
        state: SimulationState,
        tuning: Tuning,
        clock: FrameClock,
        input: TickInput,
        ctx: CanvasRenderingContext2d,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                state: SimulationState::new(seed, &tuning),
                tuning,
                clock: FrameClock::new(),
                input: TickInput::default(),
                ctx,
            }
        }

        /// Run however many fixed ticks the elapsed time calls for
        fn update(&mut self, time: f64) {
            let ticks = self.clock.advance(time);
            for _ in 0..ticks {
                let input = self.input;
                for event in tick(&mut self.state, &input, &self.tuning) {
                    self.handle_event(event);
                }
                // Clear one-shot inputs after processing
                self.input.click = false;
            }
        }

        fn handle_event(&mut self, event: GameEvent) {
            if let GameEvent::Crashed {
                distance,
                rank: Some(1),
                ..
            } = event
            {
                log::info!("New session best: {distance:.1}m");
            }
        }

        /// Draw the current frame
        fn render(&self) {
            let snapshot = FrameSnapshot::capture(&self.state);
            let ctx = &self.ctx;
            let (w, h) = (
                self.tuning.viewport_width as f64,
                self.tuning.viewport_height as f64,
            );

            ctx.set_fill_style_str("#87ceeb");
            ctx.fill_rect(0.0, 0.0, w, h);

            // Ground polygon down to the bottom edge
            let points = snapshot.terrain.to_screen(snapshot.camera_offset);
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                ctx.set_fill_style_str("#4a7c2a");
                ctx.begin_path();
                ctx.move_to(first.x as f64, h);
                for p in &points {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.line_to(last.x as f64, h);
                ctx.close_path();
                ctx.fill();
            }

            // Vehicle body, rotated about its center
            let center = snapshot.vehicle_screen_pos();
            let v = &snapshot.vehicle;
            ctx.save();
            let _ = ctx.translate(center.x as f64, center.y as f64);
            let _ = ctx.rotate(v.angle as f64);
            ctx.set_fill_style_str("#d62828");
            ctx.fill_rect(
                -(v.width as f64) / 2.0,
                -(v.height as f64) / 2.0,
                v.width as f64,
                v.height as f64,
            );
            ctx.restore();

            ctx.set_fill_style_str("#ffffff");
            ctx.set_font("20px sans-serif");
            let _ = ctx.fill_text(&format!("Distance: {:.0}m", snapshot.distance), 10.0, 30.0);
            match snapshot.run_state {
                RunState::Menu => {
                    let _ = ctx.fill_text("Click to start", w / 2.0 - 60.0, h / 2.0);
                }
                RunState::Crashed => {
                    let _ = ctx.fill_text(
                        &format!(
                            "Crashed! Best {:.0}m - click to retry",
                            snapshot.best_distance
                        ),
                        w / 2.0 - 160.0,
                        h / 2.0,
                    );
                }
                RunState::Playing => {}
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialised".into());
        }

        log::info!("Hill Rider starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("Canvas #gameCanvas not found");
            return;
        };
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("2D context unavailable");
            return;
        };

        // <canvas data-track="rugged"> picks a preset, Rolling otherwise
        let preset = match canvas.get_attribute("data-track") {
            Some(name) => TrackPreset::parse(&name).unwrap_or_else(|| {
                log::warn!("Unknown track preset {name:?}, using Rolling");
                TrackPreset::default()
            }),
            None => TrackPreset::default(),
        };
        let mut tuning = Tuning::from_preset(preset);
        tuning.viewport_width = canvas.width() as f32;
        tuning.viewport_height = canvas.height() as f32;
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Canvas size rejected ({e}), using defaults");
                Tuning::from_preset(preset)
            }
        };
        log::info!(
            "{} track, steepest bank {:.0} degrees",
            preset.as_str(),
            tuning.steepest_bank().to_degrees()
        );

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, ctx)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        for (kind, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowRight" | "d" | "D" => g.input.forward = pressed,
                    "ArrowLeft" | "a" | "A" => g.input.reverse = pressed,
                    " " | "Enter" if pressed => g.input.click = true,
                    _ => {}
                }
            });
            let _ = window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().input.click = true;
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
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
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: drive flat-out until a crash or the tick limit
///
/// Usage: `hill-rider [seed] [gentle|rolling|rugged|tuning.json]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hill_rider::Tuning;
    use hill_rider::sim::{FrameSnapshot, GameEvent, SimulationState, TickInput, end_run, tick};
    use hill_rider::tuning::TrackPreset;

    const MAX_TICKS: u32 = 60 * 120;
    const RUNS: u32 = 3;

    env_logger::init();
    log::info!("Hill Rider (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42u64);
    let arg = args.next();
    let tuning = match (arg.as_deref().and_then(TrackPreset::parse), arg) {
        (Some(preset), _) => Tuning::from_preset(preset),
        (None, Some(path)) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                eprintln!("Failed to load tuning from {path}: {e}");
                std::process::exit(1);
            }
        },
        (None, None) => Tuning::default(),
    };

    log::debug!("tuning: {}", tuning.to_json());
    log::info!(
        "steepest bank {:.1} degrees, crash past {:.1}",
        tuning.steepest_bank().to_degrees(),
        tuning.crash_angle.to_degrees()
    );

    let mut state = SimulationState::new(seed, &tuning);

    for run in 0..RUNS {
        tick(
            &mut state,
            &TickInput {
                click: true,
                ..Default::default()
            },
            &tuning,
        );

        let mut crashed = false;
        for _ in 0..MAX_TICKS {
            let input = TickInput {
                forward: state.grounded,
                ..Default::default()
            };
            crashed = tick(&mut state, &input, &tuning)
                .iter()
                .any(|e| matches!(e, GameEvent::Crashed { .. }));
            if crashed {
                break;
            }
        }
        if !crashed {
            end_run(&mut state);
        }

        println!(
            "run {}: seed {} reached {:.1}m in {} ticks ({})",
            run + 1,
            state.seed,
            state.distance,
            state.time_ticks,
            if crashed { "crashed" } else { "time limit" }
        );
    }

    if let Some(best) = state.records.best() {
        println!("best: {:.1}m (seed {})", best.distance, best.seed);
    }
    match serde_json::to_string(&FrameSnapshot::capture(&state)) {
        Ok(json) => log::debug!("final frame: {json}"),
        Err(e) => log::warn!("could not serialize final frame: {e}"),
    }
}
