//! Brick Rogue entry point
//!
//! Native: headless autoplay demo that prints text frames.
//! Web: canvas front end driven by `requestAnimationFrame`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use brick_rogue::highscores::LocalStorageScoreStore;
    use brick_rogue::platform::{KeyState, key_to_input};
    use brick_rogue::renderer::scene::FONT_FAMILY;
    use brick_rogue::renderer::{DrawCommand, RenderSink, Snapshot, TextAlign, build_scene};
    use brick_rogue::{FrameDriver, Settings};

    /// Replays scenes onto a 2D canvas and mirrors the HUD into the page
    struct CanvasSink {
        ctx: CanvasRenderingContext2d,
        document: Document,
    }

    impl CanvasSink {
        fn set_text(&self, id: &str, value: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(value));
            }
        }
    }

    impl RenderSink for CanvasSink {
        fn render(&mut self, snapshot: &Snapshot<'_>) {
            let scene = build_scene(snapshot);
            let ctx = &self.ctx;

            for command in &scene.commands {
                match command {
                    DrawCommand::Clear { color } => {
                        ctx.clear_rect(0.0, 0.0, scene.width as f64, scene.height as f64);
                        ctx.set_fill_style_str(&color.to_css());
                        ctx.fill_rect(0.0, 0.0, scene.width as f64, scene.height as f64);
                    }
                    DrawCommand::Rect {
                        x, y, w, h, color, ..
                    } => {
                        ctx.set_fill_style_str(&color.to_css());
                        ctx.fill_rect(*x as f64, *y as f64, *w as f64, *h as f64);
                    }
                    DrawCommand::Circle {
                        x,
                        y,
                        radius,
                        color,
                    } => {
                        ctx.begin_path();
                        let _ = ctx.arc(*x as f64, *y as f64, *radius as f64, 0.0, TAU);
                        ctx.set_fill_style_str(&color.to_css());
                        ctx.fill();
                        ctx.close_path();
                    }
                    DrawCommand::Text {
                        x,
                        y,
                        text,
                        size,
                        color,
                        align,
                    } => {
                        ctx.set_fill_style_str(&color.to_css());
                        ctx.set_font(&format!("{}px {}", size, FONT_FAMILY));
                        ctx.set_text_align(match align {
                            TextAlign::Left => "left",
                            TextAlign::Center => "center",
                        });
                        let _ = ctx.fill_text(text, *x as f64, *y as f64);
                    }
                }
            }

            self.set_text("level", &scene.hud.level.to_string());
            self.set_text("lives", &scene.hud.lives.to_string());
            self.set_text("score", &scene.hud.score.to_string());
        }
    }

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver<CanvasSink, LocalStorageScoreStore>,
        /// Whether a frame callback is currently scheduled
        looping: bool,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Brick Rogue starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("2D canvas context unavailable");
            return;
        };

        let settings = Settings::load();
        canvas.set_width(settings.sim.width as u32);
        canvas.set_height(settings.sim.height as u32);

        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let sink = CanvasSink { ctx, document };
        let driver = FrameDriver::new(settings.sim, seed, sink, LocalStorageScoreStore);
        let game = Rc::new(RefCell::new(Game {
            driver,
            looping: true,
        }));

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Brick Rogue running with seed {}", seed);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        for (event_name, key_state) in [("keydown", KeyState::Pressed), ("keyup", KeyState::Released)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(input) = key_to_input(&event.key(), key_state) else {
                    return;
                };
                event.prevent_default();

                let resume = {
                    let mut g = game.borrow_mut();
                    let restarted = g.driver.handle(input);
                    let resume = restarted && !g.looping;
                    if resume {
                        g.looping = true;
                    }
                    resume
                };
                // The loop stopped at game over; re-enter it
                if resume {
                    request_animation_frame(game.clone());
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let running = game.borrow_mut().driver.step();
        if running {
            request_animation_frame(game);
        } else {
            game.borrow_mut().looping = false;
            log::info!("Loop halted, press SPACE to restart");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brick_rogue::highscores::FileScoreStore;
    use brick_rogue::renderer::AsciiSink;
    use brick_rogue::sim::InputEvent;
    use brick_rogue::{Autopilot, FrameDriver, Settings};

    env_logger::init();
    log::info!("Brick Rogue (native autoplay) starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(clock_seed);
    let store = FileScoreStore::new(&settings.score_file);
    let sink = AsciiSink::new(settings.ascii_columns, settings.ascii_rows);
    let mut driver = FrameDriver::new(settings.sim, seed, sink, store);
    let mut pilot = Autopilot::new();

    for frame in 0..settings.frames {
        if let Some(input) = pilot.decide(driver.state()) {
            if input == InputEvent::Restart && driver.games_played() >= settings.max_games {
                break;
            }
            driver.handle(input);
        }

        let running = driver.step();
        if settings.print_every > 0 && frame % settings.print_every == 0 {
            println!("{}\n", driver.sink().frame());
        }
        if !running {
            println!("{}\n", driver.sink().frame());
        }
    }

    let state = driver.state();
    println!(
        "Seed {}: {} game(s), level {}, score {}, high score {} ({})",
        seed,
        driver.games_played(),
        state.level,
        state.score,
        state.high_score,
        driver.scores().path().display()
    );
    println!("Upgrades: {:?}", state.upgrades);
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
