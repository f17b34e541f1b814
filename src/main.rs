//! Falling Blocks entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use falling_blocks::renderer::CanvasSurface;
    use falling_blocks::{GameLoop, Key, LoopControl, Settings};

    /// Game instance holding all state
    struct Game {
        game_loop: GameLoop,
        surface: CanvasSurface,
        /// Pending `requestAnimationFrame` handle
        frame_id: Option<i32>,
    }

    /// Settings from the canvas `data-settings` attribute, sized to the canvas
    fn load_settings(canvas: &HtmlCanvasElement) -> Result<Settings, JsValue> {
        let json = canvas.get_attribute("data-settings");
        let (width, height) = (canvas.width() as f32, canvas.height() as f32);

        let mut settings = Settings::for_canvas(json.as_deref(), width, height)
            .or_else(|e| {
                log::warn!("Ignoring data-settings: {}", e);
                Settings::for_canvas(None, width, height)
            })
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        if settings.seed.is_none() {
            settings = settings.with_seed(js_sys::Date::now() as u64);
        }
        Ok(settings)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&format!("logger init failed: {}", e)));
        }

        log::info!("Falling Blocks starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        let settings = load_settings(&canvas)?;
        let game = Rc::new(RefCell::new(Game {
            game_loop: GameLoop::new(settings),
            surface: CanvasSurface::new(ctx),
            frame_id: None,
        }));

        setup_input_handlers(&document, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Falling Blocks running!");
        Ok(())
    }

    fn setup_input_handlers(
        document: &web_sys::Document,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Key down: hold control keys, keep arrows/space from scrolling the page
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    if game.borrow_mut().game_loop.key_down(key) {
                        event.prevent_default();
                    }
                }
            });
            document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up: release, and restart after game over on "r"
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    let restarted = game.borrow_mut().game_loop.key_up(key);
                    if restarted {
                        log::info!("Restart requested");
                        resume(game.clone());
                    }
                }
            });
            document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Drop any pending frame, then schedule a fresh one
    fn resume(game: Rc<RefCell<Game>>) {
        let pending = game.borrow_mut().frame_id.take();
        if let (Some(id), Some(window)) = (pending, web_sys::window()) {
            if let Err(e) = window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("no window, cannot schedule frame");
            return;
        };
        let frame_game = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(frame_game, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().frame_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let control = {
            let mut g = game.borrow_mut();
            g.frame_id = None;
            let Game {
                game_loop, surface, ..
            } = &mut *g;
            game_loop.tick(time, surface)
        };

        if control == LoopControl::Continue {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use falling_blocks::renderer::RecordingSurface;
    use falling_blocks::{GameLoop, Key, Settings};

    env_logger::init();
    log::info!("Falling Blocks (native) starting...");
    log::info!("Native mode runs a headless session - run with `trunk serve` for the web version");

    let mut game = GameLoop::new(Settings::default().with_seed(rand::random()));
    let mut surface = RecordingSurface::new();

    let first = headless::run(&mut game, &mut surface, 1_000.0);
    println!(
        "Run 1 (seed {}): score {} after {} frames",
        game.session().seed(),
        game.session().player.score,
        first.frames
    );

    if game.key_up(Key::Restart) {
        let second = headless::run(&mut game, &mut surface, first.end_ms + 5_000.0);
        println!(
            "Run 2: score {} after {} frames",
            game.session().player.score,
            second.frames
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use falling_blocks::renderer::RecordingSurface;
    use falling_blocks::{GameLoop, Key, LoopControl};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Two minutes at 60 Hz
    const MAX_FRAMES: u32 = 60 * 120;
    /// Frames between direction changes of the scripted player
    const SWEEP_FRAMES: u32 = 45;

    pub struct RunSummary {
        pub frames: u32,
        pub end_ms: f64,
    }

    /// Drive ticks synchronously until the loop halts or the frame cap hits
    pub fn run(game: &mut GameLoop, surface: &mut RecordingSurface, start_ms: f64) -> RunSummary {
        let mut now = start_ms;
        let mut frames = 0;

        while frames < MAX_FRAMES {
            if frames % SWEEP_FRAMES == 0 {
                let leftward = (frames / SWEEP_FRAMES) % 2 == 0;
                let (hold, drop) = if leftward {
                    (Key::ArrowLeft, Key::ArrowRight)
                } else {
                    (Key::ArrowRight, Key::ArrowLeft)
                };
                game.key_up(drop);
                game.key_down(hold);
            }

            surface.clear();
            let control = game.tick(now, surface);
            frames += 1;
            if control == LoopControl::Halt {
                break;
            }
            now += FRAME_MS;
        }

        if frames >= MAX_FRAMES {
            log::info!("Frame cap reached with score {}", game.session().player.score);
        }

        RunSummary {
            frames,
            end_ms: now,
        }
    }
}
