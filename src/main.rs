//! Storm Royale entry point
//!
//! Handles platform-specific initialization and runs the frame loop.
//! The web page provides `#gameCanvas`, the `#lobby`, `#game-container` and
//! `#creator-controls` panels, HUD spans `#playerCount`, `#stormRadius`,
//! `#playerWeapon`, `#playerHealth`, a `#banner`, and the buttons
//! `#start-btn`, `#reset-btn`, `#storm-btn`, `#spawn-weapon-btn`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use storm_royale::platform::dom;
    use storm_royale::renderer::{RenderState, scene};
    use storm_royale::sim::{
        Command, Direction, FrameSnapshot, RoundConfig, RoundController, StatusReadout,
    };
    use storm_royale::{PlatformError, Settings};

    /// Game instance holding all state
    struct Game {
        round: RoundController,
        render_state: Option<RenderState>,
        settings: Settings,
        /// A frame callback is scheduled
        looping: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                round: RoundController::new(RoundConfig::default(), seed),
                render_state: None,
                settings: Settings::load(),
                looping: false,
            }
        }
    }

    /// Render the current frame
    fn draw(render_state: &mut RenderState, frame: &FrameSnapshot, settings: &Settings, time: f64) {
        let vertices = scene::build(frame, settings, time);
        match render_state.render(&vertices) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => {
                render_state.resize(render_state.size.0, render_state.size.1);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    /// Update HUD elements in DOM
    fn update_hud(status: &StatusReadout) {
        dom::set_text("playerCount", &status.alive.to_string());
        dom::set_text("stormRadius", &status.storm_radius.to_string());
        dom::set_text("playerWeapon", &status.weapon);
        dom::set_text("playerHealth", &status.health.to_string());

        match status.banner() {
            Some(text) => {
                dom::set_text("banner", &text);
                dom::set_visible("banner", true);
            }
            None => dom::set_visible("banner", false),
        }
    }

    pub async fn run() -> Result<(), PlatformError> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }

        log::info!("Storm Royale starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Canvas matches the arena so vertices map 1:1 to pixels
        let arena = game.borrow().round.config().arena_size();
        let canvas: HtmlCanvasElement = dom::element_as("gameCanvas")?;
        let (width, height) = (arena.x as u32, arena.y as u32);
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| PlatformError::Gpu(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| PlatformError::Gpu(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, arena).await?;
        game.borrow_mut().render_state = Some(render_state);

        show_lobby();
        setup_input_handlers(game.clone());
        setup_buttons(game);

        log::info!("Storm Royale ready");
        Ok(())
    }

    fn show_lobby() {
        dom::set_visible("lobby", true);
        dom::set_visible("game-container", false);
        dom::set_visible("creator-controls", false);
        dom::set_visible("banner", false);
    }

    fn show_game() {
        dom::set_visible("lobby", false);
        dom::set_visible("game-container", true);
        dom::set_visible("creator-controls", true);
    }

    /// Schedule frames again if the loop stopped at the end of a round
    fn ensure_loop(game: &Rc<RefCell<Game>>) {
        let start = {
            let mut g = game.borrow_mut();
            let start = !g.looping && g.round.phase().is_running();
            g.looping |= start;
            start
        };
        if start {
            request_animation_frame(game.clone());
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let command = match event.key().as_str() {
                "ArrowUp" | "w" | "W" => Command::Move(Direction::Up),
                "ArrowDown" | "s" | "S" => Command::Move(Direction::Down),
                "ArrowLeft" | "a" | "A" => Command::Move(Direction::Left),
                "ArrowRight" | "d" | "D" => Command::Move(Direction::Right),
                " " => Command::Shoot,
                "m" | "M" => {
                    let mut g = game.borrow_mut();
                    g.settings.show_minimap = !g.settings.show_minimap;
                    g.settings.save();
                    return;
                }
                "h" | "H" => {
                    let mut g = game.borrow_mut();
                    g.settings.health_bars = !g.settings.health_bars;
                    g.settings.save();
                    return;
                }
                _ => return,
            };
            // Keep arrows and space from scrolling the page
            event.prevent_default();
            game.borrow_mut().round.apply(command);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        on_click("start-btn", game.clone(), |game| {
            game.borrow_mut().round.apply(Command::Start);
            show_game();
            ensure_loop(game);
        });
        on_click("reset-btn", game.clone(), |game| {
            game.borrow_mut().round.apply(Command::Reset);
            ensure_loop(game);
        });
        on_click("storm-btn", game.clone(), |game| {
            game.borrow_mut().round.apply(Command::ToggleStorm);
        });
        on_click("spawn-weapon-btn", game, |game| {
            game.borrow_mut().round.apply(Command::SpawnPickup);
        });
    }

    fn on_click(id: &str, game: Rc<RefCell<Game>>, handler: fn(&Rc<RefCell<Game>>)) {
        let btn = match dom::element(id) {
            Ok(btn) => btn,
            Err(e) => {
                log::warn!("{}", e);
                return;
            }
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler(&game));
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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
        let keep_running = {
            let mut g = game.borrow_mut();
            let Game {
                round,
                render_state,
                settings,
                looping,
            } = &mut *g;
            let keep_running = round.run_frame(|frame, status| {
                if let Some(render_state) = render_state.as_mut() {
                    draw(render_state, frame, settings, time);
                }
                update_hud(status);
            });
            *looping = keep_running;
            keep_running
        };

        if keep_running {
            request_animation_frame(game);
        } else {
            log::info!("Frame loop stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {}", e);
    }
}

/// Frame cap for the headless native round
#[cfg(not(target_arch = "wasm32"))]
const MAX_HEADLESS_FRAMES: u64 = 10_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use storm_royale::sim::{Command, RoundConfig, RoundController};

    env_logger::init();
    log::info!("Storm Royale (native) starting...");
    log::info!("Native mode runs a headless round - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    let mut round = RoundController::new(RoundConfig::default(), seed);
    round.apply(Command::Start);

    while round.run_frame(|_, _| {}) {
        if round.frame() >= MAX_HEADLESS_FRAMES {
            log::info!("Stopping after {} frames", round.frame());
            break;
        }
    }

    match serde_json::to_string_pretty(&round.status()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode status: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
