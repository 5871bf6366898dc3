//! Glide Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use glide_snake::renderer::{SdfRenderState, scene};
    use glide_snake::sim::{Direction, GameState, GridSize, StepOutcome};
    use glide_snake::{FrameDriver, HighScore};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        driver: FrameDriver,
        high: HighScore,
        render_state: Option<SdfRenderState>,
    }

    impl Game {
        fn new(grid: GridSize, seed: u64) -> Self {
            let high = HighScore::load();
            let mut state = GameState::new(grid, seed);
            state.high_score = high.best;
            Self {
                state,
                driver: FrameDriver::new(0.0),
                high,
                render_state: None,
            }
        }

        /// One display frame: advance the driver, react to the report,
        /// rebuild the scene, render
        fn frame(&mut self, now_ms: f64) {
            let report = self.driver.frame(&mut self.state, now_ms);

            if let Some(outcome) = report.outcome {
                match outcome {
                    StepOutcome::Ate { new_high } => {
                        set_text("score", &self.state.score.to_string());
                        if new_high && self.high.record(self.state.score) {
                            set_text("highScore", &self.high.best.to_string());
                        }
                    }
                    StepOutcome::Died => {
                        log::info!("Run over at {} points", self.state.score);
                    }
                    StepOutcome::Moved => {}
                }
            }

            if report.entered_game_over {
                self.show_game_over();
            }

            let time_secs = (now_ms / 1000.0) as f32;
            let frame_scene = scene::build(&self.state, report.fraction, time_secs, report.shake);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&frame_scene, now_ms) {
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
        }

        /// Fill in and show the end-of-game summary
        fn show_game_over(&self) {
            set_text("finalScore", &self.state.score.to_string());
            set_text("popupHighScore", &self.high.best.to_string());
            set_class("gameOverPopup", "hidden", false);
            set_class("gameCanvas", "blur", true);
        }

        /// Rebuild the run from scratch and hide the end screen
        fn restart(&mut self, now_ms: f64) {
            let seed = js_sys::Date::now() as u64;
            self.driver.restart(&mut self.state, now_ms, seed);
            self.state.high_score = self.high.best;

            set_text("score", "0");
            set_class("gameOverPopup", "hidden", true);
            set_class("gameCanvas", "blur", false);

            log::info!("Game restarted with seed: {}", seed);
        }
    }

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(id: &str, class: &str, on: bool) {
        if let Some(el) = document().get_element_by_id(id) {
            let _ = if on {
                el.class_list().add_1(class)
            } else {
                el.class_list().remove_1(class)
            };
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Glide Snake starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Whole cells only; partial cells at the edges stay border
        let width = canvas.width();
        let height = canvas.height();
        let grid = GridSize::from_surface(width, height);
        log::info!("Playfield: {}x{} cells", grid.cols, grid.rows);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(grid, seed)));

        set_text("score", "0");
        set_text("highScore", &game.borrow().high.best.to_string());

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = SdfRenderState::new(surface, &adapter, width, height, grid).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());

        // The first callback arms the clocks with a scheduler timestamp,
        // then the loop proper takes over
        {
            let game = game.clone();
            let closure = Closure::once(move |time: f64| {
                game.borrow_mut().driver = FrameDriver::new(time);
                game_loop(game, time);
            });
            let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
            closure.forget();
        }

        log::info!("Glide Snake running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let requested = match event.key().as_str() {
                "ArrowUp" => Some(Direction::Up),
                "ArrowDown" => Some(Direction::Down),
                "ArrowLeft" => Some(Direction::Left),
                "ArrowRight" => Some(Direction::Right),
                _ => None,
            };
            if let Some(dir) = requested {
                game.borrow_mut().state.request_direction(dir);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        if let Some(btn) = document().get_element_by_id("popupRestartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let now = web_sys::window()
                    .and_then(|w| w.performance())
                    .map(|p| p.now())
                    .unwrap_or(0.0);
                game.borrow_mut().restart(now);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Glide Snake (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning headless demo...");
    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use glide_snake::FrameDriver;
    use glide_snake::sim::{GamePhase, GameState, GridSize};

    let mut state = GameState::new(GridSize::new(10, 10), 0xC0FFEE);
    let mut driver = FrameDriver::new(0.0);

    // Drive one frame per tick until the straight-line run hits the wall
    let mut now = 0.0;
    while state.phase == GamePhase::Running {
        now += state.step_duration;
        driver.frame(&mut state, now);
    }
    println!(
        "✓ Headless run ended after {:.0} ms with {} points",
        now, state.score
    );
}
