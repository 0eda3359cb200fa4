//! Lane Beat entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use lane_beat::audio::{AudioManager, SoundEffect};
    use lane_beat::consts::*;
    use lane_beat::platform::device::query_output_devices;
    use lane_beat::platform::{
        Command, OutputCapability, SessionClock, command_allowed, key_command, key_to_direction,
        music_allowed,
    };
    use lane_beat::renderer::CanvasRenderer;
    use lane_beat::settings::Settings;
    use lane_beat::sim::{Direction, GamePhase, GameState, handle_input, tick};

    /// Game instance holding all session state
    struct Game {
        state: GameState,
        settings: Settings,
        clock: SessionClock,
        renderer: CanvasRenderer,
        audio: AudioManager,
        output: OutputCapability,
        /// Lit lane buttons
        active: [bool; LANE_COUNT],
        /// Pending button-reset timeouts, per lane
        flash_timers: [Option<i32>; LANE_COUNT],
        /// Outstanding animation frame request
        frame_handle: Option<i32>,
    }

    impl Game {
        fn new(settings: Settings, renderer: CanvasRenderer) -> Self {
            Self {
                state: GameState::new(settings.difficulty, settings.rules()),
                audio: AudioManager::new(&settings),
                settings,
                clock: SessionClock::new(),
                renderer,
                output: OutputCapability::Unknown,
                active: [false; LANE_COUNT],
                flash_timers: [None; LANE_COUNT],
                frame_handle: None,
            }
        }

        /// Render at the current session time
        fn render(&self) {
            let now = self.clock.now(host_now());
            self.renderer.render(&self.state, now, &self.active);
        }

        /// Start or stop music to match phase and output device
        fn sync_music(&mut self) {
            let wanted = self.state.is_playing()
                && music_allowed(self.output, self.settings.require_headphones);
            if wanted && !self.audio.music_playing() {
                self.audio.start_music();
            } else if !wanted && self.audio.music_playing() {
                self.audio.stop_music();
            }
        }

        /// Drop all pending button resets
        fn clear_flash_timers(&mut self) {
            if let Some(window) = web_sys::window() {
                for handle in self.flash_timers.iter_mut().filter_map(Option::take) {
                    window.clear_timeout_with_handle(handle);
                }
            }
            self.active = [false; LANE_COUNT];
        }
    }

    fn host_now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Lane Beat starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        // Create / reuse the playfield canvas
        let canvas: HtmlCanvasElement = match document.get_element_by_id("canvas") {
            Some(el) => el.dyn_into()?,
            None => {
                let c: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
                c.set_id("canvas");
                document
                    .body()
                    .ok_or_else(|| JsValue::from_str("no body"))?
                    .append_child(&c)?;
                c
            }
        };

        let settings = Settings::load();
        let renderer = CanvasRenderer::new(canvas.clone())?;
        let game = Rc::new(RefCell::new(Game::new(settings, renderer)));
        game.borrow().render();

        setup_input_handlers(game.clone(), &canvas)?;
        setup_auto_pause(game.clone())?;
        setup_device_watch(game.clone())?;

        log::info!("Lane Beat ready");
        Ok(())
    }

    fn start_session(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.clear_flash_timers();
            g.state.start();
            g.clock.start(host_now());
            g.audio.resume();
            g.audio.play(SoundEffect::Start);
            g.sync_music();
            log::info!("Session started ({})", g.state.difficulty.as_str());
        }
        let running = game.borrow().frame_handle.is_some();
        if !running {
            request_animation_frame(game.clone());
        }
    }

    fn finish_session(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        g.state.finish();
        if let Some(handle) = g.frame_handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
        g.clear_flash_timers();
        g.sync_music();
        g.audio.set_muted(false);

        match serde_json::to_string(&g.state.stats) {
            Ok(json) => log::info!("Session finished: {}", json),
            Err(e) => log::warn!("Session finished (stats unavailable: {})", e),
        }
        g.render();
    }

    fn toggle_pause(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        let host = host_now();
        g.state.toggle_pause();
        match g.state.phase {
            GamePhase::Paused => {
                g.clock.pause(host);
                g.audio.set_muted(true);
                log::info!("Paused");
            }
            GamePhase::Playing => {
                g.clock.resume(host);
                g.audio.set_muted(false);
                log::info!("Resumed");
            }
            _ => {}
        }
        g.render();
    }

    fn press_lane(game: &Rc<RefCell<Game>>, direction: Direction) {
        let mut g = game.borrow_mut();
        if !g.state.is_playing() {
            return;
        }
        let now = g.clock.now(host_now());
        let (judgement, events) = handle_input(&mut g.state, direction, now);
        log::debug!("{} at {:.1}ms: {}", direction.as_str(), now, judgement.as_str());
        g.audio.play_events(&events);

        // Light the button, then reset it after FLASH_MS
        let lane = direction.lane();
        g.active[lane] = true;
        let Some(window) = web_sys::window() else { return };
        if let Some(old) = g.flash_timers[lane].take() {
            window.clear_timeout_with_handle(old);
        }
        let game_ref = game.clone();
        let reset = Closure::once_into_js(move || {
            let mut g = game_ref.borrow_mut();
            g.active[lane] = false;
            g.flash_timers[lane] = None;
        });
        g.flash_timers[lane] = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                reset.unchecked_ref(),
                FLASH_MS,
            )
            .ok();
    }

    /// Run a control command if the current phase allows it
    fn run_command(game: &Rc<RefCell<Game>>, command: Command) -> bool {
        let phase = game.borrow().state.phase;
        if !command_allowed(command, phase) {
            return false;
        }
        match command {
            Command::Start => start_session(game),
            Command::Pause => toggle_pause(game),
            Command::Quit => finish_session(game),
        }
        true
    }

    fn setup_input_handlers(
        game: Rc<RefCell<Game>>,
        canvas: &HtmlCanvasElement,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Keyboard: lanes and control commands
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key();
                if let Some(direction) = key_to_direction(&key) {
                    event.prevent_default();
                    press_lane(&game, direction);
                    return;
                }

                if let Some(command) = key_command(&key) {
                    if run_command(&game, command) && command == Command::Start {
                        event.prevent_default();
                    }
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click on the playfield starts from the start / results prompt
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                run_command(&game, Command::Start);
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let should_pause = |game: &Rc<RefCell<Game>>| {
            let g = game.borrow();
            g.settings.pause_on_blur && g.state.is_playing()
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden
                    && should_pause(&game)
                {
                    toggle_pause(&game);
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                if should_pause(&game) {
                    toggle_pause(&game);
                    log::info!("Auto-paused (window blur)");
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Query audio outputs now, on device changes and on window focus
    fn setup_device_watch(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        refresh_output(game.clone());

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        if let Ok(devices) = window.navigator().media_devices() {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                refresh_output(game.clone());
            });
            devices
                .add_event_listener_with_callback("devicechange", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            refresh_output(game.clone());
        });
        window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }

    fn refresh_output(game: Rc<RefCell<Game>>) {
        wasm_bindgen_futures::spawn_local(async move {
            let capability = query_output_devices().await;
            let mut g = game.borrow_mut();
            g.output = capability;
            g.sync_music();
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let game_ref = game.clone();
        let callback = Closure::once_into_js(move |time: f64| {
            game_loop(game_ref, time);
        });
        let handle = window
            .request_animation_frame(callback.unchecked_ref())
            .ok();
        game.borrow_mut().frame_handle = handle;
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();
            g.frame_handle = None;

            // Phase is read live each frame; a finished session stops here
            match g.state.phase {
                GamePhase::Playing => {
                    let now = g.clock.now(time);
                    let events = tick(&mut g.state, now);
                    g.audio.play_events(&events);
                    g.renderer.render(&g.state, now, &g.active);
                    true
                }
                GamePhase::Paused => true,
                GamePhase::Ready | GamePhase::Finished => false,
            }
        };

        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lane Beat (native) starting...");
    log::info!("The playable version runs in the browser - run with `trunk serve`");

    let settings = lane_beat::Settings::load();
    demo::run(&settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless autoplay: drives the simulation at 60 Hz with a scripted player
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use lane_beat::Settings;
    use lane_beat::sim::{GameEvent, GameState, PATTERNS, handle_input, tick};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const CYCLES: usize = 2;

    /// Planned press offset for a note, or None to let it expire
    fn press_offset(id: u64, window: f64) -> Option<f64> {
        match id % 7 {
            0 => None,
            3 | 5 => Some(window * 0.7),
            _ => Some(5.0),
        }
    }

    pub fn run(settings: &Settings) {
        let mut state = GameState::new(settings.difficulty, settings.rules());
        state.start();
        let profile = state.profile();
        let window = profile.judgment_window_ms;
        let end = (PATTERNS.len() * CYCLES) as f64 * profile.pattern_interval_ms;

        let mut frame = 0u64;
        loop {
            let now = frame as f64 * FRAME_MS;
            if now > end {
                break;
            }
            for event in tick(&mut state, now) {
                log_event(&event);
            }

            let due: Vec<_> = state
                .notes
                .iter()
                .filter(|n| n.is_pending())
                .filter(|n| press_offset(n.id, window).is_some_and(|o| now >= n.time + o))
                .map(|n| n.direction)
                .collect();
            for direction in due {
                let (_, events) = handle_input(&mut state, direction, now);
                events.iter().for_each(log_event);
            }
            frame += 1;
        }
        state.finish();

        match serde_json::to_string_pretty(&state.stats) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialize stats: {}", e),
        }
        println!("Accuracy: {:.1}%", state.stats.accuracy());
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::PatternEmitted { pattern_index, at } => {
                log::info!("pattern {} at {:.0}ms", pattern_index, at)
            }
            GameEvent::NoteJudged {
                direction,
                judgement,
                offset_ms,
                ..
            } => log::info!(
                "{:>5} {:<7} {:+.1}ms",
                direction.as_str(),
                judgement.as_str(),
                offset_ms
            ),
            GameEvent::NoteMissed { direction, .. } => {
                log::info!("{:>5} missed", direction.as_str())
            }
            GameEvent::ComboMilestone { combo } => log::info!("combo {}!", combo),
            other => log::debug!("{:?}", other),
        }
    }
}
