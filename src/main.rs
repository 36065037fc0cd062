//! Bullseye entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::WasmClosure;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use bullseye::audio::AudioManager;
    use bullseye::feedback::{Effect, Presenter, Sound, effect_style};
    use bullseye::renderer::CanvasRenderer;
    use bullseye::sim::{InputEvent, Nudge, SimState, Viewport};
    use bullseye::{
        Difficulty, FeedbackError, FrameRequest, FrameScheduler, Manifest, Settings,
    };

    /// Presenter backed by the page: CSS effect elements, Web Audio, location
    struct DomPresenter {
        audio: AudioManager,
    }

    impl Presenter for DomPresenter {
        fn play_effect(
            &mut self,
            effect: Effect,
            at: Vec2,
            magnitude: f32,
        ) -> Result<(), FeedbackError> {
            let missing = FeedbackError::MissingEffectTarget {
                effect: effect.name(),
            };
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or(missing.clone())?;
            let el: HtmlElement = document
                .query_selector(&format!(".effect-{}", effect.name()))
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into().ok())
                .ok_or(missing)?;

            let failed = |e: JsValue| FeedbackError::playback(effect.name(), format!("{:?}", e));
            let style = el.style();
            for (property, value) in effect_style(effect, at, magnitude) {
                style.set_property(property, &value).map_err(failed)?;
            }
            if let Effect::HitMessage(text) = effect {
                el.set_text_content(Some(text));
            }

            // Restart the CSS animation
            let classes = el.class_list();
            classes.remove_1("play").map_err(failed)?;
            let _ = el.offset_width();
            classes.add_1("play").map_err(failed)
        }

        fn play_sound(&mut self, sound: Sound) -> Result<(), FeedbackError> {
            self.audio.play(sound)
        }

        fn stop_sound(&mut self, sound: Sound) {
            self.audio.stop(sound);
        }

        fn navigate(&mut self, destination: &str, delay_ms: u32) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let destination = destination.to_string();
            let closure = Closure::once(move || {
                if let Some(window) = web_sys::window() {
                    if let Err(e) = window.location().set_href(&destination) {
                        log::error!("Navigation to {} failed: {:?}", destination, e);
                    }
                }
            });
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms as i32,
            );
            closure.forget();
        }
    }

    /// Game instance holding all state
    struct Game {
        scheduler: FrameScheduler,
        presenter: DomPresenter,
        renderer: Option<CanvasRenderer>,
    }

    impl Game {
        fn input(&mut self, event: InputEvent) {
            self.scheduler.input(event, &mut self.presenter);
        }

        /// One tick, then draw the result
        fn frame(&mut self) -> FrameRequest {
            let request = self.scheduler.frame(&mut self.presenter);
            if let Some(renderer) = &self.renderer {
                renderer.draw(self.scheduler.state());
            }
            request
        }
    }

    fn window_viewport(window: &web_sys::Window) -> Viewport {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        Viewport::new(w as f32, h as f32)
    }

    /// Client coordinates to canvas coordinates
    fn canvas_pos(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            client_x as f32 - rect.left() as f32,
            client_y as f32 - rect.top() as f32,
        )
    }

    /// Built-in manifest unless the page embeds one
    fn load_manifest(document: &web_sys::Document) -> Manifest {
        let Some(json) = document
            .get_element_by_id("targets-manifest")
            .and_then(|el| el.text_content())
        else {
            return Manifest::default();
        };

        match Manifest::from_json(&json) {
            Ok(manifest) if !manifest.is_empty() => {
                log::info!("Loaded {} targets from page manifest", manifest.len());
                manifest
            }
            Ok(_) => {
                log::warn!("Page manifest is empty, using built-in targets");
                Manifest::default()
            }
            Err(e) => {
                log::warn!("Invalid page manifest ({}), using built-in targets", e);
                Manifest::default()
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Bullseye starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let settings = Settings::from_query(&window.location().search().unwrap_or_default());
        let manifest = load_manifest(&document);
        let viewport = window_viewport(&window);

        let canvas: Option<HtmlCanvasElement> = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into().ok());
        let Some(canvas) = canvas else {
            log::error!("No #gameCanvas element - nothing to draw on");
            return;
        };

        let mut renderer = CanvasRenderer::new(canvas.clone());
        if let Some(renderer) = &renderer {
            renderer.resize(viewport.width as u32, viewport.height as u32);
        } else {
            log::error!("Canvas 2D context unavailable - running without rendering");
        }

        let seed = js_sys::Date::now() as u64;
        let state = SimState::new(seed, viewport, &manifest, settings.difficulty);
        if let Some(renderer) = renderer.as_mut() {
            renderer.load_icons(state.icon_sources());
        }
        log::info!(
            "Game initialized with seed {} ({} targets, {})",
            seed,
            manifest.len(),
            settings.difficulty.as_str()
        );

        let game = Rc::new(RefCell::new(Game {
            scheduler: FrameScheduler::new(state),
            presenter: DomPresenter {
                audio: AudioManager::new(&settings),
            },
            renderer,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_window_handlers(game.clone());
        setup_difficulty_menu(&document, game.clone(), settings.difficulty);

        request_animation_frame(game);

        log::info!("Bullseye running!");
    }

    /// Attach a listener for the lifetime of the page
    fn listen<T>(target: &web_sys::EventTarget, event: &str, closure: Closure<T>)
    where
        T: ?Sized + WasmClosure,
    {
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            listen(canvas, "mousedown", Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = canvas_pos(&canvas_clone, event.client_x(), event.client_y());
                game.borrow_mut().input(InputEvent::PointerDown(pos));
            }));
        }
        {
            let game = game.clone();
            listen(canvas, "mouseup", Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input(InputEvent::PointerUp);
            }));
        }
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            listen(canvas, "mousemove", Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = canvas_pos(&canvas_clone, event.client_x(), event.client_y());
                game.borrow_mut().input(InputEvent::PointerMove(pos));
            }));
        }

        // Touch
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            listen(canvas, "touchstart", Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = canvas_pos(&canvas_clone, touch.client_x(), touch.client_y());
                    game.borrow_mut().input(InputEvent::TouchStart(pos));
                }
            }));
        }
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            listen(canvas, "touchmove", Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = canvas_pos(&canvas_clone, touch.client_x(), touch.client_y());
                    game.borrow_mut().input(InputEvent::TouchMove(pos));
                }
            }));
        }
        {
            let game = game.clone();
            listen(canvas, "touchend", Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().input(InputEvent::TouchEnd);
            }));
        }

        // Keyboard
        let Some(window) = web_sys::window() else {
            return;
        };
        listen(&window, "keydown", Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let nudge = match event.key().as_str() {
                "ArrowLeft" => Nudge::Left,
                "ArrowRight" => Nudge::Right,
                _ => return,
            };
            game.borrow_mut().input(InputEvent::Key(nudge));
        }));
    }

    fn setup_window_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Resize: new play area, bow recentred
        {
            let game = game.clone();
            listen(&window, "resize", Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let viewport = window_viewport(&window);
                let mut g = game.borrow_mut();
                if let Some(renderer) = &g.renderer {
                    renderer.resize(viewport.width as u32, viewport.height as u32);
                }
                g.input(InputEvent::Resize(viewport));
            }));
        }

        // Page going away: stop the loop
        listen(&window, "pagehide", Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().scheduler.terminate();
        }));
    }

    fn setup_difficulty_menu(
        document: &web_sys::Document,
        game: Rc<RefCell<Game>>,
        initial: Difficulty,
    ) {
        update_difficulty_label(document, initial);

        let Ok(options) = document.query_selector_all("[data-difficulty]") else {
            return;
        };
        for i in 0..options.length() {
            let Some(node) = options.item(i) else {
                continue;
            };
            let Ok(el) = node.dyn_into::<web_sys::Element>() else {
                continue;
            };
            let Some(difficulty) = el
                .get_attribute("data-difficulty")
                .and_then(|name| Difficulty::from_str(&name))
            else {
                log::warn!("Difficulty option with unknown tier");
                continue;
            };

            let game = game.clone();
            listen(&el, "click", Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input(InputEvent::SetDifficulty(difficulty));
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    update_difficulty_label(&document, difficulty);
                }
            }));
        }
    }

    fn update_difficulty_label(document: &web_sys::Document, difficulty: Difficulty) {
        if let Some(el) = document.get_element_by_id("difficultyCurrent") {
            el.set_text_content(Some(&format!("Difficulty: {} ▼", difficulty.as_str())));
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
        let request = game.borrow_mut().frame();
        if request == FrameRequest::Next {
            request_animation_frame(game);
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
    env_logger::init();
    log::info!("Bullseye (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in a browser");

    demo_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted shot at the first target, logging every cue
#[cfg(not(target_arch = "wasm32"))]
fn demo_session() {
    use bullseye::feedback::LogPresenter;
    use bullseye::sim::{InputEvent, SimState, Viewport};
    use bullseye::{FrameScheduler, Manifest, Settings};

    let settings = Settings::from_query(&std::env::args().nth(1).unwrap_or_default());
    let manifest = Manifest::default();
    let viewport = Viewport::new(1280.0, 800.0);
    let mut scheduler =
        FrameScheduler::new(SimState::new(2024, viewport, &manifest, settings.difficulty));
    let mut presenter = LogPresenter::default();

    scheduler.input(InputEvent::PointerDown(glam::Vec2::ZERO), &mut presenter);

    // Hold the draw while tracking the first target, then release
    for frame in 0..600 {
        let aim = scheduler.state().targets[0].center();
        scheduler.input(InputEvent::PointerMove(aim), &mut presenter);
        if frame == 40 {
            scheduler.input(InputEvent::PointerUp, &mut presenter);
        }
        scheduler.frame(&mut presenter);

        if !presenter.navigations.is_empty() {
            log::info!("Session over after {} ticks", scheduler.state().time_ticks);
            scheduler.terminate();
            return;
        }
        if frame > 40 && scheduler.state().projectiles.is_empty() {
            // Missed; draw again
            scheduler.input(InputEvent::PointerDown(aim), &mut presenter);
            for _ in 0..20 {
                scheduler.frame(&mut presenter);
            }
            scheduler.input(InputEvent::PointerUp, &mut presenter);
        }
    }

    log::info!("No hit after 600 frames");
}
