//! Ant Smasher entry point
//!
//! Web: binds the DOM and drives the session from animation frames.
//! Native: plays one headless round with a scripted player.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::Element;

    use ant_smasher::consts::SETTINGS_KEY;
    use ant_smasher::persistence::{LocalStorage, MemoryStorage, Storage};
    use ant_smasher::platform::DomSurface;
    use ant_smasher::platform::web::ANT_ID_ATTR;
    use ant_smasher::sim::AntId;
    use ant_smasher::{Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session<DomSurface, Box<dyn Storage>>,
        /// Animation-frame timestamp that maps to virtual time zero
        origin: Option<f64>,
    }

    impl Game {
        /// Advance the session to the frame's timestamp
        fn update(&mut self, time: f64) {
            let origin = *self.origin.get_or_insert(time);
            let elapsed = (time - origin).max(0.0) as u64;
            self.session.advance_to(elapsed);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ant Smasher starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let storage: Box<dyn Storage> = match LocalStorage::open() {
            Some(storage) => Box::new(storage),
            None => {
                log::warn!("LocalStorage unavailable, best score will not persist");
                Box::new(MemoryStorage::new())
            }
        };
        let settings = Settings::load_or_default(&storage, SETTINGS_KEY);

        let Some(surface) = DomSurface::from_document(&document) else {
            log::error!("Game markup not found, not starting");
            return;
        };
        let screen = surface.screen().clone();

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(settings, surface, storage, seed),
            origin: None,
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_start_buttons(game.clone());
        setup_tap_handler(&screen, game.clone());

        request_animation_frame(game);
        log::info!("Ant Smasher running!");
    }

    /// "Start" and "Play again" share the same routine
    fn setup_start_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for id in ["start-button", "play-again-button"] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{} element", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().session.start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// One delegated listener for every ant, keyed by `data-ant-id`
    fn setup_tap_handler(screen: &web_sys::HtmlElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Some(ant) = target
                .closest(&format!("[{}]", ANT_ID_ATTR))
                .ok()
                .flatten()
            else {
                return;
            };
            let Some(id) = ant
                .get_attribute(ANT_ID_ATTR)
                .and_then(|v| v.parse::<AntId>().ok())
            else {
                return;
            };
            event.prevent_default();

            let outcome = game.borrow_mut().session.activate(id);
            log::debug!("Tap on ant {}: {:?}", id, outcome);
        });
        let _ = screen
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
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
        game.borrow_mut().update(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use ant_smasher::persistence::JsonFileStorage;
    use ant_smasher::platform::RecordingSurface;
    use ant_smasher::sim::{AntId, HitOutcome, SessionStatus};
    use ant_smasher::{Session, Settings};
    use glam::Vec2;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Ant Smasher (native) starting...");
    log::info!("Native mode plays a headless demo round - run with `trunk serve` for the web version");

    let settings = match std::env::var("ANT_SMASHER_CONFIG") {
        Ok(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Settings::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path, e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    };

    let storage = JsonFileStorage::open("ant_smasher_scores.json");
    log::info!("Best score file: {}", storage.path().display());
    let surface = RecordingSurface::new(Vec2::new(800.0, 600.0));
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let mut session = Session::new(settings, surface, storage, seed);
    log::info!("Best score so far: {}", session.best_score());
    session.start();

    // Scripted player: taps every other ant once it has walked for 1.5s
    while session.status() == SessionStatus::Running {
        session.advance_by(250);
        let now = session.now();
        let targets: Vec<AntId> = session
            .ants()
            .filter(|a| a.armed && a.id % 2 == 0 && now >= a.spawned_at + 1500)
            .map(|a| a.id)
            .collect();
        for id in targets {
            if session.activate(id) == HitOutcome::Scored {
                log::info!("{:>5}ms  smashed ant {:>2}  score {}", now, id, session.score());
            }
        }
    }

    let surface = session.surface();
    log::info!(
        "Final score {} (best {}), {} ants spawned",
        surface.final_text,
        surface.best_text,
        surface.added()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
