//! Pong Duel entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use pong_duel::audio::{AudioBank, cue_for};
    use pong_duel::consts::*;
    use pong_duel::controller::{GameLoop, LoopPhase};
    use pong_duel::render::{self, CanvasPainter, Frame};
    use pong_duel::settings::Settings;
    use pong_duel::sim::DuelSim;

    /// One game session: the controller plus the platform pieces
    /// wrapped around it.
    struct Session {
        game: GameLoop<DuelSim>,
        audio: AudioBank,
        painter: CanvasPainter,
        /// Interval handle while the tick scheduler is running
        tick_handle: Option<i32>,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pong Duel starting...");

        let document = web_sys::window()
            .expect("no window")
            .document()
            .expect("no document");

        // One click, one session. Sessions are not resumable after the
        // match ends; clicking again builds a fresh one.
        let start_btn = document
            .get_element_by_id("start-game")
            .expect("no start button");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            log::info!("Starting game...");
            start_session();
        });
        start_btn
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .expect("failed to wire start button");
        closure.forget();
    }

    /// Build a session and kick off its loops.
    fn start_session() {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let session = Rc::new(RefCell::new(Session {
            game: GameLoop::new(DuelSim::new(seed)),
            audio: AudioBank::new(&settings),
            painter: CanvasPainter::new(&canvas),
            tick_handle: None,
        }));

        log::info!("Session initialized with seed: {}", seed);

        setup_key_handlers(session.clone());

        session.borrow().audio.play_music();
        start_ticking(&session);
        request_animation_frame(session);
    }

    fn setup_key_handlers(session: Rc<RefCell<Session>>) {
        let window = web_sys::window().expect("no window");

        {
            let session = session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                session.borrow_mut().game.key_down(&event.key());
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .expect("failed to wire keydown");
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                session.borrow_mut().game.key_up(&event.key());
            });
            window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())
                .expect("failed to wire keyup");
            closure.forget();
        }
    }

    /// Start the fixed-period tick scheduler.
    fn start_ticking(session: &Rc<RefCell<Session>>) {
        let window = web_sys::window().expect("no window");
        let tick_session = session.clone();
        let closure = Closure::<dyn FnMut()>::new(move || on_tick(&tick_session));
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                TICK_DELAY_MS,
            )
            .expect("failed to start tick scheduler");
        session.borrow_mut().tick_handle = Some(handle);
        closure.forget();
    }

    /// Stop the tick scheduler, if running.
    fn stop_ticking(session: &Rc<RefCell<Session>>) {
        if let Some(handle) = session.borrow_mut().tick_handle.take() {
            web_sys::window()
                .expect("no window")
                .clear_interval_with_handle(handle);
        }
    }

    fn on_tick(session: &Rc<RefCell<Session>>) {
        let outcome = {
            let mut s = session.borrow_mut();
            let outcome = s.game.tick();
            if let Some(cue) = cue_for(&outcome) {
                s.audio.play(cue);
            }
            outcome
        };

        match outcome.phase {
            LoopPhase::Playing => {}
            LoopPhase::Paused => {
                stop_ticking(session);
                session.borrow().audio.pause_music();
                schedule_resume(session.clone());
            }
            LoopPhase::Finished => {
                // Terminal: ticking and music stop for good
                stop_ticking(session);
                session.borrow().audio.pause_music();
            }
        }
    }

    /// One-shot timer that puts a paused session back in play.
    fn schedule_resume(session: Rc<RefCell<Session>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move || {
            {
                let mut s = session.borrow_mut();
                s.game.resume();
                s.audio.play_music();
            }
            start_ticking(&session);
        });
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                PAUSE_TIMEOUT_MS,
            )
            .expect("failed to schedule resume");
        closure.forget();
    }

    fn request_animation_frame(session: Rc<RefCell<Session>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| on_frame(session));
        window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .expect("failed to request animation frame");
        closure.forget();
    }

    fn on_frame(session: Rc<RefCell<Session>>) {
        let frame = {
            let s = session.borrow();
            render::compose(s.game.state(), s.game.phase())
        };
        session.borrow().painter.paint(&frame);

        // The game-over card stays up; no more frames after it
        if !matches!(frame, Frame::GameOver) {
            request_animation_frame(session);
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
    use pong_duel::controller::LoopPhase;
    use pong_duel::sim::DuelSim;

    env_logger::init();
    log::info!("Pong Duel (native) starting...");
    log::info!("Native mode has no canvas - running a headless demo session");

    let mut game = pong_duel::GameLoop::new(DuelSim::new(0xDEC0DE));
    let mut ticks: u64 = 0;
    while game.phase() != LoopPhase::Finished && ticks < 200_000 {
        let outcome = game.tick();
        if let Some(event) = outcome.event {
            log::debug!("tick {}: {:?}", ticks, event);
        }
        if outcome.phase == LoopPhase::Paused {
            // No timers headless; resume straight away
            game.resume();
        }
        ticks += 1;
    }

    let state = game.state();
    println!(
        "Demo over after {} ticks: P1 {} lives, P2 {} lives",
        ticks, state.p1_lives, state.p2_lives
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
