//! Browser front end: mounts the widget, wires input listeners and runs the
//! animation frame loop that drives the controller's deferred tasks.

use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::config::AppConfig;
use crate::controller::{Effect, InteractionController, Point};
use crate::error::AppError;
use crate::particles::ParticleField;

mod audio;
mod render;

use audio::Audio;
use render::{Dom, RenderCache};

/// Runtime widget state.
struct App {
    dom: Dom,
    cache: RenderCache,
    controller: InteractionController,
    particles: ParticleField,
    // separate stream so particle spawning does not perturb placement
    fx_rng: ChaCha8Rng,
    audio: Audio,
}

impl App {
    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Sound(cue) => self.audio.play(cue),
                Effect::Confetti(burst) => {
                    let (w, h) = self.dom.canvas_size();
                    self.particles.emit(&mut self.fx_rng, &burst, w, h);
                }
            }
        }
    }

    fn sync(&mut self) {
        if let Err(err) = render::render(&self.dom, &mut self.cache, &self.controller) {
            log::error!("render failed: {err:?}");
        }
    }

    fn decline(&mut self) {
        let container = self.dom.container_size();
        let effects = self.controller.register_decline(crate::performance_now(), container);
        self.apply(effects);
        self.sync();
    }

    fn accept(&mut self) {
        let effects = self.controller.accept(crate::performance_now());
        self.apply(effects);
        self.sync();
    }

    fn pointer(&mut self, x: f64, y: f64) {
        let moved = self.controller.pointer_moved(
            Point::new(x, y),
            self.dom.decline_center(),
            self.dom.container_size(),
        );
        if moved {
            self.sync();
        }
    }

    fn frame(&mut self, now: f64) {
        let effects = self.controller.tick(now);
        self.apply(effects);
        self.sync();
        if let Err(err) = render::paint_particles(&self.dom, &mut self.cache, &mut self.particles) {
            log::error!("confetti paint failed: {err:?}");
        }
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Run `f` against the mounted widget. Re-entrant calls are skipped.
fn with_app(f: impl FnOnce(&mut App)) {
    APP.with(|cell| {
        if let Ok(mut guard) = cell.try_borrow_mut() {
            if let Some(app) = guard.as_mut() {
                f(app);
            }
        }
    });
}

pub fn mount(config: AppConfig) -> Result<(), AppError> {
    config.validate()?;
    if APP.with(|cell| cell.borrow().is_some()) {
        return Err(AppError::AlreadyMounted);
    }
    let win = window().ok_or(AppError::NoWindow)?;
    let doc = win.document().ok_or(AppError::NoDocument)?;
    let body = doc.body().ok_or(AppError::NoBody)?;

    let seed = config.seed.unwrap_or_else(crate::entropy_seed);
    let controller = InteractionController::with_seed(&config, seed);
    let dom = Dom::build(&doc, &body, &config, &controller)?;

    let mut app = App {
        dom,
        cache: RenderCache::default(),
        controller,
        particles: ParticleField::default(),
        fx_rng: ChaCha8Rng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
        audio: Audio::default(),
    };
    app.sync();

    // Listeners first: a failure here leaves nothing mounted, so a retry can succeed.
    if let Err(err) = attach_listeners(&win, &app.dom) {
        app.dom.remove();
        return Err(err);
    }
    APP.with(|cell| cell.replace(Some(app)));

    start_frame_loop();
    info!("widget mounted (seed {seed:#x})");
    Ok(())
}

fn attach_listeners(win: &web_sys::Window, dom: &Dom) -> Result<(), AppError> {
    // Hovering, touching or clicking the decline control all count as a decline.
    for event in ["mouseenter", "touchstart", "click"] {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            with_app(App::decline);
        }) as Box<dyn FnMut(_)>);
        dom.decline_btn
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            with_app(App::accept);
        }) as Box<dyn FnMut(_)>);
        dom.accept_btn
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let (x, y) = (f64::from(evt.client_x()), f64::from(evt.client_y()));
            with_app(|app| app.pointer(x, y));
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(callback: &FrameCallback) {
    if let (Some(w), Some(cb)) = (window(), callback.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_app(|app| app.frame(ts));
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}
