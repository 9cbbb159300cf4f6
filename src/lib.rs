//! Valentine Cat core crate.
//!
//! A single-page "will you be my Valentine?" widget. The decision logic lives
//! in [`controller`] and is plain Rust with no browser dependencies, so it runs
//! under native `cargo test`. The view layer behind [`start_app`] mounts the
//! page through `web-sys`, plays synthesized sounds and draws confetti.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod controller;
pub mod error;
mod logger;
pub mod particles;
mod view;

pub use config::{AppConfig, Tuning};
pub use controller::{InteractionController, InteractionState, Phase};
pub use error::{AppError, ConfigError};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

// -----------------------------------------------------------------------------
// Default image assets (served by the host page)
// -----------------------------------------------------------------------------

/// Shown one per decline attempt, cycling once exhausted.
pub const DECLINE_IMAGES: &[&str] = &[
    "/videos/no/cat-cat-sad.webp",
    "/videos/no/cat-cry-kitten-cry.webp",
    "/videos/no/cat.gif",
    "/videos/no/cat.webp",
    "/videos/no/crying-cat-sad-kitty.webp",
    "/videos/no/sad-cat-sad-cat-meme.gif",
    "/videos/no/the-voices.webp",
    "/videos/no/üzgünkedikuzeyefe.webp",
];

/// All shown together on acceptance.
pub const ACCEPT_IMAGES: &[&str] = &[
    "/videos/yes/6686ae04340f0125502a1fc08bf482da.jpg",
    "/videos/yes/6fd55f6c62ec634738588c42b21a47d7.jpg",
    "/videos/yes/cat-jump.webp",
    "/videos/yes/catto.gif",
    "/videos/yes/dancing-cat-cat.webp",
    "/videos/yes/goobers.gif",
    "/videos/yes/kitty-cat.gif",
];

pub const SUCCESS_IMAGE: &str = "/videos/side-eye-cat.gif";

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Mount the widget with the default configuration.
#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    start_with(AppConfig::default())
}

/// Mount the widget with a JSON configuration (any subset of `AppConfig` fields).
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_app_with_config(json: &str) -> Result<(), JsValue> {
    let config = AppConfig::from_json(json).map_err(AppError::from)?;
    start_with(config)
}

fn start_with(config: AppConfig) -> Result<(), JsValue> {
    let level = config.log_filter().map_err(AppError::from)?;
    logger::init(level);
    view::mount(config)?;
    Ok(())
}

fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Seed for cosmetic randomness when the host page does not pin one.
fn entropy_seed() -> u64 {
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 8];
        if getrandom::getrandom(&mut buf).is_ok() {
            return u64::from_le_bytes(buf);
        }
    }
    // Clock-derived fallback (not crypto secure)
    (performance_now() * 1_000.0) as u64 ^ 0x2545_F491_4F6C_DD1D
}
