// Integration tests (native) for the `valentine-cat` crate.
// These tests avoid wasm-specific functionality and drive the interaction
// controller through its public API so they run under `cargo test` on the host.

use valentine_cat::controller::{Cue, Effect, Size, guilt_level};
use valentine_cat::{AppConfig, InteractionController, Phase};

const CONTAINER: Option<Size> = Some(Size {
    width: 1024.0,
    height: 768.0,
});

fn seeded(seed: u64) -> InteractionController {
    InteractionController::with_seed(&AppConfig::default(), seed)
}

// Accept right away: full celebration, no decoys.
#[test]
fn immediate_accept_shows_every_celebration_image() {
    let mut c = seeded(1);
    c.accept(0.0);
    assert_eq!(c.phase(), Phase::Accepted);
    assert_eq!(c.celebration().len(), valentine_cat::ACCEPT_IMAGES.len());
    assert!(c.decoys().is_empty());
    assert_eq!(c.attempt_count(), 0);
}

// Sixteen declines hide the control after the delay, the nineteenth gives up.
#[test]
fn sixteen_declines_hide_then_nineteenth_accepts() {
    let mut c = seeded(2);
    let mut now = 0.0;
    for _ in 0..16 {
        c.register_decline(now, CONTAINER);
        now += 100.0;
    }
    assert_eq!(c.guilt_level(), 5);
    assert_eq!(c.phase(), Phase::Vanishing);
    // 16th decline happened at 1500ms, hide is due 500ms later
    c.tick(1_999.0);
    assert!(c.decline_visible());
    c.tick(2_000.0);
    assert_eq!(c.phase(), Phase::Hidden);

    c.register_decline(2_100.0, CONTAINER);
    c.register_decline(2_200.0, CONTAINER);
    assert!(!c.is_accepted());
    let effects = c.register_decline(2_300.0, CONTAINER);
    assert!(c.is_accepted());
    assert!(effects.contains(&Effect::Sound(Cue::Celebrate)));
}

#[test]
fn decoy_count_tracks_attempts_until_acceptance() {
    let mut c = seeded(3);
    for n in 1..=12u32 {
        c.register_decline(f64::from(n), CONTAINER);
        assert_eq!(c.decoys().len(), n as usize);
        assert_eq!(c.guilt_level(), guilt_level(n));
    }
    c.accept(100.0);
    assert!(c.decoys().is_empty());
    for _ in 0..5 {
        c.register_decline(200.0, CONTAINER);
    }
    assert!(c.decoys().is_empty());
    assert!(c.is_accepted());
}

#[test]
fn accept_button_grows_and_caps() {
    let mut c = seeded(4);
    for n in 1..=18u32 {
        c.register_decline(f64::from(n), CONTAINER);
        let expected = (1.0 + 0.05 * f64::from(n)).min(2.0);
        assert!((c.accept_scale() - expected).abs() < 1e-9);
    }
}

// Message from attempt k is replaced at k+1; k's expiry must not clear k+1's text.
#[test]
fn superseded_message_clear_is_ignored() {
    let mut c = seeded(5);
    c.register_decline(0.0, CONTAINER);
    let first = c.message().unwrap().generation;
    c.register_decline(500.0, CONTAINER);
    let second = c.message().cloned().unwrap();
    assert_ne!(first, second.generation);

    c.tick(2_000.0);
    assert_eq!(c.message(), Some(&second));
    c.tick(2_500.0);
    assert!(c.message().is_none());
}

#[test]
fn positions_stay_on_screen_for_many_seeds() {
    for seed in 0..32 {
        let mut c = seeded(seed);
        for n in 0..20 {
            c.register_decline(f64::from(n), CONTAINER);
            for d in c.decoys() {
                assert!((8.0..=88.0).contains(&d.position.x));
                assert!((8.0..=88.0).contains(&d.position.y));
            }
        }
        for img in c.celebration() {
            assert!((8.0..=88.0).contains(&img.image.position.x));
            assert!((8.0..=88.0).contains(&img.image.position.y));
        }
    }
}

#[test]
fn same_seed_same_story() {
    let mut a = seeded(77);
    let mut b = seeded(77);
    for n in 0..10 {
        a.register_decline(f64::from(n), CONTAINER);
        b.register_decline(f64::from(n), CONTAINER);
    }
    assert_eq!(a.decoys(), b.decoys());
    assert_eq!(a.state(), b.state());
    assert_eq!(a.message(), b.message());
}

#[cfg(feature = "serde_json")]
#[test]
fn json_config_without_decline_images_is_rejected() {
    let err = AppConfig::from_json(r#"{ "decline_images": [] }"#).unwrap_err();
    assert_eq!(err.to_string(), "`decline_images` must list at least one image");
}
