//! Randomized decorative elements: floating hearts, tears, falling hearts and burst origins.

use rand::Rng;

use super::effects::{CONFETTI_PALETTE, ConfettiBurst};
use super::placement::Point;
use crate::config::Tuning;

/// Heart drifting up behind the card for the whole session.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingHeart {
    pub left_pct: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub size_rem: f64,
    pub opacity: f64,
}

/// Tear streak shown while the guilt level is 4.
#[derive(Clone, Debug, PartialEq)]
pub struct Tear {
    pub left_pct: f64,
    pub delay_s: f64,
}

/// Heart raining down on the success screen.
#[derive(Clone, Debug, PartialEq)]
pub struct FallingHeart {
    pub left_pct: f64,
    pub delay_s: f64,
    pub duration_s: f64,
}

pub fn floating_hearts<R: Rng + ?Sized>(rng: &mut R, count: u32) -> Vec<FloatingHeart> {
    (0..count)
        .map(|_| FloatingHeart {
            left_pct: rng.gen_range(0.0..100.0),
            duration_s: rng.gen_range(8.0..16.0),
            delay_s: rng.gen_range(0.0..5.0),
            size_rem: rng.gen_range(1.5..3.5),
            opacity: rng.gen_range(0.1..0.4),
        })
        .collect()
}

pub fn tears<R: Rng + ?Sized>(rng: &mut R, count: u32) -> Vec<Tear> {
    (0..count)
        .map(|_| Tear {
            left_pct: rng.gen_range(0.0..100.0),
            delay_s: rng.gen_range(0.0..2.0),
        })
        .collect()
}

pub fn falling_hearts<R: Rng + ?Sized>(rng: &mut R, count: u32) -> Vec<FallingHeart> {
    (0..count)
        .map(|_| FallingHeart {
            left_pct: rng.gen_range(0.0..100.0),
            delay_s: rng.gen_range(0.0..3.0),
            duration_s: rng.gen_range(3.0..5.0),
        })
        .collect()
}

/// A burst from a random point in the upper part of the screen.
pub fn confetti_burst<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> ConfettiBurst {
    ConfettiBurst {
        particle_count: tuning.confetti_particles,
        spread_deg: tuning.confetti_spread_deg,
        start_velocity: tuning.confetti_start_velocity,
        origin: Point::new(rng.gen_range(0.1..0.9), rng.gen_range(-0.2..0.8)),
        palette: CONFETTI_PALETTE,
    }
}

/// Offsets (ms after acceptance) of the periodic bursts: every interval, strictly before the end.
pub fn burst_offsets(tuning: &Tuning) -> Vec<f64> {
    let interval = tuning.confetti_interval_ms;
    if interval <= 0.0 {
        return Vec::new();
    }
    (1..)
        .map(|k| k as f64 * interval)
        .take_while(|&t| t < tuning.confetti_duration_ms)
        .collect()
}
