//! Geometry for scattered images and the evasive decline control.
//!
//! Image positions are percentages of the viewport; decline offsets are pixel
//! translations relative to the control's resting place.

use rand::Rng;
use std::f64::consts::PI;

/// Safe band (percent) that keeps scattered images fully on screen.
pub const SAFE_MIN_PCT: f64 = 8.0;
pub const SAFE_MAX_PCT: f64 = 88.0;

const CENTER_PCT: f64 = 50.0;
const RADIUS_MIN_PCT: f64 = 40.0;
const RADIUS_SPREAD_PCT: f64 = 10.0;
/// Fraction of one angular slot used as jitter.
const ANGLE_JITTER: f64 = 0.2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An image placed around the question card.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatteredImage {
    pub source: String,
    /// Left/top in viewport percent.
    pub position: Point,
    pub rotation_deg: f64,
    pub scale: f64,
}

/// Image left behind by a decline attempt.
pub type DecoyImage = ScatteredImage;

/// Image revealed on acceptance, `reveal_delay_ms` after the celebration starts.
#[derive(Clone, Debug, PartialEq)]
pub struct CelebrationImage {
    pub image: ScatteredImage,
    pub reveal_delay_ms: f64,
}

pub fn clamp_to_safe_band(value: f64) -> f64 {
    if value.is_nan() {
        return CENTER_PCT;
    }
    value.clamp(SAFE_MIN_PCT, SAFE_MAX_PCT)
}

/// Position of slot `index` out of `slots`, spread evenly around the viewport centre.
pub fn angular_position<R: Rng + ?Sized>(rng: &mut R, index: usize, slots: usize) -> Point {
    let slots = slots.max(1);
    let step = 360.0 / slots as f64;
    let jitter = rng.gen_range(0.0..step * ANGLE_JITTER);
    let angle = (index as f64 * step + jitter) * PI / 180.0;
    let radius_x = RADIUS_MIN_PCT + rng.gen_range(0.0..RADIUS_SPREAD_PCT);
    let radius_y = RADIUS_MIN_PCT + rng.gen_range(0.0..RADIUS_SPREAD_PCT);
    Point {
        x: clamp_to_safe_band(CENTER_PCT + radius_x * angle.cos()),
        y: clamp_to_safe_band(CENTER_PCT + radius_y * angle.sin()),
    }
}

/// Place `source` in slot `index` with a slight random tilt and size.
pub fn scatter<R: Rng + ?Sized>(
    rng: &mut R,
    source: &str,
    index: usize,
    slots: usize,
) -> ScatteredImage {
    let position = angular_position(rng, index, slots);
    ScatteredImage {
        source: source.to_string(),
        position,
        rotation_deg: rng.gen_range(-20.0..20.0),
        scale: rng.gen_range(0.7..1.0),
    }
}

/// Random offset for the decline control, biased toward the container centre.
///
/// The usable half-extent on each axis is `(container - footprint) / 2 - margin`
/// (never negative); the offset spans half of that around zero. Returns `None`
/// when the container has no usable measurement.
pub fn relocation_offset<R: Rng + ?Sized>(
    rng: &mut R,
    container: Option<Size>,
    footprint: Size,
    margin: f64,
) -> Option<Point> {
    let container = container?;
    if !(container.width.is_finite() && container.height.is_finite())
        || container.width <= 0.0
        || container.height <= 0.0
    {
        return None;
    }
    let max_x = ((container.width - footprint.width) / 2.0 - margin).max(0.0);
    let max_y = ((container.height - footprint.height) / 2.0 - margin).max(0.0);
    Some(Point {
        x: (rng.gen_range(0.0..1.0) - 0.5) * max_x,
        y: (rng.gen_range(0.0..1.0) - 0.5) * max_y,
    })
}
