//! Confetti particle field.
//!
//! Bursts spawn paper-like particles that fly out from an origin, slow down,
//! fall under gravity, wobble and fade over a fixed number of frames. The field
//! is advanced once per animation frame and drawn by the view.

use rand::Rng;
use std::f64::consts::PI;

use crate::controller::ConfettiBurst;

const TOTAL_TICKS: u32 = 200;
const DECAY: f64 = 0.9;
const GRAVITY: f64 = 3.0;
/// Launch direction (straight up) before spread is applied.
const LAUNCH_ANGLE: f64 = PI / 2.0;
const PARTICLE_SIZE: f64 = 10.0;

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    velocity: f64,
    angle: f64,
    wobble: f64,
    wobble_speed: f64,
    tilt_angle: f64,
    pub color: &'static str,
    tick: u32,
}

impl Particle {
    fn spawn<R: Rng + ?Sized>(rng: &mut R, burst: &ConfettiBurst, x: f64, y: f64) -> Self {
        let spread = burst.spread_deg.to_radians();
        let color = if burst.palette.is_empty() {
            "#ffffff"
        } else {
            burst.palette[rng.gen_range(0..burst.palette.len())]
        };
        Particle {
            x,
            y,
            velocity: burst.start_velocity * 0.5 + rng.gen_range(0.0..1.0) * burst.start_velocity,
            angle: -LAUNCH_ANGLE + (0.5 * spread - rng.gen_range(0.0..1.0) * spread),
            wobble: rng.gen_range(0.0..10.0),
            wobble_speed: (rng.gen_range(0.0..0.1) + 0.05f64).min(0.11),
            tilt_angle: rng.gen_range(0.25..0.75) * PI,
            color,
            tick: 0,
        }
    }

    fn advance(&mut self) {
        self.x += self.angle.cos() * self.velocity;
        self.y += self.angle.sin() * self.velocity + GRAVITY;
        self.velocity *= DECAY;
        self.wobble += self.wobble_speed;
        self.tilt_angle += 0.1;
        self.tick += 1;
    }

    pub fn alive(&self) -> bool {
        self.tick < TOTAL_TICKS
    }

    /// Opacity, fading linearly over the particle's lifetime.
    pub fn alpha(&self) -> f64 {
        1.0 - f64::from(self.tick) / f64::from(TOTAL_TICKS)
    }

    /// Quad corners for drawing, wobbling around the particle position.
    pub fn corners(&self) -> [(f64, f64); 4] {
        let wx = self.x + PARTICLE_SIZE * self.wobble.cos();
        let wy = self.y + PARTICLE_SIZE * self.wobble.sin();
        let tilt_sin = self.tilt_angle.sin();
        let tilt_cos = self.tilt_angle.cos();
        let x1 = self.x + tilt_cos * PARTICLE_SIZE;
        let y1 = self.y + tilt_sin * PARTICLE_SIZE;
        let x2 = wx + tilt_cos * PARTICLE_SIZE;
        let y2 = wy + tilt_sin * PARTICLE_SIZE;
        [(self.x, self.y), (x1, y1), (x2, y2), (wx, wy)]
    }
}

#[derive(Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Spawn a burst on a surface of `width` x `height` pixels.
    pub fn emit<R: Rng + ?Sized>(&mut self, rng: &mut R, burst: &ConfettiBurst, width: f64, height: f64) {
        let x = burst.origin.x * width;
        let y = burst.origin.y * height;
        self.particles.extend((0..burst.particle_count).map(|_| Particle::spawn(rng, burst, x, y)));
    }

    /// Advance one frame and drop expired particles.
    pub fn advance(&mut self) {
        for p in &mut self.particles {
            p.advance();
        }
        self.particles.retain(Particle::alive);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
