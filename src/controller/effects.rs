//! Side effects the controller asks the view to perform.

use super::placement::Point;

/// Fire-and-forget request emitted by a controller operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Sound(Cue),
    Confetti(ConfettiBurst),
}

/// Synthesized sound cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    /// Single descending tone on a decline.
    Decline,
    /// Four-note ascending chime on acceptance.
    Celebrate,
}

/// One oscillator note, times relative to when the cue is played.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub start_hz: f32,
    pub end_hz: f32,
    pub offset_s: f64,
    pub duration_s: f64,
    pub peak_gain: f32,
}

/// Gain every note decays to before it stops.
pub const TAIL_GAIN: f32 = 0.01;

const CHIME_NOTES_HZ: [f32; 4] = [523.25, 659.25, 783.99, 1046.50];
const CHIME_SPACING_S: f64 = 0.15;

impl Cue {
    pub fn tones(self) -> Vec<Tone> {
        match self {
            Cue::Decline => vec![Tone {
                start_hz: 200.0,
                end_hz: 150.0,
                offset_s: 0.0,
                duration_s: 0.5,
                peak_gain: 0.3,
            }],
            Cue::Celebrate => CHIME_NOTES_HZ
                .iter()
                .enumerate()
                .map(|(i, &hz)| Tone {
                    start_hz: hz,
                    end_hz: hz,
                    offset_s: i as f64 * CHIME_SPACING_S,
                    duration_s: 0.3,
                    peak_gain: 0.2,
                })
                .collect(),
        }
    }
}

pub const CONFETTI_PALETTE: &[&str] = &["#ff4d94", "#ff85c0", "#e0b3ff", "#b366ff", "#ff6b6b"];

/// Parameters of one confetti burst. Origin is normalized to the viewport (0..1).
#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiBurst {
    pub particle_count: u32,
    pub spread_deg: f64,
    pub start_velocity: f64,
    pub origin: Point,
    pub palette: &'static [&'static str],
}
