//! Web Audio playback of the controller's sound cues.

use log::warn;
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

use crate::controller::effects::TAIL_GAIN;
use crate::controller::{Cue, Tone};

/// Lazily created audio context shared by every cue.
#[derive(Default)]
pub struct Audio {
    ctx: Option<AudioContext>,
}

impl Audio {
    /// Play a cue; failures are logged and otherwise ignored.
    pub fn play(&mut self, cue: Cue) {
        if let Err(err) = self.try_play(cue) {
            warn!("sound cue {cue:?} failed: {err:?}");
        }
    }

    fn try_play(&mut self, cue: Cue) -> Result<(), JsValue> {
        let ctx = self.context()?;
        // Autoplay policies start the context suspended until a user gesture.
        let _ = ctx.resume();
        let t0 = ctx.current_time();
        for tone in cue.tones() {
            play_tone(ctx, &tone, t0)?;
        }
        Ok(())
    }

    fn context(&mut self) -> Result<&AudioContext, JsValue> {
        if self.ctx.is_none() {
            self.ctx = Some(AudioContext::new()?);
        }
        self.ctx
            .as_ref()
            .ok_or_else(|| JsValue::from_str("no audio context"))
    }
}

fn play_tone(ctx: &AudioContext, tone: &Tone, t0: f64) -> Result<(), JsValue> {
    let osc = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;
    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;
    osc.set_type(OscillatorType::Sine);

    let start = t0 + tone.offset_s;
    let end = start + tone.duration_s;
    let freq = osc.frequency();
    freq.set_value_at_time(tone.start_hz, start)?;
    if tone.end_hz != tone.start_hz {
        freq.exponential_ramp_to_value_at_time(tone.end_hz, end)?;
    }
    let level = gain.gain();
    level.set_value_at_time(tone.peak_gain, start)?;
    level.exponential_ramp_to_value_at_time(TAIL_GAIN, end)?;

    osc.start_with_when(start)?;
    osc.stop_with_when(end)?;
    Ok(())
}
