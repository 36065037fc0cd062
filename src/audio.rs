//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no audio files to load.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::error::FeedbackError;
use crate::feedback::Sound;
use crate::settings::{Difficulty, Settings};

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Master x sfx
    volume: f32,
    pull_volume: f32,
    /// Running bow-draw loop
    pull_loop: Option<(OscillatorNode, GainNode)>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effect_volume(),
            pull_volume: settings.pull_volume,
            pull_loop: None,
        }
    }

    /// The context, resumed if the browser suspended it before the first gesture
    fn context(&self, cue: &'static str) -> Result<&AudioContext, FeedbackError> {
        let ctx = self
            .ctx
            .as_ref()
            .ok_or_else(|| FeedbackError::playback(cue, "no AudioContext"))?;
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Ok(ctx)
    }

    /// Play a sound; `Sound::Pull` starts the draw loop
    pub fn play(&mut self, sound: Sound) -> Result<(), FeedbackError> {
        let vol = self.volume;
        if vol <= 0.0 {
            return Ok(());
        }

        if sound == Sound::Pull {
            return self.start_pull_loop();
        }

        let ctx = self.context(sound.name())?;
        let played = match sound {
            Sound::Shoot => play_shoot(ctx, vol),
            Sound::Hit => play_hit(ctx, vol),
            Sound::Miss => play_miss(ctx, vol),
            Sound::Difficulty(d) => play_difficulty(ctx, vol, d),
            Sound::Pull => Some(()),
        };
        played.ok_or_else(|| FeedbackError::playback(sound.name(), "oscillator setup failed"))
    }

    /// Stop a looping sound
    pub fn stop(&mut self, sound: Sound) {
        if sound != Sound::Pull {
            return;
        }
        if let Some((osc, gain)) = self.pull_loop.take() {
            if let Some(ctx) = &self.ctx {
                let t = ctx.current_time();
                gain.gain().set_value_at_time(gain.gain().value(), t).ok();
                gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.05).ok();
                osc.stop_with_when(t + 0.06).ok();
            } else {
                osc.stop().ok();
            }
        }
    }

    /// Low wobbling creak held while the bow is drawn
    fn start_pull_loop(&mut self) -> Result<(), FeedbackError> {
        if self.pull_loop.is_some() {
            return Ok(());
        }
        let vol = self.volume * self.pull_volume;
        let ctx = self.context("pull")?;

        let (osc, gain) = create_osc(ctx, 90.0, OscillatorType::Sawtooth)
            .ok_or_else(|| FeedbackError::playback("pull", "oscillator setup failed"))?;
        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain().linear_ramp_to_value_at_time(vol * 0.2, t + 0.1).ok();
        // Slow rise in pitch as the string tightens
        osc.frequency().set_value_at_time(90.0, t).ok();
        osc.frequency().linear_ramp_to_value_at_time(160.0, t + 1.3).ok();
        osc.start()
            .map_err(|e| FeedbackError::playback("pull", format!("{:?}", e)))?;

        self.pull_loop = Some((osc, gain));
        Ok(())
    }
}

// === Sound generators ===

/// Create an oscillator routed through a gain node to the speakers
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

/// Bow release - quick twang dropping in pitch
fn play_shoot(ctx: &AudioContext, vol: f32) -> Option<()> {
    let (osc, gain) = create_osc(ctx, 520.0, OscillatorType::Triangle)?;
    let t = ctx.current_time();

    gain.gain().set_value_at_time(vol * 0.4, t).ok();
    gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.18).ok();
    osc.frequency().set_value_at_time(520.0, t).ok();
    osc.frequency().exponential_ramp_to_value_at_time(140.0, t + 0.15).ok();

    osc.start().ok()?;
    osc.stop_with_when(t + 0.2).ok()
}

/// Impact - thump plus a bright chime
fn play_hit(ctx: &AudioContext, vol: f32) -> Option<()> {
    let t = ctx.current_time();

    let (thump, thump_gain) = create_osc(ctx, 120.0, OscillatorType::Sine)?;
    thump_gain.gain().set_value_at_time(vol * 0.6, t).ok();
    thump_gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.15).ok();
    thump.frequency().exponential_ramp_to_value_at_time(50.0, t + 0.15).ok();
    thump.start().ok()?;
    thump.stop_with_when(t + 0.2).ok()?;

    // Two-note chime
    for (i, freq) in [880.0_f32, 1320.0].into_iter().enumerate() {
        let start = t + 0.05 + i as f64 * 0.08;
        let (osc, gain) = create_osc(ctx, freq, OscillatorType::Sine)?;
        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain().set_value_at_time(vol * 0.3, start).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.01, start + 0.3).ok();
        osc.start_with_when(start).ok()?;
        osc.stop_with_when(start + 0.35).ok()?;
    }
    Some(())
}

/// Miss - descending whoosh
fn play_miss(ctx: &AudioContext, vol: f32) -> Option<()> {
    let (osc, gain) = create_osc(ctx, 400.0, OscillatorType::Sawtooth)?;
    let t = ctx.current_time();

    gain.gain().set_value_at_time(vol * 0.25, t).ok();
    gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.4).ok();
    osc.frequency().set_value_at_time(400.0, t).ok();
    osc.frequency().exponential_ramp_to_value_at_time(80.0, t + 0.4).ok();

    osc.start().ok()?;
    osc.stop_with_when(t + 0.45).ok()
}

/// Tier jingle - more notes and higher pitch for harder tiers
fn play_difficulty(ctx: &AudioContext, vol: f32, difficulty: Difficulty) -> Option<()> {
    let notes: &[f32] = match difficulty {
        Difficulty::Noob => &[330.0, 262.0],
        Difficulty::Easy => &[392.0, 523.0],
        Difficulty::Veteran => &[523.0, 659.0, 784.0],
    };
    let t = ctx.current_time();

    for (i, &freq) in notes.iter().enumerate() {
        let start = t + i as f64 * 0.09;
        let (osc, gain) = create_osc(ctx, freq, OscillatorType::Square)?;
        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain().set_value_at_time(vol * 0.15, start).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.01, start + 0.12).ok();
        osc.start_with_when(start).ok()?;
        osc.stop_with_when(start + 0.15).ok()?;
    }
    Some(())
}
