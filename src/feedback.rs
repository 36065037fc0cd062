//! Output surface: effects, sounds and navigation
//!
//! The simulation never touches the page. Cues and outcomes are turned into
//! calls on a [`Presenter`], which the browser build implements with DOM
//! effects, Web Audio and `location.href`.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::error::FeedbackError;
use crate::settings::Difficulty;
use crate::sim::{Cue, Outcome, Target};

/// Messages shown next to a hit
pub const HIT_MESSAGES: [&str; 4] = ["Bullseye!", "Perfect!", "Great Shot!", "Awesome!"];

/// Visual effects the presenter can play
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Sparks off the bow string, along the shot direction
    StringRelease { angle: f32 },
    /// Burst at the impact point
    Explosion,
    /// Bullseye ring, scaled by shot strength
    Bullseye,
    /// Floating text next to the impact
    HitMessage(&'static str),
    /// Full-screen "goal achieved" banner
    GoalBanner,
    /// "Miss" stamp
    Miss,
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::StringRelease { .. } => "string-release",
            Effect::Explosion => "explosion",
            Effect::Bullseye => "bullseye",
            Effect::HitMessage(_) => "hit-message",
            Effect::GoalBanner => "goal-banner",
            Effect::Miss => "miss",
        }
    }
}

/// Sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Arrow released
    Shoot,
    /// Arrow struck a target
    Hit,
    /// Arrow left the play area
    Miss,
    /// Looping bow-draw creak
    Pull,
    /// Tier switched
    Difficulty(Difficulty),
}

impl Sound {
    pub fn name(&self) -> &'static str {
        match self {
            Sound::Shoot => "shoot",
            Sound::Hit => "hit",
            Sound::Miss => "miss",
            Sound::Pull => "pull",
            Sound::Difficulty(Difficulty::Noob) => "difficulty-noob",
            Sound::Difficulty(Difficulty::Easy) => "difficulty-easy",
            Sound::Difficulty(Difficulty::Veteran) => "difficulty-veteran",
        }
    }
}

/// CSS custom properties that place and size an effect element
pub fn effect_style(effect: Effect, at: Vec2, magnitude: f32) -> Vec<(&'static str, String)> {
    let mut style = vec![
        ("left", format!("{}px", at.x)),
        ("top", format!("{}px", at.y)),
        ("--scale", magnitude.to_string()),
        ("--duration", format!("{}s", EFFECTS_DURATION)),
    ];
    if let Effect::StringRelease { angle } = effect {
        style.push(("--angle", format!("{}rad", angle)));
    }
    style
}

/// Everything the game asks of the page
pub trait Presenter {
    /// Play a visual effect at a screen position with a size multiplier
    fn play_effect(&mut self, effect: Effect, at: Vec2, magnitude: f32)
    -> Result<(), FeedbackError>;

    /// Start a sound (loops for [`Sound::Pull`])
    fn play_sound(&mut self, sound: Sound) -> Result<(), FeedbackError>;

    /// Stop a looping sound; a no-op for one-shots
    fn stop_sound(&mut self, sound: Sound);

    /// Leave the page for `destination` after `delay_ms`
    fn navigate(&mut self, destination: &str, delay_ms: u32);
}

/// Apply the error policy: playback failures are logged, missing effect
/// surfaces are ignored. Neither stops the game.
pub fn report(result: Result<(), FeedbackError>) {
    match result {
        Ok(()) => {}
        Err(err @ FeedbackError::PlaybackFailure { .. }) => log::warn!("{}", err),
        Err(err @ FeedbackError::MissingEffectTarget { .. }) => log::debug!("{}", err),
    }
}

/// Play the cues produced by an input event
pub fn dispatch_cue<P: Presenter + ?Sized>(cue: Cue, presenter: &mut P) {
    match cue {
        Cue::PullStarted => report(presenter.play_sound(Sound::Pull)),
        Cue::PullStopped => presenter.stop_sound(Sound::Pull),
        Cue::Launched { origin, angle } => {
            report(presenter.play_sound(Sound::Shoot));
            report(presenter.play_effect(Effect::StringRelease { angle }, origin, 1.0));
        }
        Cue::DifficultyChanged(difficulty) => {
            report(presenter.play_sound(Sound::Difficulty(difficulty)))
        }
    }
}

/// Play the feedback for one retired arrow; a hit also schedules navigation
pub fn dispatch_outcome<P: Presenter + ?Sized>(
    outcome: &Outcome,
    targets: &[Target],
    rng: &mut Pcg32,
    presenter: &mut P,
) {
    match *outcome {
        Outcome::Hit {
            position,
            strength,
            target,
        } => {
            let Some(target) = targets.get(target) else {
                log::warn!("Hit on unknown target index {}", target);
                return;
            };
            log::info!("Hit '{}' (strength {}) -> {}", target.label, strength, target.destination);

            report(presenter.play_effect(Effect::Explosion, position, 1.0));
            report(presenter.play_effect(
                Effect::Bullseye,
                position,
                strength / HIT_EFFECT_DIVISOR,
            ));
            report(presenter.play_sound(Sound::Hit));

            let message = HIT_MESSAGES[rng.random_range(0..HIT_MESSAGES.len())];
            report(presenter.play_effect(Effect::HitMessage(message), position, 1.0));
            report(presenter.play_effect(Effect::GoalBanner, position, 1.0));

            presenter.navigate(&target.destination, NAVIGATION_DELAY_MS);
        }
        Outcome::Miss { position } => {
            log::debug!("Miss, cue at ({:.0}, {:.0})", position.x, position.y);
            report(presenter.play_effect(Effect::Miss, position, MISS_EFFECT_SCALE));
            report(presenter.play_sound(Sound::Miss));
        }
    }
}

/// Presenter that only logs; used by the native build
#[derive(Debug, Default)]
pub struct LogPresenter {
    pub navigations: Vec<String>,
}

impl Presenter for LogPresenter {
    fn play_effect(
        &mut self,
        effect: Effect,
        at: Vec2,
        magnitude: f32,
    ) -> Result<(), FeedbackError> {
        log::info!("effect {} at ({:.0}, {:.0}) x{:.2}", effect.name(), at.x, at.y, magnitude);
        Ok(())
    }

    fn play_sound(&mut self, sound: Sound) -> Result<(), FeedbackError> {
        log::info!("sound {}", sound.name());
        Ok(())
    }

    fn stop_sound(&mut self, sound: Sound) {
        log::info!("stop {}", sound.name());
    }

    fn navigate(&mut self, destination: &str, delay_ms: u32) {
        log::info!("navigate to {} in {}ms", destination, delay_ms);
        self.navigations.push(destination.to_string());
    }
}
