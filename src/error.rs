//! Errors reported by the presentation layer.
//!
//! Neither kind is fatal: the game keeps running without the cue. See
//! [`crate::feedback::report`] for how each one is handled.

use std::fmt;

/// A feedback cue (sound or visual effect) that could not be played
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    /// The host refused or failed to start a cue, e.g. audio blocked until
    /// the first user gesture.
    PlaybackFailure {
        /// Name of the cue that failed.
        cue: &'static str,
        /// Host-provided reason.
        reason: String,
    },

    /// An effect was requested but the page has nothing to show it on.
    MissingEffectTarget {
        /// Name of the effect.
        effect: &'static str,
    },
}

impl FeedbackError {
    pub fn playback(cue: &'static str, reason: impl Into<String>) -> Self {
        Self::PlaybackFailure {
            cue,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FeedbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlaybackFailure { cue, reason } => {
                write!(f, "playback of '{cue}' failed: {reason}")
            }
            Self::MissingEffectTarget { effect } => {
                write!(f, "no presentation surface for effect '{effect}'")
            }
        }
    }
}

impl std::error::Error for FeedbackError {}
