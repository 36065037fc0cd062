//! Difficulty tiers and player preferences
//!
//! Nothing here is persisted; settings come from defaults or the page URL.

use serde::{Deserialize, Serialize};

/// Difficulty tiers - each maps to a target speed multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Noob,
    #[default]
    Easy,
    Veteran,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Noob, Difficulty::Easy, Difficulty::Veteran];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Noob => "Noob",
            Difficulty::Easy => "Easy",
            Difficulty::Veteran => "Veteran",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "noob" => Some(Difficulty::Noob),
            "easy" | "normal" => Some(Difficulty::Easy),
            "veteran" | "vet" => Some(Difficulty::Veteran),
            _ => None,
        }
    }

    /// Target velocity components are drawn from ±speed (pixels per tick)
    pub fn speed(&self) -> f32 {
        match self {
            Difficulty::Noob => 1.5,
            Difficulty::Easy => 2.5,
            Difficulty::Veteran => 3.5,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Starting difficulty tier
    pub difficulty: Difficulty,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Volume of the looping bow-draw cue (0.0 - 1.0)
    pub pull_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            master_volume: 0.8,
            sfx_volume: 1.0,
            pull_volume: 0.3,
        }
    }
}

impl Settings {
    /// Read overrides from a URL query string such as `?difficulty=veteran&volume=0.5`.
    /// Unknown keys and unparsable values are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "difficulty" => match Difficulty::from_str(value) {
                    Some(d) => settings.difficulty = d,
                    None => log::warn!("Unknown difficulty '{}' in query", value),
                },
                "volume" => {
                    if let Ok(v) = value.parse::<f32>() {
                        settings.master_volume = v.clamp(0.0, 1.0);
                    }
                }
                "mute" => settings.master_volume = 0.0,
                _ => {}
            }
        }

        settings
    }

    /// Effective volume for one-shot effects
    pub fn effect_volume(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }
}
