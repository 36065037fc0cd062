//! Target manifest: which targets exist and where each one leads
//!
//! The built-in manifest can be replaced by a JSON document embedded in the
//! page (see `main.rs`).

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_SIZE;

fn default_size() -> f32 {
    TARGET_SIZE
}

/// One target as configured (before it gets a position and velocity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Icon reference (URL of an image)
    pub icon: String,
    /// Tooltip text orbiting the target
    pub label: String,
    /// Where a hit takes the player (URL or `#section`)
    pub destination: String,
    /// Side length of the square body
    #[serde(default = "default_size")]
    pub size: f32,
}

impl TargetSpec {
    pub fn new(icon: &str, label: &str, destination: &str) -> Self {
        Self {
            icon: icon.to_string(),
            label: label.to_string(),
            destination: destination.to_string(),
            size: TARGET_SIZE,
        }
    }
}

/// Ordered list of targets; order is also the hit tie-break order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub targets: Vec<TargetSpec>,
}

impl Default for Manifest {
    fn default() -> Self {
        let targets = [
            ("assets/icon1.svg", "Agri", "#love"),
            ("assets/icon2.svg", "Arts", "#music"),
            ("assets/icon3.svg", "CI", "#camera"),
            ("assets/icon4.svg", "Design", "#star"),
            ("assets/icon5.svg", "Engineering", "#gift"),
            ("assets/icon6.svg", "Entrepreneurship", "#rocket"),
            ("assets/icon7.svg", "Law", "#heart"),
            ("assets/icon8.svg", "Health", "#smile"),
            ("assets/icon9.svg", "Nursing", "#game"),
            ("assets/icon10.svg", "Pharmacy", "#book"),
        ]
        .into_iter()
        .map(|(icon, label, destination)| TargetSpec::new(icon, label, destination))
        .collect();

        Self { targets }
    }
}

impl Manifest {
    /// Parse a manifest from JSON: either `{"targets": [...]}` or a bare array
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        match serde_json::from_str::<Manifest>(json) {
            Ok(manifest) => Ok(manifest),
            Err(err) => serde_json::from_str::<Vec<TargetSpec>>(json)
                .map(|targets| Self { targets })
                .map_err(|_| err),
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest() {
        let m = Manifest::default();
        assert_eq!(m.len(), 10);
        assert_eq!(m.targets[0].label, "Agri");
        assert_eq!(m.targets[9].destination, "#book");
        assert!(m.targets.iter().all(|t| t.size == TARGET_SIZE));
    }

    #[test]
    fn test_from_json_object_and_array() {
        let obj = r##"{"targets":[{"icon":"a.svg","label":"A","destination":"#a","size":64}]}"##;
        let m = Manifest::from_json(obj).unwrap();
        assert_eq!(m.targets[0].size, 64.0);

        let arr = r##"[{"icon":"b.svg","label":"B","destination":"/b"}]"##;
        let m = Manifest::from_json(arr).unwrap();
        assert_eq!(m.targets[0].size, TARGET_SIZE);
        assert_eq!(m.targets[0].destination, "/b");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Manifest::from_json("{\"targets\": 3}").is_err());
        assert!(Manifest::from_json("not json").is_err());
    }
}
