//! Aim controller
//!
//! Turns pointer, touch and keyboard input into a bow angle and draw strength.

use glam::Vec2;

use crate::consts::*;
use crate::{angle_to, clamp_upper_half};

/// Direction of an arrow-key nudge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Left,
    Right,
}

/// Aim angle for a pointer position, restricted to the upper half-plane.
///
/// A pointer below the bow would wrap atan2 into the lower half; those
/// positions pin to horizontal instead (-π on the left, 0 on the right).
pub fn aim_at(launcher: Vec2, pointer: Vec2) -> f32 {
    let below = pointer.y > launcher.y;
    if below && pointer.x < launcher.x {
        return -std::f32::consts::PI;
    }
    if below && pointer.x > launcher.x {
        return 0.0;
    }
    clamp_upper_half(angle_to(launcher, pointer))
}

/// One arrow-key step
pub fn nudge(angle: f32, dir: Nudge) -> f32 {
    let delta = match dir {
        Nudge::Left => -AIM_KEY_STEP,
        Nudge::Right => AIM_KEY_STEP,
    };
    clamp_upper_half(angle + delta)
}

/// Per-tick draw accumulation, saturating at MAX_PULL
pub fn accumulate_pull(pull: f32, held: bool) -> f32 {
    if held {
        (pull + PULL_STEP).min(MAX_PULL)
    } else {
        pull
    }
}

/// Draw set directly from touch drag distance
pub fn drag_pull(origin: Vec2, current: Vec2) -> f32 {
    (current - origin).length().min(MAX_PULL)
}

/// Latch for the looping bow-draw sound.
///
/// `start`/`stop` report whether a transition happened so the host only
/// starts or stops the sound once per press.
#[derive(Debug, Clone, Default)]
pub struct PullCue {
    playing: bool,
}

impl PullCue {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Returns true on the not-playing -> playing transition
    pub fn start(&mut self) -> bool {
        !std::mem::replace(&mut self.playing, true)
    }

    /// Returns true on the playing -> not-playing transition
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.playing, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_aim_below_left_pins_to_minus_pi() {
        let angle = aim_at(Vec2::new(400.0, 500.0), Vec2::new(300.0, 600.0));
        assert_eq!(angle, -PI);
    }

    #[test]
    fn test_aim_below_right_pins_to_zero() {
        let angle = aim_at(Vec2::new(400.0, 500.0), Vec2::new(500.0, 501.0));
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_aim_straight_up_and_diagonal() {
        let bow = Vec2::new(400.0, 500.0);
        assert!((aim_at(bow, Vec2::new(400.0, 100.0)) + FRAC_PI_2).abs() < 1e-6);
        let diag = aim_at(bow, Vec2::new(500.0, 400.0));
        assert!((diag + PI / 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_aim_directly_below_stays_in_range() {
        // dx == 0: no pin applies, atan2 gives +π/2 which clamps to 0
        let angle = aim_at(Vec2::new(400.0, 500.0), Vec2::new(400.0, 700.0));
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_nudge_clamps() {
        assert_eq!(nudge(-0.05, Nudge::Right), 0.0);
        assert_eq!(nudge(-PI + 0.05, Nudge::Left), -PI);
        assert!((nudge(-1.0, Nudge::Left) + 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_pull_saturates_after_40_ticks() {
        let mut pull = 0.0;
        for _ in 0..40 {
            let next = accumulate_pull(pull, true);
            assert!(next >= pull);
            pull = next;
        }
        assert_eq!(pull, MAX_PULL);
        assert_eq!(accumulate_pull(pull, true), MAX_PULL);
        assert_eq!(accumulate_pull(13.0, false), 13.0);
    }

    #[test]
    fn test_pull_does_not_overshoot_odd_values() {
        assert_eq!(accumulate_pull(79.0, true), MAX_PULL);
    }

    #[test]
    fn test_drag_pull_caps() {
        assert_eq!(drag_pull(Vec2::ZERO, Vec2::new(30.0, 40.0)), 50.0);
        assert_eq!(drag_pull(Vec2::ZERO, Vec2::new(300.0, 0.0)), MAX_PULL);
    }

    #[test]
    fn test_pull_cue_is_idempotent() {
        let mut cue = PullCue::default();
        assert!(cue.start());
        assert!(!cue.start());
        assert!(cue.is_playing());
        assert!(cue.stop());
        assert!(!cue.stop());
        assert!(cue.start());
    }
}
