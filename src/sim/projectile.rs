//! Arrows: spawn, straight-line flight, leaving the play area

use super::state::{Launcher, Projectile, Viewport};
use crate::consts::*;
use crate::heading;

impl Projectile {
    /// Nock an arrow at the bow using the current aim and draw
    pub fn spawn(launcher: &Launcher, pull: f32) -> Self {
        Self {
            pos: launcher.pos,
            angle: launcher.angle,
            speed: launch_speed(pull),
            strength: pull,
        }
    }

    /// Move one tick along the frozen heading
    pub fn advance(&mut self) {
        self.pos += heading(self.angle) * self.speed;
    }

    /// Past the top or either side. The bottom is unreachable since arrows
    /// never fly downward.
    pub fn out_of_bounds(&self, viewport: Viewport) -> bool {
        self.pos.y < 0.0 || self.pos.x < 0.0 || self.pos.x > viewport.width
    }
}

/// Pixels per tick for a given draw
pub fn launch_speed(pull: f32) -> f32 {
    BASE_ARROW_SPEED + pull / PULL_SPEED_DIVISOR
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_spawn_speed_and_strength() {
        let launcher = Launcher {
            pos: Vec2::new(400.0, 500.0),
            angle: -FRAC_PI_2,
        };
        let arrow = Projectile::spawn(&launcher, 80.0);
        assert_eq!(arrow.speed, 21.0);
        assert_eq!(arrow.strength, 80.0);
        assert_eq!(arrow.pos, launcher.pos);

        let weak = Projectile::spawn(&launcher, 0.0);
        assert_eq!(weak.speed, BASE_ARROW_SPEED);
    }

    #[test]
    fn test_heading_frozen_after_spawn() {
        let mut launcher = Launcher {
            pos: Vec2::new(400.0, 500.0),
            angle: -FRAC_PI_2,
        };
        let mut arrow = Projectile::spawn(&launcher, 20.0);
        launcher.set_angle(-0.3);
        arrow.advance();
        assert_eq!(arrow.angle, -FRAC_PI_2);
        assert!((arrow.pos.x - 400.0).abs() < 1e-3);
        assert!((arrow.pos.y - 491.0).abs() < 1e-3);
    }

    #[test]
    fn test_out_of_bounds_edges() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut arrow = Projectile {
            pos: Vec2::new(0.0, 10.0),
            angle: 0.0,
            speed: 5.0,
            strength: 0.0,
        };
        assert!(!arrow.out_of_bounds(viewport));
        arrow.pos.x = -1.0;
        assert!(arrow.out_of_bounds(viewport));
        arrow.pos = Vec2::new(800.0, 10.0);
        assert!(!arrow.out_of_bounds(viewport));
        arrow.pos.x = 800.5;
        assert!(arrow.out_of_bounds(viewport));
        arrow.pos = Vec2::new(100.0, -0.1);
        assert!(arrow.out_of_bounds(viewport));
    }
}
