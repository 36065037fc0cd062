//! Simulation state and core entity types
//!
//! Everything the frame loop mutates lives in [`SimState`]; the scheduler
//! owns one instance and threads it through each tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::aim::PullCue;
use crate::consts::*;
use crate::manifest::{Manifest, TargetSpec};
use crate::settings::Difficulty;
use crate::{clamp_upper_half, polar_to_cartesian};

/// Play area size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Lower edge of the region targets live in
    pub fn target_floor(&self) -> f32 {
        self.height / 2.0
    }
}

/// The bow
#[derive(Debug, Clone)]
pub struct Launcher {
    pub pos: Vec2,
    /// Aim angle in [-π, 0]; -π/2 is straight up
    pub angle: f32,
}

impl Launcher {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            pos: Self::anchor(viewport),
            angle: -std::f32::consts::FRAC_PI_2,
        }
    }

    /// Bottom-centre anchor for a viewport
    pub fn anchor(viewport: Viewport) -> Vec2 {
        Vec2::new(viewport.width / 2.0, viewport.height - LAUNCHER_BOTTOM_OFFSET)
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = clamp_upper_half(angle);
    }
}

/// An arrow in flight
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    /// Heading in radians, frozen at spawn
    pub angle: f32,
    /// Pixels per tick
    pub speed: f32,
    /// Pull at launch; scales the hit effect
    pub strength: f32,
}

/// A moving link target (axis-aligned square body)
#[derive(Debug, Clone)]
pub struct Target {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    /// Orbit angle of the tooltip satellite (decorative)
    pub orbit_angle: f32,
    pub icon: String,
    pub label: String,
    pub destination: String,
    /// Ticks of hit highlight remaining
    pub highlight_ticks: u32,
}

impl Target {
    pub fn from_spec(spec: &TargetSpec, pos: Vec2, vel: Vec2, orbit_angle: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(spec.size),
            vel,
            orbit_angle,
            icon: spec.icon.clone(),
            label: spec.label.clone(),
            destination: spec.destination.clone(),
            highlight_ticks: 0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Where the orbiting tooltip is drawn
    pub fn tooltip_pos(&self) -> Vec2 {
        self.center() + polar_to_cartesian(TOOLTIP_ORBIT_RADIUS, self.orbit_angle)
    }

    /// Strictly inside the body; touching an edge does not count
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.pos.x
            && p.x < self.pos.x + self.size.x
            && p.y > self.pos.y
            && p.y < self.pos.y + self.size.y
    }
}

/// Random velocity with both components in ±speed
pub fn random_velocity(rng: &mut Pcg32, speed: f32) -> Vec2 {
    Vec2::new(
        (rng.random::<f32>() - 0.5) * 2.0 * speed,
        (rng.random::<f32>() - 0.5) * 2.0 * speed,
    )
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    pub viewport: Viewport,
    pub launcher: Launcher,
    /// Current draw in [0, MAX_PULL]
    pub pull: f32,
    /// Whether the aim input is held (pull accumulates)
    pub pulling: bool,
    /// Touch position where the current draw started
    pub touch_origin: Option<Vec2>,
    /// Latch for the looping draw sound
    pub pull_cue: PullCue,
    /// Arrows in flight, in launch order
    pub projectiles: Vec<Projectile>,
    /// Targets in manifest order
    pub targets: Vec<Target>,
    pub difficulty: Difficulty,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub rng: Pcg32,
}

impl SimState {
    /// Create a state with targets scattered over the upper half of the viewport
    pub fn new(seed: u64, viewport: Viewport, manifest: &Manifest, difficulty: Difficulty) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let speed = difficulty.speed();

        let targets = manifest
            .targets
            .iter()
            .map(|spec| {
                let x = rng.random::<f32>() * (viewport.width - spec.size - 2.0 * SCREEN_PADDING)
                    + SCREEN_PADDING;
                let y = rng.random::<f32>()
                    * (viewport.target_floor() - spec.size - SCREEN_PADDING)
                    + SCREEN_PADDING;
                let vel = random_velocity(&mut rng, speed);
                let orbit = rng.random::<f32>() * std::f32::consts::TAU;
                Target::from_spec(spec, Vec2::new(x, y), vel, orbit)
            })
            .collect();

        Self {
            viewport,
            launcher: Launcher::new(viewport),
            pull: 0.0,
            pulling: false,
            touch_origin: None,
            pull_cue: PullCue::default(),
            projectiles: Vec::new(),
            targets,
            difficulty,
            time_ticks: 0,
            rng,
        }
    }

    /// Distinct icon paths in manifest order, for preloading
    pub fn icon_sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = Vec::new();
        for target in &self.targets {
            if !sources.contains(&target.icon.as_str()) {
                sources.push(&target.icon);
            }
        }
        sources
    }

    /// Window resized: new play area, launcher recentred
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.launcher.pos = Launcher::anchor(viewport);
    }

    /// Switch tier and re-roll every target's velocity; positions are kept
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        let speed = difficulty.speed();
        for target in &mut self.targets {
            target.vel = random_velocity(&mut self.rng, speed);
        }
        log::info!("Difficulty set to {} (speed ±{})", difficulty.as_str(), speed);
    }
}
