//! Bullseye - an archery menu where every target is a link
//!
//! Core modules:
//! - `sim`: Frame-coupled simulation (aim, arrows, targets, hit resolution)
//! - `scheduler`: Per-frame driver that owns the simulation state
//! - `feedback`: Output surface (effects, sounds, navigation) and outcome dispatch
//! - `settings`: Difficulty tiers and player preferences
//! - `manifest`: The fixed list of targets and where they lead
//! - `renderer` / `audio`: Browser-only presentation (wasm32)

pub mod error;
pub mod feedback;
pub mod manifest;
pub mod scheduler;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use error::FeedbackError;
pub use manifest::{Manifest, TargetSpec};
pub use scheduler::{FrameRequest, FrameScheduler, SchedulerState};
pub use settings::{Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Maximum bow draw
    pub const MAX_PULL: f32 = 80.0;
    /// Draw gained per tick while the input is held
    pub const PULL_STEP: f32 = 2.0;
    /// Aim change per arrow-key press (radians)
    pub const AIM_KEY_STEP: f32 = 0.1;

    /// Arrow speed before pull bonus (pixels per tick)
    pub const BASE_ARROW_SPEED: f32 = 5.0;
    /// Pull is divided by this and added to the base speed
    pub const PULL_SPEED_DIVISOR: f32 = 5.0;

    /// Launcher sits this far above the bottom edge
    pub const LAUNCHER_BOTTOM_OFFSET: f32 = 100.0;

    /// Inset from the viewport edges that targets bounce off
    pub const SCREEN_PADDING: f32 = 20.0;
    /// Extra spacing kept between target centres
    pub const TARGET_PADDING: f32 = 15.0;
    /// Default target icon size (square)
    pub const TARGET_SIZE: f32 = 50.0;
    /// Upper bound on overlap-settling sweeps per correction pass
    pub const SETTLE_PASSES: usize = 256;

    /// Tooltip orbit speed (radians per tick)
    pub const ORBIT_STEP: f32 = 0.01;
    /// Tooltip distance from the target centre
    pub const TOOLTIP_ORBIT_RADIUS: f32 = 40.0;
    /// Ticks a hit target keeps its highlight ring (~0.8s at 60 Hz)
    pub const HIGHLIGHT_TICKS: u32 = 48;

    /// Delay between a hit and leaving the page
    pub const NAVIGATION_DELAY_MS: u32 = 400;
    /// Hit effect magnitude = strength / this
    pub const HIT_EFFECT_DIVISOR: f32 = 30.0;
    /// Miss effect magnitude
    pub const MISS_EFFECT_SCALE: f32 = 1.5;
    /// How long one-shot effects play (seconds)
    pub const EFFECTS_DURATION: f32 = 1.5;
}

/// Angle of the vector pointing from `from` to `to`, in (-π, π]
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Clamp an angle into the upper half-plane [-π, 0] (screen coordinates)
#[inline]
pub fn clamp_upper_half(angle: f32) -> f32 {
    angle.clamp(-std::f32::consts::PI, 0.0)
}

/// Unit vector for a heading
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    heading(theta) * r
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}
