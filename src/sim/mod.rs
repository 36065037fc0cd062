//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Fixed per-tick deltas only
//! - Seeded RNG only
//! - Stable iteration order (launch order for arrows, manifest order for targets)

pub mod aim;
pub mod collision;
pub mod projectile;
pub mod state;
pub mod targets;
pub mod tick;

#[cfg(test)]
mod properties;

pub use aim::{Nudge, PullCue, accumulate_pull, aim_at, drag_pull, nudge};
pub use collision::{Outcome, first_hit, resolve_projectiles};
pub use projectile::launch_speed;
pub use state::{Launcher, Projectile, SimState, Target, Viewport};
pub use targets::{advance_targets, overlap_depth, resolve_targets};
pub use tick::{Cue, InputEvent, apply_input, tick};
