//! Arrow-vs-target hit detection and outcome resolution
//!
//! Each arrow produces at most one outcome per tick. Retired arrows are
//! flagged during the pass and dropped in a single compaction afterwards, so
//! no arrow is skipped or visited twice.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Projectile, Target, Viewport};
use crate::consts::HIGHLIGHT_TICKS;

/// What happened to a retired arrow
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Arrow struck a target
    Hit {
        /// Arrow position at impact
        position: Vec2,
        /// Pull the arrow was launched with
        strength: f32,
        /// Index of the struck target in `SimState::targets`
        target: usize,
    },
    /// Arrow left the play area. `position` is a random spot in the upper
    /// half of the viewport where the miss cue is shown, not the exit point.
    Miss { position: Vec2 },
}

/// First target (in manifest order) whose body strictly contains `point`
pub fn first_hit(point: Vec2, targets: &[Target]) -> Option<usize> {
    targets.iter().position(|t| t.contains(point))
}

/// Random spot in the upper half of the viewport
pub fn random_miss_position(rng: &mut Pcg32, viewport: Viewport) -> Vec2 {
    Vec2::new(
        rng.random::<f32>() * viewport.width,
        rng.random::<f32>() * viewport.target_floor(),
    )
}

/// Check every arrow against the targets and the play area.
///
/// A hit takes precedence over leaving the viewport in the same tick. Hit
/// targets get their highlight timer reset.
pub fn resolve_projectiles(
    projectiles: &mut Vec<Projectile>,
    targets: &mut [Target],
    viewport: Viewport,
    rng: &mut Pcg32,
) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    let mut retired = vec![false; projectiles.len()];

    for (arrow, retire) in projectiles.iter().zip(retired.iter_mut()) {
        if let Some(index) = first_hit(arrow.pos, targets) {
            targets[index].highlight_ticks = HIGHLIGHT_TICKS;
            outcomes.push(Outcome::Hit {
                position: arrow.pos,
                strength: arrow.strength,
                target: index,
            });
            *retire = true;
        } else if arrow.out_of_bounds(viewport) {
            outcomes.push(Outcome::Miss {
                position: random_miss_position(rng, viewport),
            });
            *retire = true;
        }
    }

    let mut flags = retired.into_iter();
    projectiles.retain(|_| !flags.next().unwrap_or(false));

    outcomes
}
