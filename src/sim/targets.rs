//! Target motion
//!
//! Targets drift at a constant per-tick velocity, bounce off the padded
//! upper half of the viewport and push each other apart. Correction runs
//! once per tick, after integration and before rendering.

use std::f32::consts::TAU;

use glam::Vec2;

use super::state::{Target, Viewport};
use crate::consts::*;
use crate::{distance, heading};

/// Integrate positions and advance the decorative state of every target
pub fn advance_targets(targets: &mut [Target]) {
    for target in targets.iter_mut() {
        target.pos += target.vel;

        target.orbit_angle += ORBIT_STEP;
        if target.orbit_angle >= TAU {
            target.orbit_angle -= TAU;
        }

        target.highlight_ticks = target.highlight_ticks.saturating_sub(1);
    }
}

/// The per-tick correction pass.
///
/// Pairwise separation and boundary containment run first. Whatever overlap
/// those leave behind (a body pinned at a wall, a push undone by a later
/// pair) is then settled until no two bodies overlap by more than
/// `TARGET_PADDING`, within `SETTLE_PASSES` sweeps.
pub fn resolve_targets(targets: &mut [Target], viewport: Viewport) {
    separate_pairs(targets);
    for target in targets.iter_mut() {
        contain(target, viewport);
    }

    for _ in 0..SETTLE_PASSES {
        if !settle_overlaps(targets, viewport) {
            break;
        }
    }
}

/// Penetration depth of two bodies' rectangles; 0 when they do not overlap
pub fn overlap_depth(a: &Target, b: &Target) -> f32 {
    let (ox, oy) = overlap_extents(a, b);
    if ox <= 0.0 || oy <= 0.0 { 0.0 } else { ox.min(oy) }
}

fn overlap_extents(a: &Target, b: &Target) -> (f32, f32) {
    let a_max = a.pos + a.size;
    let b_max = b.pos + b.size;
    (
        a_max.x.min(b_max.x) - a.pos.x.max(b.pos.x),
        a_max.y.min(b_max.y) - a.pos.y.max(b.pos.y),
    )
}

/// Region the top-left corner may occupy.
///
/// A viewport smaller than the body pins it to the top-left padding.
fn bounds(target: &Target, viewport: Viewport) -> (Vec2, Vec2) {
    let min = Vec2::splat(SCREEN_PADDING);
    let max = Vec2::new(
        viewport.width - SCREEN_PADDING - target.size.x,
        viewport.target_floor() - SCREEN_PADDING - target.size.y,
    )
    .max(min);
    (min, max)
}

/// Push overlapping pairs apart along the line between their centres and
/// swap their velocities.
fn separate_pairs(targets: &mut [Target]) {
    for i in 0..targets.len() {
        let (head, tail) = targets.split_at_mut(i + 1);
        let a = &mut head[i];

        for b in tail.iter_mut() {
            let delta = b.center() - a.center();
            let dist = distance(a.center(), b.center());
            let min_dist = (a.size.x + b.size.x) / 2.0 + TARGET_PADDING;

            if dist < min_dist {
                // Coincident centres give atan2(0, 0) = 0: split along +x
                let axis = heading(delta.y.atan2(delta.x));
                let overlap = (min_dist - dist) / 2.0;
                a.pos -= axis * overlap;
                b.pos += axis * overlap;

                std::mem::swap(&mut a.vel, &mut b.vel);
            }
        }
    }
}

/// Point the velocity back inward at a padded edge and keep the body inside.
///
/// Only the sign of the offending component is forced; the speed is kept.
fn contain(target: &mut Target, viewport: Viewport) {
    let (min, max) = bounds(target, viewport);

    if target.pos.x <= min.x {
        target.vel.x = target.vel.x.abs();
    }
    if target.pos.x >= max.x {
        target.vel.x = -target.vel.x.abs();
    }
    if target.pos.y <= min.y {
        target.vel.y = target.vel.y.abs();
    }
    if target.pos.y >= max.y {
        target.vel.y = -target.vel.y.abs();
    }

    target.pos = target.pos.clamp(min, max);
}

/// One sweep over all pairs. Each pair overlapping by more than
/// `TARGET_PADDING` is pushed apart along its axis of least penetration,
/// half each; a body held by a wall hands the rest of its share to the
/// other. Velocities are left alone. Returns whether anything moved.
fn settle_overlaps(targets: &mut [Target], viewport: Viewport) -> bool {
    // Float slack so a settled pair is not pushed again
    const SLACK: f32 = 1e-3;
    let mut moved = false;

    for i in 0..targets.len() {
        let (head, tail) = targets.split_at_mut(i + 1);
        let a = &mut head[i];

        for b in tail.iter_mut() {
            let (ox, oy) = overlap_extents(a, b);
            if ox <= 0.0 || oy <= 0.0 {
                continue;
            }
            let excess = ox.min(oy) - TARGET_PADDING;
            if excess <= SLACK {
                continue;
            }
            moved = true;

            // Direction b moves in; ties go to +x / +y
            let ahead = b.center() - a.center();
            let dir = if ox <= oy {
                Vec2::new(if ahead.x >= 0.0 { 1.0 } else { -1.0 }, 0.0)
            } else {
                Vec2::new(0.0, if ahead.y >= 0.0 { 1.0 } else { -1.0 })
            };

            let moved_a = shift_within(a, -dir * (excess / 2.0), viewport).length();
            let moved_b = shift_within(b, dir * (excess - moved_a), viewport).length();
            let rest = excess - moved_a - moved_b;
            if rest > 0.0 {
                shift_within(a, -dir * rest, viewport);
            }
        }
    }

    moved
}

/// Move a body by `delta`, stopping at the padded edges. Returns the move made.
fn shift_within(target: &mut Target, delta: Vec2, viewport: Viewport) -> Vec2 {
    let (min, max) = bounds(target, viewport);
    let before = target.pos;
    target.pos = (target.pos + delta).clamp(min, max);
    target.pos - before
}
