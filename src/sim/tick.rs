//! Frame-coupled simulation tick
//!
//! One call to [`tick`] per display refresh. All motion uses fixed per-tick
//! deltas, so a slow frame slows the game rather than making it skip.
//! Input events are applied between ticks with [`apply_input`].

use glam::Vec2;

use super::aim::{Nudge, accumulate_pull, aim_at, drag_pull, nudge};
use super::collision::{Outcome, resolve_projectiles};
use super::state::{Projectile, SimState, Viewport};
use super::targets::{advance_targets, resolve_targets};
use crate::settings::Difficulty;

/// Input from the host, already converted to play-area coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    TouchStart(Vec2),
    TouchMove(Vec2),
    TouchEnd,
    Key(Nudge),
    Resize(Viewport),
    SetDifficulty(Difficulty),
}

/// Presentation side effects requested by an input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    /// Bow draw began: start the looping pull sound
    PullStarted,
    /// Bow draw ended: stop the looping pull sound
    PullStopped,
    /// An arrow left the bow
    Launched { origin: Vec2, angle: f32 },
    /// Tier switched
    DifficultyChanged(Difficulty),
}

/// Apply one input event to the state.
///
/// Returns the cues the presentation layer should play. The pull sound cue
/// is latched: a second press while drawing yields no `PullStarted`.
pub fn apply_input(state: &mut SimState, event: InputEvent) -> Vec<Cue> {
    let mut cues = Vec::new();

    match event {
        InputEvent::PointerDown(_) => begin_draw(state, &mut cues),
        InputEvent::TouchStart(pos) => {
            state.touch_origin = Some(pos);
            begin_draw(state, &mut cues);
        }
        InputEvent::PointerMove(pos) => {
            let angle = aim_at(state.launcher.pos, pos);
            state.launcher.set_angle(angle);
        }
        InputEvent::TouchMove(pos) => {
            if let Some(origin) = state.touch_origin {
                state.pull = drag_pull(origin, pos);
            }
            let angle = aim_at(state.launcher.pos, pos);
            state.launcher.set_angle(angle);
        }
        InputEvent::PointerUp | InputEvent::TouchEnd => {
            state.touch_origin = None;
            if state.pulling {
                cues.push(launch(state));
            }
            state.pulling = false;
            if state.pull_cue.stop() {
                cues.push(Cue::PullStopped);
            }
        }
        InputEvent::Key(dir) => {
            state.launcher.angle = nudge(state.launcher.angle, dir);
        }
        InputEvent::Resize(viewport) => state.resize(viewport),
        InputEvent::SetDifficulty(difficulty) => {
            state.set_difficulty(difficulty);
            cues.push(Cue::DifficultyChanged(difficulty));
        }
    }

    cues
}

fn begin_draw(state: &mut SimState, cues: &mut Vec<Cue>) {
    state.pulling = true;
    if state.pull_cue.start() {
        cues.push(Cue::PullStarted);
    }
}

/// Release the arrow with the current aim and draw, then reset the draw
fn launch(state: &mut SimState) -> Cue {
    let arrow = Projectile::spawn(&state.launcher, state.pull);
    log::debug!(
        "Launch: angle={:.3} pull={} speed={}",
        arrow.angle,
        arrow.strength,
        arrow.speed
    );
    state.projectiles.push(arrow);
    state.pull = 0.0;

    Cue::Launched {
        origin: state.launcher.pos,
        angle: state.launcher.angle,
    }
}

/// Advance the simulation by one tick.
///
/// Order: draw accumulation, target motion and correction, arrow flight,
/// then hit/miss resolution. Returns the outcomes of retired arrows.
pub fn tick(state: &mut SimState) -> Vec<Outcome> {
    state.time_ticks += 1;

    state.pull = accumulate_pull(state.pull, state.pulling);

    advance_targets(&mut state.targets);
    resolve_targets(&mut state.targets, state.viewport);

    for arrow in &mut state.projectiles {
        arrow.advance();
    }

    resolve_projectiles(
        &mut state.projectiles,
        &mut state.targets,
        state.viewport,
        &mut state.rng,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::manifest::{Manifest, TargetSpec};
    use std::f32::consts::PI;

    fn empty_state() -> SimState {
        let manifest = Manifest { targets: Vec::new() };
        SimState::new(12345, Viewport::new(800.0, 600.0), &manifest, Difficulty::Easy)
    }

    fn single_target_state(x: f32, y: f32, size: f32) -> SimState {
        let mut spec = TargetSpec::new("i.svg", "Only", "#only");
        spec.size = size;
        let manifest = Manifest { targets: vec![spec] };
        let mut state = SimState::new(1, Viewport::new(800.0, 600.0), &manifest, Difficulty::Easy);
        state.targets[0].pos = Vec2::new(x, y);
        state.targets[0].vel = Vec2::ZERO;
        state
    }

    #[test]
    fn test_press_hold_release_launches() {
        let mut state = empty_state();

        let cues = apply_input(&mut state, InputEvent::PointerDown(Vec2::new(400.0, 100.0)));
        assert_eq!(cues, vec![Cue::PullStarted]);

        for _ in 0..40 {
            tick(&mut state);
        }
        assert_eq!(state.pull, MAX_PULL);

        let cues = apply_input(&mut state, InputEvent::PointerUp);
        assert_eq!(cues.len(), 2);
        assert!(matches!(cues[0], Cue::Launched { .. }));
        assert_eq!(cues[1], Cue::PullStopped);

        assert_eq!(state.pull, 0.0);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].speed, 5.0 + MAX_PULL / 5.0);
        assert_eq!(state.projectiles[0].strength, MAX_PULL);
    }

    #[test]
    fn test_double_press_single_pull_start() {
        let mut state = empty_state();
        let first = apply_input(&mut state, InputEvent::PointerDown(Vec2::ZERO));
        let second = apply_input(&mut state, InputEvent::TouchStart(Vec2::ZERO));
        assert_eq!(first, vec![Cue::PullStarted]);
        assert!(second.is_empty());
    }

    #[test]
    fn test_release_without_press_does_nothing() {
        let mut state = empty_state();
        let cues = apply_input(&mut state, InputEvent::PointerUp);
        assert!(cues.is_empty());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_pointer_move_aims() {
        let mut state = empty_state();
        apply_input(&mut state, InputEvent::PointerMove(Vec2::new(300.0, 600.0)));
        assert_eq!(state.launcher.angle, -PI);
        apply_input(&mut state, InputEvent::Key(Nudge::Right));
        assert!((state.launcher.angle - (-PI + AIM_KEY_STEP)).abs() < 1e-6);
    }

    #[test]
    fn test_touch_drag_sets_pull() {
        let mut state = empty_state();
        apply_input(&mut state, InputEvent::TouchStart(Vec2::new(400.0, 300.0)));
        apply_input(&mut state, InputEvent::TouchMove(Vec2::new(400.0, 270.0)));
        assert_eq!(state.pull, 30.0);
        tick(&mut state);
        assert_eq!(state.pull, 32.0);
        apply_input(&mut state, InputEvent::TouchEnd);
        assert_eq!(state.projectiles[0].strength, 32.0);
        assert_eq!(state.pull, 0.0);
        assert!(state.touch_origin.is_none());
    }

    #[test]
    fn test_in_flight_arrow_ignores_new_aim() {
        let mut state = empty_state();
        apply_input(&mut state, InputEvent::PointerDown(Vec2::ZERO));
        apply_input(&mut state, InputEvent::PointerUp);
        let heading = state.projectiles[0].angle;

        apply_input(&mut state, InputEvent::PointerMove(Vec2::new(700.0, 499.0)));
        tick(&mut state);
        assert_eq!(state.projectiles[0].angle, heading);
    }

    #[test]
    fn test_tick_hit_scenario() {
        let mut state = single_target_state(40.0, 40.0, 20.0);
        state.projectiles.push(Projectile {
            pos: Vec2::new(50.0, 50.0),
            angle: 0.0,
            speed: 1.0,
            strength: 30.0,
        });

        let outcomes = tick(&mut state);
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], Outcome::Hit { target: 0, .. }));
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_tick_miss_fires_once() {
        let mut state = empty_state();
        state.projectiles.push(Projectile {
            pos: Vec2::new(4.0, 200.0),
            angle: -PI,
            speed: 5.0,
            strength: 0.0,
        });

        let outcomes = tick(&mut state);
        assert_eq!(state.time_ticks, 1);
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], Outcome::Miss { .. }));
        assert!(tick(&mut state).is_empty());
    }

    #[test]
    fn test_difficulty_event_emits_cue() {
        let mut state = empty_state();
        let cues = apply_input(&mut state, InputEvent::SetDifficulty(Difficulty::Veteran));
        assert_eq!(cues, vec![Cue::DifficultyChanged(Difficulty::Veteran)]);
        assert_eq!(state.difficulty, Difficulty::Veteran);
    }

    #[test]
    fn test_determinism() {
        let manifest = Manifest::default();
        let viewport = Viewport::new(1024.0, 768.0);
        let mut a = SimState::new(99999, viewport, &manifest, Difficulty::Veteran);
        let mut b = SimState::new(99999, viewport, &manifest, Difficulty::Veteran);

        for _ in 0..120 {
            tick(&mut a);
            tick(&mut b);
        }

        for (ta, tb) in a.targets.iter().zip(&b.targets) {
            assert_eq!(ta.pos, tb.pos);
            assert_eq!(ta.vel, tb.vel);
        }
    }

    #[test]
    fn test_crowded_phone_session_keeps_targets_apart() {
        let viewport = Viewport::new(320.0, 480.0);
        for seed in 0..20 {
            let mut state = SimState::new(seed, viewport, &Manifest::default(), Difficulty::Veteran);
            for _ in 0..2000 {
                tick(&mut state);
                for (i, a) in state.targets.iter().enumerate() {
                    for b in &state.targets[i + 1..] {
                        let depth = crate::sim::overlap_depth(a, b);
                        assert!(
                            depth <= TARGET_PADDING + 1e-2,
                            "seed {} tick {}: overlap {}",
                            seed,
                            state.time_ticks,
                            depth
                        );
                    }
                }
            }
        }
    }
}
