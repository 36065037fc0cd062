//! Property tests over the simulation invariants

use std::f32::consts::PI;

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::*;
use crate::consts::*;
use crate::manifest::{Manifest, TargetSpec};
use crate::settings::Difficulty;

fn target_at(pos: Vec2, vel: Vec2) -> Target {
    Target::from_spec(&TargetSpec::new("i.svg", "T", "#t"), pos, vel, 0.0)
}

fn nudges() -> impl Strategy<Value = Vec<Nudge>> {
    prop::collection::vec(prop_oneof![Just(Nudge::Left), Just(Nudge::Right)], 0..60)
}

proptest! {
    #[test]
    fn aim_stays_in_upper_half(
        lx in 0.0f32..2000.0, ly in 0.0f32..2000.0,
        px in -500.0f32..2500.0, py in -500.0f32..2500.0,
    ) {
        let angle = aim_at(Vec2::new(lx, ly), Vec2::new(px, py));
        prop_assert!((-PI..=0.0).contains(&angle));
    }

    #[test]
    fn pointer_below_pins_horizontal(dx in 1.0f32..500.0, dy in 1.0f32..500.0) {
        let bow = Vec2::new(600.0, 700.0);
        prop_assert_eq!(aim_at(bow, bow + Vec2::new(-dx, dy)), -PI);
        prop_assert_eq!(aim_at(bow, bow + Vec2::new(dx, dy)), 0.0);
    }

    #[test]
    fn nudges_stay_in_upper_half(start in -PI..=0.0f32, steps in nudges()) {
        let angle = steps.into_iter().fold(start, nudge);
        prop_assert!((-PI..=0.0).contains(&angle));
    }

    #[test]
    fn pull_is_monotone_and_saturates(ticks in 0usize..100) {
        let mut pull = 0.0;
        for _ in 0..ticks {
            let next = accumulate_pull(pull, true);
            prop_assert!(next >= pull);
            prop_assert!(next <= MAX_PULL);
            pull = next;
        }
        prop_assert_eq!(pull, (ticks as f32 * PULL_STEP).min(MAX_PULL));
        prop_assert_eq!(accumulate_pull(pull, false), pull);
    }

    #[test]
    fn launch_speed_is_linear_in_pull(pull in 0.0f32..=MAX_PULL) {
        let arrow = Projectile::spawn(&Launcher::new(Viewport::new(800.0, 600.0)), pull);
        prop_assert!((arrow.speed - (5.0 + pull / 5.0)).abs() < 1e-4);
        prop_assert_eq!(arrow.strength, pull);
    }

    #[test]
    fn targets_stay_contained(
        bodies in prop::collection::vec(
            ((-200.0f32..1400.0, -200.0f32..700.0), (-4.0f32..4.0, -4.0f32..4.0)),
            1..10,
        ),
        width in 200.0f32..1600.0,
        height in 200.0f32..1200.0,
    ) {
        let viewport = Viewport::new(width, height);
        let mut targets: Vec<Target> = bodies
            .into_iter()
            .map(|((x, y), (vx, vy))| target_at(Vec2::new(x, y), Vec2::new(vx, vy)))
            .collect();

        resolve_targets(&mut targets, viewport);

        for t in &targets {
            prop_assert!(t.pos.x >= SCREEN_PADDING);
            prop_assert!(t.pos.y >= SCREEN_PADDING);
            prop_assert!(t.pos.x + t.size.x <= width - SCREEN_PADDING + 1e-3);
            prop_assert!(t.pos.y + t.size.y <= height / 2.0 - SCREEN_PADDING + 1e-3);
        }
    }

    #[test]
    fn targets_never_overlap_past_padding(
        bodies in prop::collection::vec(
            ((-200.0f32..1400.0, -200.0f32..700.0), (-4.0f32..4.0, -4.0f32..4.0)),
            1..9,
        ),
        width in 800.0f32..1600.0,
        height in 600.0f32..1200.0,
    ) {
        let mut targets: Vec<Target> = bodies
            .into_iter()
            .map(|((x, y), (vx, vy))| target_at(Vec2::new(x, y), Vec2::new(vx, vy)))
            .collect();

        resolve_targets(&mut targets, Viewport::new(width, height));

        for (i, a) in targets.iter().enumerate() {
            for b in &targets[i + 1..] {
                prop_assert!(overlap_depth(a, b) <= TARGET_PADDING + 1e-2);
            }
        }
    }

    #[test]
    fn every_retired_arrow_has_one_outcome(
        arrows in prop::collection::vec((-100.0f32..900.0, -100.0f32..700.0), 0..20),
        seed in any::<u64>(),
    ) {
        let viewport = Viewport::new(800.0, 600.0);
        let mut targets = vec![
            target_at(Vec2::new(100.0, 100.0), Vec2::ZERO),
            target_at(Vec2::new(500.0, 150.0), Vec2::ZERO),
        ];
        let mut projectiles: Vec<Projectile> = arrows
            .iter()
            .map(|&(x, y)| Projectile { pos: Vec2::new(x, y), angle: 0.0, speed: 5.0, strength: 0.0 })
            .collect();
        let before = projectiles.len();
        let mut rng = Pcg32::seed_from_u64(seed);

        let outcomes = resolve_projectiles(&mut projectiles, &mut targets, viewport, &mut rng);

        prop_assert_eq!(outcomes.len() + projectiles.len(), before);
        for arrow in &projectiles {
            prop_assert!(first_hit(arrow.pos, &targets).is_none());
            prop_assert!(!arrow.out_of_bounds(viewport));
        }
        for outcome in &outcomes {
            if let Outcome::Miss { position } = outcome {
                prop_assert!(position.y <= viewport.target_floor());
            }
        }
    }

    #[test]
    fn same_seed_same_session(seed in any::<u64>(), hold in 0usize..40) {
        let run = || {
            let mut state = SimState::new(
                seed,
                Viewport::new(1024.0, 768.0),
                &Manifest::default(),
                Difficulty::Veteran,
            );
            apply_input(&mut state, InputEvent::PointerDown(Vec2::ZERO));
            let mut log = Vec::new();
            for i in 0..120 {
                if i == hold {
                    apply_input(&mut state, InputEvent::PointerUp);
                }
                log.extend(tick(&mut state));
            }
            (state.targets.iter().map(|t| t.pos).collect::<Vec<_>>(), log)
        };
        prop_assert_eq!(run(), run());
    }
}
