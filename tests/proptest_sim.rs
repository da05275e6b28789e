//! Property tests for the simulation.
//!
//! These use `proptest` to check that tide, health, flipping, movement and
//! shell collection keep their invariants for arbitrary inputs.

use crab_tide::Tuning;
use crab_tide::consts::*;
use crab_tide::sim::shells;
use crab_tide::sim::tide::{self, CyclePosition};
use crab_tide::sim::{Crab, GamePhase, health};
use glam::Vec2;
use proptest::prelude::*;

const PHASES: [GamePhase; 8] = [
    GamePhase::Enter,
    GamePhase::Loading,
    GamePhase::Ready,
    GamePhase::Playing,
    GamePhase::Ending,
    GamePhase::GameOver,
    GamePhase::Rave,
    GamePhase::RaveEnd,
];

fn phase_strategy() -> impl Strategy<Value = GamePhase> {
    (0..PHASES.len()).prop_map(|i| PHASES[i])
}

/// Finite positions on and around the beach
fn ground_point() -> impl Strategy<Value = Vec2> {
    (-80_000i32..80_000, -60_000i32..60_000).prop_map(|(x, z)| Vec2::new(x as f32 * 0.001, z as f32 * 0.001))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn tide_level_always_normalized(
        phase in phase_strategy(),
        run_ms in prop::option::of(0u64..400_000),
        ambient_ms in 0u64..1_000_000,
    ) {
        let run_secs = run_ms.map(|ms| ms as f64 / 1000.0);
        let sample = tide::sample(phase, run_secs, ambient_ms as f64 / 1000.0);
        prop_assert!((0.0..=1.0).contains(&sample.level), "level {}", sample.level);
    }

    #[test]
    fn run_level_within_cycle_band(run_ms in 0u64..120_000) {
        let pos = CyclePosition::at(run_ms as f64 / 1000.0);
        let range = tide::cycle_range(pos.index);
        let next = tide::cycle_range(pos.index + 1);
        let level = tide::run_level(pos);
        prop_assert!(level >= range.min.min(next.min) - 1e-5);
        prop_assert!(level <= range.max + 1e-5);
    }

    #[test]
    fn health_stays_normalized(
        steps in prop::collection::vec((any::<bool>(), any::<bool>(), 0u32..200), 1..400),
    ) {
        let tuning = Tuning::default();
        let mut h = 1.0f32;
        for (in_water, flipped, dt_ms) in steps {
            h = health::integrate(h, in_water, flipped, dt_ms as f32 / 1000.0, &tuning);
            prop_assert!((0.0..=1.0).contains(&h));
        }
    }

    #[test]
    fn flip_state_respects_thresholds(levels in prop::collection::vec(0u32..=1000, 1..200)) {
        let tuning = Tuning::default();
        let mut flipped = false;
        for level in levels {
            let h = level as f32 / 1000.0;
            let (next, _) = health::hysteresis(h, flipped, &tuning);
            if next && !flipped {
                prop_assert!(h <= tuning.flip_threshold);
            }
            if !next && flipped {
                prop_assert!(h >= tuning.revive_threshold);
            }
            flipped = next;
        }
    }

    #[test]
    fn collection_is_idempotent(crab in ground_point(), seed in any::<u64>()) {
        let tuning = Tuning::default();
        let mut field = shells::generate(60, seed);
        let first = shells::collect_near(&mut field, crab, &tuning);
        let second = shells::collect_near(&mut field, crab, &tuning);
        prop_assert!(second.is_empty());
        prop_assert_eq!(first.len(), field.iter().filter(|s| s.collected).count());
    }

    #[test]
    fn steering_stays_on_beach(
        start in ground_point(),
        targets in prop::collection::vec(ground_point(), 1..60),
        cycle in 0u32..8,
    ) {
        let min_z = tide::lower_bound_z(cycle);
        let mut crab = Crab::new(Vec2::new(
            start.x.clamp(BEACH_MIN_X, BEACH_MAX_X),
            start.y.clamp(min_z, BEACH_MAX_Z),
        ));
        for target in targets {
            for _ in 0..10 {
                crab.steer(target, SIM_DT, 12.0, min_z);
                prop_assert!(crab.vel.length() <= 12.0 + 1e-3);
                prop_assert!((BEACH_MIN_X..=BEACH_MAX_X).contains(&crab.pos.x));
                prop_assert!(crab.pos.y >= min_z - 1e-4 && crab.pos.y <= BEACH_MAX_Z);
            }
        }
    }
}

#[test]
fn cycle_ranges_are_monotonic() {
    for i in 0..10 {
        let a = tide::cycle_range(i);
        let b = tide::cycle_range(i + 1);
        assert!(b.min >= a.min && b.max >= a.max, "cycle {i}");
        assert!((a.max - a.min - 0.6).abs() < 1e-5);
    }
}
