//! End-to-end scenarios driven through the public `Session` API.

use crab_tide::sim::{GameEvent, GamePhase, TransitionError};
use crab_tide::{AudioSettings, Profile, Session, Tuning};
use glam::Vec2;
use proptest::prelude::*;

const FRAME_MS: f64 = 20.0;

fn session_with(total_shells: u32) -> Session {
    Session::with_profile(
        Tuning::default(),
        Profile {
            high_score: 0,
            total_shells,
        },
        AudioSettings::default(),
        0.0,
    )
}

fn start_run(s: &mut Session) {
    s.request_phase_transition(GamePhase::Loading).unwrap();
    s.request_phase_transition(GamePhase::Ready).unwrap();
    s.request_phase_transition(GamePhase::Playing).unwrap();
}

/// Run frames until `done` or the frame budget runs out; returns the clock
fn run_until(s: &mut Session, mut now: f64, frames: u32, done: impl Fn(&Session) -> bool) -> f64 {
    for _ in 0..frames {
        if done(s) {
            break;
        }
        now += FRAME_MS;
        s.frame(now);
    }
    now
}

#[test]
fn full_run_reaches_game_over_and_banks() {
    let mut s = session_with(0);
    start_run(&mut s);
    // Park the pointer high on the dry beach
    s.set_crab_target_input(Some(Vec2::new(0.0, 38.0)));

    let now = run_until(&mut s, 0.0, 4_000, |s| s.phase() == GamePhase::GameOver);
    assert_eq!(s.phase(), GamePhase::GameOver);
    // Cycle 5 peaks at 55 s; the dash to safety takes under a second
    assert!((55_000.0..57_000.0).contains(&now), "ended at {now}ms");

    let phases: Vec<_> = s
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::PhaseChanged { to, .. } => Some(to),
            _ => None,
        })
        .collect();
    assert_eq!(
        phases,
        vec![
            GamePhase::Loading,
            GamePhase::Ready,
            GamePhase::Playing,
            GamePhase::Ending,
            GamePhase::GameOver
        ]
    );

    let snap = s.snapshot();
    assert_eq!(snap.total_shells, snap.score);
    assert!((snap.crab_x).abs() < 1e-3 && (snap.crab_z - 46.0).abs() < 1e-3);
}

#[test]
fn rave_requires_and_spends_shells() {
    let mut s = session_with(99);
    start_run(&mut s);
    // Shortcut to the game-over screen
    let now = run_until(&mut s, 0.0, 4_000, |s| s.phase() == GamePhase::GameOver);
    let banked = s.profile().total_shells;
    assert!(banked >= 99);

    assert!(!s.spend_shells(banked + 1));
    assert_eq!(s.profile().total_shells, banked);

    s.request_phase_transition(GamePhase::Rave).unwrap();
    assert_eq!(s.profile().total_shells, banked - 50);
    assert!((s.snapshot().crab_z - 32.0).abs() < 1e-4);

    // Rave runs its course
    run_until(&mut s, now, 7_000, |s| s.phase() == GamePhase::RaveEnd);
    assert_eq!(s.phase(), GamePhase::RaveEnd);
    assert_eq!(s.snapshot().crab_x, 0.0);
}

#[test]
fn rave_refused_without_shells() {
    let mut s = session_with(0);
    start_run(&mut s);
    // No pointer: the crab idles at the loading spot and only the ending dash
    // can pick anything up
    s.set_crab_target_input(None);
    run_until(&mut s, 0.0, 4_000, |s| s.phase() == GamePhase::GameOver);
    assert_eq!(s.phase(), GamePhase::GameOver);
    let banked = s.profile().total_shells;
    assert!(banked < 50, "banked {banked}");

    assert!(matches!(
        s.request_phase_transition(GamePhase::Rave),
        Err(TransitionError::InsufficientShells { need: 50, .. })
    ));
    assert_eq!(s.phase(), GamePhase::GameOver);
    assert_eq!(s.profile().total_shells, banked);
}

#[test]
fn slow_frames_keep_wall_clock_pace() {
    let mut s = session_with(0);
    start_run(&mut s);
    s.set_crab_target_input(Some(Vec2::new(0.0, 38.0)));

    // 4 fps: each frame simulates 0.1 s and skips the other 0.15 s
    let mut now = 0.0;
    while now < 30_500.0 {
        now += 250.0;
        s.frame(now);
    }
    assert_eq!(s.snapshot().cycle, Some(3));

    while now < 54_500.0 {
        now += 250.0;
        s.frame(now);
    }
    assert_eq!(s.phase(), GamePhase::Playing);

    // The final peak lands at 55 s of wall time, give or take one frame
    while now < 55_250.0 {
        now += 250.0;
        s.frame(now);
    }
    assert_eq!(s.phase(), GamePhase::Ending);
}

#[test]
fn hidden_tab_hitch_jumps_the_tide() {
    let mut s = session_with(0);
    start_run(&mut s);
    s.set_crab_target_input(Some(Vec2::new(0.0, 38.0)));
    let now = run_until(&mut s, 0.0, 50, |_| false);

    // One 30 s gap between frames: the run clock follows the wall clock
    s.frame(now + 30_000.0);
    assert_eq!(s.phase(), GamePhase::Playing);
    assert_eq!(s.snapshot().cycle, Some(3));

    // A gap past the final cycle forces the ending
    s.frame(now + 100_000.0);
    assert_eq!(s.phase(), GamePhase::Ending);
}

#[test]
fn ui_cannot_force_simulation_edges() {
    let mut s = session_with(0);
    start_run(&mut s);
    assert!(matches!(
        s.request_phase_transition(GamePhase::Ending),
        Err(TransitionError::NotPlayerTriggered { .. })
    ));
    assert!(matches!(
        s.request_phase_transition(GamePhase::Rave),
        Err(TransitionError::InvalidTransition { .. })
    ));
    assert_eq!(s.phase(), GamePhase::Playing);
}

#[test]
fn scheduled_transition_cancelled_by_main_menu() {
    let mut s = session_with(0);
    start_run(&mut s);
    let now = run_until(&mut s, 0.0, 10, |_| false);

    // The UI queues a transition that would be valid from Loading, then the
    // player leaves before it fires
    s.schedule_phase_transition(GamePhase::Ready, 1.0);
    s.request_phase_transition(GamePhase::Enter).unwrap();
    s.request_phase_transition(GamePhase::Loading).unwrap();

    run_until(&mut s, now, 200, |_| false);
    assert_eq!(s.phase(), GamePhase::Loading);
}

#[test]
fn drowning_flips_after_four_seconds() {
    let mut s = session_with(0);
    start_run(&mut s);
    // Drag the crab as far out to sea as the tide allows
    s.set_crab_target_input(Some(Vec2::new(0.0, -60.0)));

    let mut flipped_at = None;
    let mut now = 0.0;
    for _ in 0..400 {
        now += FRAME_MS;
        s.frame(now);
        if s
            .drain_events()
            .iter()
            .any(|e| *e == GameEvent::Flipped)
        {
            flipped_at = Some(now);
            break;
        }
    }
    let t = flipped_at.expect("crab never flipped");
    // The walk out costs a little dry time before the drain starts
    assert!((3_900.0..=6_000.0).contains(&t), "flipped at {t}ms");
    assert!(s.snapshot().flipped);
    assert!(s.snapshot().health <= 0.01);
}

#[test]
fn first_cycle_starts_at_high_tide() {
    let mut s = session_with(0);
    start_run(&mut s);
    s.frame(FRAME_MS);
    assert!((s.snapshot().tide_level - 0.6).abs() < 0.01);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// A pause of any length leaves the trajectory unchanged
    #[test]
    fn pause_does_not_change_trajectory(
        pause_at in 1u32..200,
        pause_frames in 1u32..500,
        xs in prop::collection::vec(-400i32..400, 300),
    ) {
        let mut plain = session_with(0);
        let mut paused = session_with(0);
        start_run(&mut plain);
        start_run(&mut paused);

        let mut now_plain = 0.0;
        let mut now_paused = 0.0;
        for (i, x) in xs.iter().enumerate() {
            let target = Some(Vec2::new(*x as f32 * 0.1, 10.0));
            plain.set_crab_target_input(target);
            paused.set_crab_target_input(target);

            if i as u32 == pause_at {
                prop_assert!(paused.set_paused(true));
                for _ in 0..pause_frames {
                    now_paused += FRAME_MS;
                    prop_assert_eq!(paused.frame(now_paused), 0);
                }
                prop_assert!(paused.set_paused(false));
            }

            now_plain += FRAME_MS;
            now_paused += FRAME_MS;
            plain.frame(now_plain);
            paused.frame(now_paused);
        }

        prop_assert_eq!(plain.state().time_ticks, paused.state().time_ticks);
        prop_assert_eq!(plain.snapshot(), paused.snapshot());
    }
}
