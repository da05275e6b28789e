//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Stage order:
//! time, timers, tide (and the end-of-run trigger), crab movement, water,
//! health, flip hysteresis, shells, ending completion.

use glam::Vec2;

use super::crab::{ENDING_FOOTSTEP_SPEED, ENDING_STRIDE, MENU_STRIDE, RUN_STRIDE, WALKING_SPEED};
use super::health::{self, FlipChange};
use super::phase::GamePhase;
use super::shells;
use super::state::{GameEvent, GameState};
use super::tide::{self, CyclePosition, RunEnd};
use super::timer::TimerAction;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position on the ground plane (x, z), if the pointer is down
    /// or hovering over the beach
    pub target: Option<Vec2>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Nothing advances while paused, not even time
    if state.paused {
        return;
    }

    state.time_ticks += 1;

    run_timers(state);

    // Tide
    let sample = tide::sample(state.phase, state.run_secs(), state.ambient_secs());
    if sample.phase != state.tide_phase {
        state.events.push(GameEvent::TideChanged {
            phase: sample.phase,
        });
    }
    state.tide_level = sample.level;
    state.tide_phase = sample.phase;

    if state.phase == GamePhase::Playing {
        if let Some(end) = sample.cycle.and_then(tide::run_end) {
            if end == RunEnd::Overrun {
                log::warn!(
                    "Run clock overran the final cycle ({:.2}s), forcing ending",
                    state.run_secs().unwrap_or_default()
                );
            }
            state.advance_phase(GamePhase::Ending);
        }
    }

    let wave_time = state.ambient_secs() as f32;

    move_crab(state, input, sample.cycle, dt, wave_time);

    // Water
    state.in_water = state
        .shoreline
        .is_in_water(state.crab.pos, state.tide_level, wave_time);

    // Health and flipping
    if state.phase.simulates_health() {
        let before = state.health;
        state.health = health::integrate(
            state.health,
            state.in_water,
            state.flipped,
            dt,
            &state.tuning,
        );

        let threshold = state.tuning.flip_threshold;
        if before > threshold && state.health <= threshold {
            state.events.push(GameEvent::HealthDepleted);
        } else if before <= threshold && state.health > threshold {
            state.events.push(GameEvent::HealthRestored);
        }

        let (flipped, change) = health::hysteresis(state.health, state.flipped, &state.tuning);
        state.flipped = flipped;
        match change {
            Some(FlipChange::Flipped) => {
                log::debug!("Crab flipped at tick {}", state.time_ticks);
                state.crab.vel = Vec2::ZERO;
                state.crab.footstep_distance = 0.0;
                state.events.push(GameEvent::Flipped);
            }
            Some(FlipChange::Revived) => {
                log::debug!("Crab revived at tick {}", state.time_ticks);
                state.events.push(GameEvent::Revived);
            }
            None => {}
        }
    } else if state.phase == GamePhase::Ending {
        state.flipped = false;
    }

    // Shells are picked up in every phase but only score while playing
    let scoring = state.phase == GamePhase::Playing;
    for id in shells::collect_near(&mut state.shells, state.crab.pos, &state.tuning) {
        if scoring {
            state.add_score();
        }
        state.events.push(GameEvent::ShellCollected { id, scored: scoring });
    }

    // Ending dash complete
    if state.phase == GamePhase::Ending
        && state.crab.ending.as_ref().is_none_or(|path| path.is_finished())
    {
        state.crab.ending = None;
        state.advance_phase(GamePhase::GameOver);
    }
}

/// Fire due timers for the current phase epoch
fn run_timers(state: &mut GameState) {
    let epoch = state.phase_epoch;
    for action in state.timers.due(state.time_ticks, epoch) {
        // An earlier action in this batch already changed phase
        if state.phase_epoch != epoch {
            log::debug!("Dropping stale timer action {action:?}");
            break;
        }
        match action {
            TimerAction::EndRave => {
                if state.phase == GamePhase::Rave {
                    state.advance_phase(GamePhase::RaveEnd);
                }
            }
            TimerAction::Transition(target) => {
                if let Err(e) = state.request_transition(target) {
                    log::warn!("Deferred transition dropped: {e}");
                }
            }
        }
    }
}

/// Per-phase crab movement and footsteps
fn move_crab(
    state: &mut GameState,
    input: &TickInput,
    cycle: Option<CyclePosition>,
    dt: f32,
    wave_time: f32,
) {
    let tuning = &state.tuning;
    let crab = &mut state.crab;

    if state.flipped && state.phase.simulates_health() {
        // Washed toward shore while the tide rises, held while it falls
        if cycle.is_some_and(|c| c.is_rising()) {
            crab.rescue_drift(dt, tuning.rescue_speed);
        }
        crab.footstep_distance = 0.0;
        return;
    }

    match state.phase {
        GamePhase::Playing => {
            let min_z = cycle
                .map(|c| tide::lower_bound_z(c.index))
                .unwrap_or(SHORE_Z_AT_LOW);
            match input.target {
                Some(target) => crab.steer(target, dt, tuning.run_max_speed, min_z),
                None => crab.coast(dt, min_z),
            }

            let speed = crab.vel.length();
            if speed > WALKING_SPEED {
                if crab.stride(speed * dt, RUN_STRIDE) {
                    let pos = crab.pos;
                    let wet = state
                        .shoreline
                        .is_in_water(pos, state.tide_level, wave_time);
                    state.events.push(GameEvent::Footstep {
                        x: pos.x,
                        z: pos.y,
                        wet,
                    });
                }
            } else {
                crab.footstep_distance = 0.0;
            }
        }
        GamePhase::Enter => {
            let moved = input
                .target
                .map(|t| crab.stroll(t.x, dt, tuning.menu_max_speed))
                .unwrap_or(0.0);
            if moved > 0.0 {
                if crab.stride(moved, MENU_STRIDE) {
                    state.events.push(GameEvent::Footstep {
                        x: crab.pos.x,
                        z: crab.pos.y,
                        wet: false,
                    });
                }
            } else {
                crab.footstep_distance = 0.0;
            }
        }
        GamePhase::Rave | GamePhase::RaveEnd => {
            if let Some(t) = input.target {
                crab.stroll(t.x, dt, tuning.rave_max_speed);
            }
            crab.pos.y = RAVE_Z;
        }
        GamePhase::Loading => {
            crab.pos.x = 0.0;
        }
        GamePhase::Ending => {
            if let Some(path) = crab.ending.as_mut() {
                crab.pos = path.advance(dt);
                if crab.stride(ENDING_FOOTSTEP_SPEED * dt, ENDING_STRIDE) {
                    state.events.push(GameEvent::Footstep {
                        x: crab.pos.x,
                        z: crab.pos.y,
                        wet: false,
                    });
                }
            }
        }
        GamePhase::Ready | GamePhase::GameOver => {}
    }
}
