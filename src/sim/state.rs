//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives here. Phase transitions are
//! applied through [`GameState`] methods so every entry contract runs in one
//! place, atomically with respect to the tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::crab::{Crab, EndingPath};
use super::phase::{GamePhase, TransitionError};
use super::shells::{self, Shell};
use super::tide::TidePhase;
use super::timer::{TimerAction, Timers};
use super::water::Shoreline;
use crate::consts::*;
use crate::profile::Profile;
use crate::tuning::Tuning;

/// Discrete things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// `scored` is false outside the playing phase
    ShellCollected { id: u32, scored: bool },
    Flipped,
    Revived,
    /// Health dropped through the flip threshold
    HealthDepleted,
    /// Health climbed back above the flip threshold
    HealthRestored,
    Footstep { x: f32, z: f32, wet: bool },
    TideChanged { phase: TidePhase },
    NewHighScore { score: u32 },
    /// Score banked at game over
    RunFinished { score: u32, total_shells: u32 },
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub phase: GamePhase,
    pub crab_x: f32,
    pub crab_z: f32,
    pub tide_level: f32,
    pub tide_phase: TidePhase,
    pub health: f32,
    pub flipped: bool,
    pub in_water: bool,
    pub score: u32,
    pub high_score: u32,
    pub total_shells: u32,
    pub paused: bool,
    /// Cycle index of the active run, if any
    pub cycle: Option<u32>,
    /// Shells still on the beach
    pub shells_remaining: usize,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub shoreline: Shoreline,
    /// Current phase
    pub phase: GamePhase,
    /// Bumped on every transition; stamps timers
    pub phase_epoch: u64,
    /// Effective clock in ticks (frozen while paused); advanced by every
    /// simulated step and by frame time too long to simulate
    pub time_ticks: u64,
    /// Tick at which the current run started
    pub run_start_tick: Option<u64>,
    pub crab: Crab,
    pub tide_level: f32,
    pub tide_phase: TidePhase,
    pub health: f32,
    pub flipped: bool,
    /// Result of the shared water test at the crab's position
    pub in_water: bool,
    pub score: u32,
    pub paused: bool,
    /// Shell field (sorted by id)
    pub shells: Vec<Shell>,
    pub timers: Timers,
    /// Persisted totals (high score, banked shells)
    pub profile: Profile,
    /// Set once the run's score has been banked
    score_banked: bool,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state on the main menu
    pub fn new(tuning: Tuning, profile: Profile) -> Self {
        let shoreline = Shoreline::new(tuning.shoreline_seed);
        let shells = shells::generate(tuning.shell_count, tuning.shell_seed);

        Self {
            tuning,
            shoreline,
            phase: GamePhase::Enter,
            phase_epoch: 0,
            time_ticks: 0,
            run_start_tick: None,
            crab: Crab::new(Vec2::new(MENU_SPOT.0, MENU_SPOT.1)),
            tide_level: 0.0,
            tide_phase: TidePhase::Low,
            health: 1.0,
            flipped: false,
            in_water: false,
            score: 0,
            paused: false,
            shells,
            timers: Timers::new(),
            profile,
            score_banked: false,
            events: Vec::new(),
        }
    }

    /// Effective seconds since the state was created
    pub fn ambient_secs(&self) -> f64 {
        self.time_ticks as f64 / TICKS_PER_SECOND as f64
    }

    /// Effective seconds since the run started
    pub fn run_secs(&self) -> Option<f64> {
        self.run_start_tick
            .map(|start| self.time_ticks.saturating_sub(start) as f64 / TICKS_PER_SECOND as f64)
    }

    /// Move the clock forward `ticks` without simulating them
    ///
    /// Tide, timers and the end-of-run trigger see the jump on the next tick.
    pub fn skip_ticks(&mut self, ticks: u64) {
        if self.paused || ticks == 0 {
            return;
        }
        log::debug!("Clock skipped {ticks} ticks of frame time");
        self.time_ticks += ticks;
    }

    pub fn secs_to_ticks(secs: f32) -> u64 {
        (secs.max(0.0) * TICKS_PER_SECOND as f32).round() as u64
    }

    /// Take a player-triggered edge
    ///
    /// Edges into the rave spend the rave cost atomically: on failure nothing
    /// is mutated.
    pub fn request_transition(&mut self, target: GamePhase) -> Result<(), TransitionError> {
        self.phase.check_player_transition(target)?;

        if target == GamePhase::Rave {
            let need = self.tuning.rave_cost;
            if !self.profile.spend_shells(need) {
                return Err(TransitionError::InsufficientShells {
                    have: self.profile.total_shells,
                    need,
                });
            }
        }

        self.enter_phase(target);
        Ok(())
    }

    /// Take a simulation-triggered edge
    ///
    /// Returns false (and logs) if the graph has no such edge.
    pub fn advance_phase(&mut self, target: GamePhase) -> bool {
        if self.phase.edge_to(target).is_none() {
            log::warn!(
                "Ignoring transition {} -> {}",
                self.phase.as_str(),
                target.as_str()
            );
            return false;
        }
        self.enter_phase(target);
        true
    }

    /// Queue a player transition to be attempted after `delay_secs`
    pub fn schedule_transition(&mut self, target: GamePhase, delay_secs: f32) {
        let fires_at = self.time_ticks + Self::secs_to_ticks(delay_secs);
        self.timers
            .schedule(fires_at, self.phase_epoch, TimerAction::Transition(target));
    }

    /// Pause or resume; pausing is only allowed mid-run
    ///
    /// Returns false if the request was refused.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        if paused && self.phase != GamePhase::Playing {
            return false;
        }
        self.paused = paused;
        true
    }

    /// Deduct shells from the profile; false (unchanged) if short
    pub fn spend_shells(&mut self, amount: u32) -> bool {
        self.profile.spend_shells(amount)
    }

    /// Record score for a collected shell
    pub(crate) fn add_score(&mut self) {
        self.score += 1;
        if self.profile.record_score(self.score) {
            self.events.push(GameEvent::NewHighScore { score: self.score });
        }
    }

    fn enter_phase(&mut self, target: GamePhase) {
        let from = self.phase;
        self.phase = target;
        self.phase_epoch += 1;
        self.timers.cancel_all();

        if target.starts_run() {
            self.run_start_tick.get_or_insert(self.time_ticks);
        } else if !target.has_run_clock() {
            self.run_start_tick = None;
        }

        match target {
            GamePhase::Enter => self.reset_run(),
            GamePhase::Ready if matches!(from, GamePhase::GameOver | GamePhase::RaveEnd) => {
                self.reset_run()
            }
            GamePhase::Loading => self.crab.place(Vec2::new(LOADING_SPOT.0, LOADING_SPOT.1)),
            GamePhase::Ending => {
                self.flipped = false;
                let safe_spot = Vec2::new(ENDING_TARGET.0, ENDING_TARGET.1);
                let start = self.crab.pos;
                self.crab.place(start);
                self.crab.ending =
                    Some(EndingPath::new(start, safe_spot, self.tuning.ending_speed));
            }
            GamePhase::GameOver => self.bank_score(),
            GamePhase::Rave => {
                self.crab.vel = Vec2::ZERO;
                self.crab.pos.y = RAVE_Z;
                let fires_at =
                    self.time_ticks + Self::secs_to_ticks(self.tuning.rave_duration_secs);
                self.timers
                    .schedule(fires_at, self.phase_epoch, TimerAction::EndRave);
            }
            GamePhase::RaveEnd => self.crab.pos.x = 0.0,
            _ => {}
        }

        log::info!("Phase {} -> {}", from.as_str(), target.as_str());
        self.events.push(GameEvent::PhaseChanged { from, to: target });
    }

    /// Clear everything tied to a single run; profile totals survive
    fn reset_run(&mut self) {
        self.run_start_tick = None;
        self.score = 0;
        self.health = 1.0;
        self.flipped = false;
        self.in_water = false;
        self.paused = false;
        self.score_banked = false;
        shells::reset(&mut self.shells);
        self.crab.place(Vec2::new(MENU_SPOT.0, MENU_SPOT.1));
    }

    fn bank_score(&mut self) {
        if self.score_banked {
            return;
        }
        self.score_banked = true;
        self.profile.bank(self.score);
        log::info!(
            "Banked {} shells (total {})",
            self.score,
            self.profile.total_shells
        );
        self.events.push(GameEvent::RunFinished {
            score: self.score,
            total_shells: self.profile.total_shells,
        });
    }

    /// Whether the current run's score has been banked
    pub fn score_banked(&self) -> bool {
        self.score_banked
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            crab_x: self.crab.pos.x,
            crab_z: self.crab.pos.y,
            tide_level: self.tide_level,
            tide_phase: self.tide_phase,
            health: self.health,
            flipped: self.flipped,
            in_water: self.in_water,
            score: self.score,
            high_score: self.profile.high_score,
            total_shells: self.profile.total_shells,
            paused: self.paused,
            cycle: self
                .run_secs()
                .filter(|_| self.phase.has_run_clock())
                .map(|secs| super::tide::CyclePosition::at(secs).index),
            shells_remaining: self.shells.iter().filter(|s| !s.collected).count(),
        }
    }
}
