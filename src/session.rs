//! Frame driver and command surface
//!
//! A [`Session`] owns the pause-aware clock, the fixed-step accumulator and
//! the game state. The platform calls [`Session::frame`] once per animation
//! frame with a wall-clock timestamp; UI code reads [`Session::snapshot`],
//! drains events and sends commands back.

use glam::Vec2;

use crate::consts::SIM_DT;
use crate::profile::Profile;
use crate::settings::AudioSettings;
use crate::sim::{
    FixedStep, GameClock, GameEvent, GamePhase, GameState, Snapshot, TickInput, TransitionError,
    tick,
};
use crate::tuning::Tuning;

/// One running game
pub struct Session {
    clock: GameClock,
    step: FixedStep,
    state: GameState,
    input: TickInput,
    settings: AudioSettings,
    /// Timestamp of the most recent frame (ms)
    last_now_ms: f64,
    /// Effective seconds at the most recent frame
    last_effective_secs: f64,
    /// Profile as last written to storage
    saved_profile: Profile,
}

impl Session {
    /// Start a session with the stored profile and audio settings
    pub fn new(tuning: Tuning, now_ms: f64) -> Self {
        Self::with_profile(tuning, Profile::load(), AudioSettings::load(), now_ms)
    }

    pub fn with_profile(
        tuning: Tuning,
        profile: Profile,
        settings: AudioSettings,
        now_ms: f64,
    ) -> Self {
        log::info!(
            "Session started (high score {}, {} shells)",
            profile.high_score,
            profile.total_shells
        );
        Self {
            clock: GameClock::new(now_ms),
            step: FixedStep::new(),
            state: GameState::new(tuning, profile),
            input: TickInput::default(),
            settings,
            last_now_ms: now_ms,
            last_effective_secs: 0.0,
            saved_profile: profile,
        }
    }

    /// Advance to wall-clock time `now_ms`; returns the number of ticks run
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let effective = self.clock.effective_secs(now_ms);
        let dt = (effective - self.last_effective_secs).max(0.0) as f32;
        self.last_now_ms = now_ms;
        self.last_effective_secs = effective;

        let steps = self.step.advance(dt);
        self.state.skip_ticks(self.step.take_skipped_ticks());
        for _ in 0..steps {
            tick(&mut self.state, &self.input, SIM_DT);
        }

        self.sync_pause();
        self.persist_profile();
        steps
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Take a player-triggered transition now
    pub fn request_phase_transition(&mut self, target: GamePhase) -> Result<(), TransitionError> {
        let result = self.state.request_transition(target);
        if let Err(e) = &result {
            log::debug!("Transition to {} refused: {e}", target.as_str());
        }
        self.sync_pause();
        self.persist_profile();
        result
    }

    /// Attempt a player transition after `delay_secs` of effective time
    ///
    /// Cancelled by any phase change in the meantime.
    pub fn schedule_phase_transition(&mut self, target: GamePhase, delay_secs: f32) {
        self.state.schedule_transition(target, delay_secs);
    }

    /// Pause or resume the run; false if refused
    pub fn set_paused(&mut self, paused: bool) -> bool {
        if !self.state.set_paused(paused) {
            return false;
        }
        self.sync_pause();
        log::info!("{}", if paused { "Paused" } else { "Resumed" });
        true
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Pointer position on the ground plane, or None when off the beach
    pub fn set_crab_target_input(&mut self, target: Option<Vec2>) {
        self.input.target = target;
    }

    /// Spend banked shells; false (unchanged) if the balance is short
    pub fn spend_shells(&mut self, amount: u32) -> bool {
        let spent = self.state.spend_shells(amount);
        self.persist_profile();
        spent
    }

    pub fn profile(&self) -> &Profile {
        &self.state.profile
    }

    pub fn audio_settings(&self) -> &AudioSettings {
        &self.settings
    }

    /// Replace and persist the audio settings
    pub fn set_audio_settings(&mut self, mut settings: AudioSettings) {
        settings.clamp_volumes();
        self.settings = settings;
        if let Err(e) = self.settings.save() {
            log::warn!("Failed to save audio settings: {e}");
        }
    }

    /// Keep the clock's pause interval in step with the state's flag
    fn sync_pause(&mut self) {
        match (self.state.paused, self.clock.is_paused()) {
            (true, false) => self.clock.pause(self.last_now_ms),
            (false, true) => self.clock.resume(self.last_now_ms),
            _ => {}
        }
    }

    fn persist_profile(&mut self) {
        if self.state.profile == self.saved_profile {
            return;
        }
        match self.state.profile.save() {
            Ok(()) => self.saved_profile = self.state.profile,
            Err(e) => log::warn!("Failed to save profile: {e}"),
        }
    }
}
