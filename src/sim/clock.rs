//! Pause-aware wall clock and fixed-step accumulator
//!
//! The clock is fed wall-clock timestamps (milliseconds) by the platform and
//! reports effective elapsed time: wall time since start minus every paused
//! interval. Every time-dependent system derives its time from this one
//! value, so pausing freezes all of them together.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Wall clock with a paused-duration accumulator
#[derive(Debug, Clone)]
pub struct GameClock {
    /// Wall-clock timestamp of the first reading
    start_ms: f64,
    /// Total milliseconds spent paused (closed intervals only)
    paused_total_ms: f64,
    /// Wall-clock timestamp at which the current pause began
    paused_since_ms: Option<f64>,
}

impl GameClock {
    pub fn new(now_ms: f64) -> Self {
        Self {
            start_ms: now_ms,
            paused_total_ms: 0.0,
            paused_since_ms: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_since_ms.is_some()
    }

    /// Start a pause interval (no-op if already paused)
    pub fn pause(&mut self, now_ms: f64) {
        if self.paused_since_ms.is_none() {
            self.paused_since_ms = Some(now_ms);
        }
    }

    /// Close the current pause interval (no-op if not paused)
    pub fn resume(&mut self, now_ms: f64) {
        if let Some(since) = self.paused_since_ms.take() {
            self.paused_total_ms += (now_ms - since).max(0.0);
        }
    }

    /// Total paused milliseconds, including an open interval
    pub fn paused_ms(&self, now_ms: f64) -> f64 {
        let open = self
            .paused_since_ms
            .map(|since| (now_ms - since).max(0.0))
            .unwrap_or(0.0);
        self.paused_total_ms + open
    }

    /// Effective elapsed seconds since the clock started
    pub fn effective_secs(&self, now_ms: f64) -> f64 {
        ((now_ms - self.start_ms - self.paused_ms(now_ms)) / 1000.0).max(0.0)
    }
}

/// Turns variable frame deltas into a whole number of fixed steps
///
/// Time beyond `MAX_FRAME_DT` is not simulated but is not lost either: it
/// collects in `skipped` and is handed back as whole ticks the clock jumps
/// over, so tide and run time keep pace with the wall clock on slow frames.
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
    skipped: f64,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame delta and return how many fixed steps to run now
    ///
    /// The delta is clamped so a long stall (hidden tab, debugger) cannot
    /// trigger a burst of catch-up steps, and at most `MAX_SUBSTEPS` are
    /// released per frame.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = frame_dt.max(0.0);
        let clamped = frame_dt.min(MAX_FRAME_DT);
        self.skipped += f64::from(frame_dt) - f64::from(clamped);
        self.accumulator += clamped;

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        steps
    }

    /// Leftover time not yet consumed by a step
    pub fn remainder(&self) -> f32 {
        self.accumulator
    }

    /// Whole ticks of clamped-off time to advance the clock by without
    /// simulating them; the fraction carries over
    pub fn take_skipped_ticks(&mut self) -> u64 {
        let step = f64::from(SIM_DT);
        // Absorb f32 rounding so 0.15 s reads as nine ticks, not eight
        let ticks = ((self.skipped + 1e-6) / step).floor().max(0.0);
        self.skipped = (self.skipped - ticks * step).max(0.0);
        ticks as u64
    }
}
