//! Tide cycle model
//!
//! A run is split into 10 second cycles. Over the first six cycles the band
//! the tide oscillates in climbs up the beach; each cycle rises from its own
//! minimum to its maximum, then falls to the *next* cycle's minimum. That
//! ratchet is what makes the beach shrink over a run.
//!
//! Everything here is a pure function of time and phase.

use serde::{Deserialize, Serialize};

use super::phase::GamePhase;
use crate::{lerp, shoreline_z};

/// Length of one tide cycle in seconds
pub const CYCLE_SECS: f64 = 10.0;
/// Cycles over which the tide band ratchets upward
pub const RATCHET_CYCLES: u32 = 6;
/// Index of the last cycle of a run; its peak ends the run
pub const FINAL_CYCLE: u32 = 5;
/// Top of the band in cycle 0
pub const BASE_MAX: f32 = 0.6;
/// Total climb of the band across the ratchet cycles
pub const RATCHET_SPAN: f32 = 0.4;
/// Band used before a run starts
pub const AMBIENT_RANGE: TideRange = TideRange { min: 0.0, max: 0.6 };

const SNAP_EPSILON: f32 = 0.001;

/// Coarse tide label for UI and sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TidePhase {
    #[default]
    Low,
    Rising,
    High,
    Falling,
}

impl TidePhase {
    /// Bucket a cycle progress value
    pub fn from_progress(progress: f32) -> Self {
        if progress < 0.05 {
            TidePhase::Low
        } else if progress < 0.5 {
            TidePhase::Rising
        } else if progress > 0.95 {
            TidePhase::High
        } else {
            TidePhase::Falling
        }
    }
}

/// Band a cycle oscillates within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TideRange {
    pub min: f32,
    pub max: f32,
}

/// Band for a given cycle index
pub fn cycle_range(cycle: u32) -> TideRange {
    if cycle >= RATCHET_CYCLES {
        return TideRange {
            min: RATCHET_SPAN,
            max: BASE_MAX + RATCHET_SPAN,
        };
    }
    let climb = cycle as f32 * (RATCHET_SPAN / RATCHET_CYCLES as f32);
    TideRange {
        min: climb,
        max: BASE_MAX + climb,
    }
}

/// Where a run is within the cycle sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclePosition {
    /// Cycle index (0-based)
    pub index: u32,
    /// Raw progress through the cycle, [0, 1)
    pub progress: f32,
    /// Progress after the cycle-0 bias (cycle 0 starts at high tide)
    pub adjusted: f32,
}

impl CyclePosition {
    /// Position at `run_secs` of effective run time
    pub fn at(run_secs: f64) -> Self {
        let run_secs = run_secs.max(0.0);
        let index = (run_secs / CYCLE_SECS).floor() as u32;
        let progress = ((run_secs % CYCLE_SECS) / CYCLE_SECS) as f32;
        let adjusted = if index == 0 {
            (0.5 + progress).min(1.0)
        } else {
            progress
        };
        Self {
            index,
            progress,
            adjusted,
        }
    }

    /// True during the first half of the (adjusted) cycle
    pub fn is_rising(&self) -> bool {
        self.adjusted < 0.5
    }
}

/// Tide level during an active run (playing or rave)
pub fn run_level(pos: CyclePosition) -> f32 {
    let range = cycle_range(pos.index);
    let next_min = cycle_range(pos.index + 1).min;
    let p = pos.adjusted;

    if p < SNAP_EPSILON {
        return range.min;
    }
    if p > 1.0 - SNAP_EPSILON {
        return next_min;
    }

    if p < 0.5 {
        lerp(range.min, range.max, p * 2.0)
    } else {
        lerp(range.max, next_min, (p - 0.5) * 2.0)
    }
}

/// Symmetric cosine swell within `range` (cosmetic, no gameplay effect)
pub fn cosine_level(secs: f64, range: TideRange) -> f32 {
    let t = ((secs.max(0.0) % CYCLE_SECS) / CYCLE_SECS) as f32;
    let swell = 0.5 - 0.5 * (std::f32::consts::TAU * t).cos();
    lerp(range.min, range.max, swell)
}

/// Lowest Z the player may walk to in the given cycle
pub fn lower_bound_z(cycle: u32) -> f32 {
    shoreline_z(cycle_range(cycle).min)
}

/// Why the tide ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    /// Peak of the final cycle reached
    FinalPeak,
    /// Run clock went past the final cycle (missed the peak)
    Overrun,
}

/// Check whether the tide has ended a run at this position
pub fn run_end(pos: CyclePosition) -> Option<RunEnd> {
    if pos.index > FINAL_CYCLE {
        Some(RunEnd::Overrun)
    } else if pos.index == FINAL_CYCLE && pos.progress >= 0.5 {
        Some(RunEnd::FinalPeak)
    } else {
        None
    }
}

/// Tide state for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TideSample {
    pub level: f32,
    pub phase: TidePhase,
    /// Set while a run clock is alive
    pub cycle: Option<CyclePosition>,
}

/// Sample the tide for the current phase
///
/// `run_secs` is effective time since the run started (None when no run is
/// active); `ambient_secs` is effective time since the session started and
/// drives the cosmetic swell.
pub fn sample(phase: GamePhase, run_secs: Option<f64>, ambient_secs: f64) -> TideSample {
    let run = run_secs
        .filter(|_| phase.has_run_clock())
        .map(CyclePosition::at);

    let (level, label) = match (phase, run) {
        (GamePhase::Playing | GamePhase::Rave, Some(pos)) => {
            (run_level(pos), TidePhase::from_progress(pos.adjusted))
        }
        (GamePhase::Ending, Some(pos)) => (
            cosine_level(ambient_secs, cycle_range(FINAL_CYCLE + 1)),
            TidePhase::from_progress(pos.adjusted),
        ),
        _ => {
            let t = ((ambient_secs.max(0.0) % CYCLE_SECS) / CYCLE_SECS) as f32;
            (
                cosine_level(ambient_secs, AMBIENT_RANGE),
                TidePhase::from_progress(t),
            )
        }
    };

    TideSample {
        level: level.clamp(0.0, 1.0),
        phase: label,
        cycle: run,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_first_cycle_starts_at_peak() {
        let level = run_level(CyclePosition::at(0.0));
        assert!(approx(level, 0.6), "expected 0.6, got {level}");
    }

    #[test]
    fn test_first_cycle_falls_then_holds() {
        // Halfway through the first falling half
        let mid = run_level(CyclePosition::at(2.5));
        let next_min = cycle_range(1).min;
        assert!(approx(mid, (0.6 + next_min) / 2.0));
        // Second half of cycle 0 is clamped at the next minimum
        assert!(approx(run_level(CyclePosition::at(7.0)), next_min));
    }

    #[test]
    fn test_ranges_ratchet() {
        for i in 0..RATCHET_CYCLES {
            let r = cycle_range(i);
            let next = cycle_range(i + 1);
            assert!(r.min <= r.max);
            assert!(approx(r.max - r.min, 0.6));
            assert!(next.min >= r.min);
            assert!(next.max >= r.max);
        }
        assert!(approx(cycle_range(6).min, 0.4));
        assert!(approx(cycle_range(6).max, 1.0));
        assert_eq!(cycle_range(42), cycle_range(6));
    }

    #[test]
    fn test_falling_half_targets_next_minimum() {
        // End of cycle 2 snaps to cycle 3's minimum, not cycle 2's
        let level = run_level(CyclePosition::at(29.9999));
        assert!(approx(level, cycle_range(3).min));
        assert!(level > cycle_range(2).min);
    }

    #[test]
    fn test_seams_are_continuous() {
        for i in 1..RATCHET_CYCLES {
            let before = run_level(CyclePosition::at(i as f64 * CYCLE_SECS - 1e-4));
            let after = run_level(CyclePosition::at(i as f64 * CYCLE_SECS));
            assert!(approx(before, after), "seam {i}: {before} vs {after}");
        }
    }

    #[test]
    fn test_rising_peak() {
        // Cycle 3 peaks at its max halfway through
        let level = run_level(CyclePosition::at(35.0));
        assert!(approx(level, cycle_range(3).max));
    }

    #[test]
    fn test_run_end_at_final_peak() {
        assert_eq!(run_end(CyclePosition::at(54.9)), None);
        assert_eq!(run_end(CyclePosition::at(55.0)), Some(RunEnd::FinalPeak));
        assert_eq!(run_end(CyclePosition::at(61.0)), Some(RunEnd::Overrun));
        // Earlier cycles never end the run, even at their peak
        assert_eq!(run_end(CyclePosition::at(45.0)), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(TidePhase::from_progress(0.01), TidePhase::Low);
        assert_eq!(TidePhase::from_progress(0.3), TidePhase::Rising);
        assert_eq!(TidePhase::from_progress(0.7), TidePhase::Falling);
        assert_eq!(TidePhase::from_progress(0.97), TidePhase::High);
    }

    #[test]
    fn test_sample_without_run_is_ambient() {
        let s = sample(GamePhase::Enter, None, 5.0);
        assert!(s.cycle.is_none());
        assert!(approx(s.level, AMBIENT_RANGE.max));

        // A stale run clock is ignored outside run phases
        let s = sample(GamePhase::GameOver, Some(12.0), 0.0);
        assert!(s.cycle.is_none());
        assert!(approx(s.level, AMBIENT_RANGE.min));
    }

    #[test]
    fn test_sample_ending_uses_final_band() {
        let s = sample(GamePhase::Ending, Some(56.0), 5.0);
        assert!(approx(s.level, 1.0));
        let s = sample(GamePhase::Ending, Some(56.0), 0.0);
        assert!(approx(s.level, 0.4));
    }

    #[test]
    fn test_lower_bound_follows_cycle_minimum() {
        assert!(approx(lower_bound_z(0), -20.0));
        assert!(approx(lower_bound_z(6), -20.0 + 0.4 * 58.0));
    }
}
