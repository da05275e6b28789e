//! Data-driven game balance
//!
//! Every value has a default matching the shipped game; a JSON document can
//! override any subset of them.

use serde::{Deserialize, Serialize};

/// Errors raised while loading a tuning document
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("tuning document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tuning value `{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("revive threshold {revive} must be above flip threshold {flip}")]
    InvertedHysteresis { flip: f32, revive: f32 },
}

/// Balance knobs for health, scoring, movement and the rave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seconds of continuous submersion that drain a full health bar
    pub drain_secs: f32,
    /// Seconds on dry sand that refill an empty health bar
    pub regen_secs: f32,
    /// Health at or below which the crab flips over
    pub flip_threshold: f32,
    /// Health at or above which a flipped crab rights itself
    pub revive_threshold: f32,

    /// Number of shells scattered on the beach
    pub shell_count: u32,
    /// Seed for the shell layout (fixed so every run sees the same beach)
    pub shell_seed: u64,
    /// Seed for the per-band shoreline wave jitter
    pub shoreline_seed: u64,
    /// Crab pickup radius
    pub crab_radius: f32,
    /// Shell pickup radius
    pub shell_radius: f32,

    /// Shells spent to start (or continue) a rave
    pub rave_cost: u32,
    /// Length of a rave in seconds
    pub rave_duration_secs: f32,

    /// Top crab speed while playing (units/s)
    pub run_max_speed: f32,
    /// Top crab speed wandering on the main menu
    pub menu_max_speed: f32,
    /// Top crab speed on the rave floor
    pub rave_max_speed: f32,
    /// Speed of the scripted dash to safety when a run ends
    pub ending_speed: f32,
    /// Speed at which a flipped crab is washed toward shore
    pub rescue_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            drain_secs: 4.0,
            regen_secs: 12.0,
            flip_threshold: 0.01,
            revive_threshold: 0.05,

            shell_count: 150,
            shell_seed: 0x00c0_ffee_c0ab,
            shoreline_seed: 0x5ea_5ea5,
            crab_radius: 0.8,
            shell_radius: 0.4,

            rave_cost: 50,
            rave_duration_secs: 120.0,

            run_max_speed: 12.0,
            menu_max_speed: 5.0,
            rave_max_speed: 8.0,
            ending_speed: 13.0,
            rescue_speed: 5.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the values the simulation divides by or compares against
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("drain_secs", self.drain_secs),
            ("regen_secs", self.regen_secs),
            ("crab_radius", self.crab_radius),
            ("shell_radius", self.shell_radius),
            ("rave_duration_secs", self.rave_duration_secs),
            ("ending_speed", self.ending_speed),
        ];
        for (field, value) in positive {
            if value <= 0.0 || value.is_nan() {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        if self.revive_threshold <= self.flip_threshold {
            return Err(TuningError::InvertedHysteresis {
                flip: self.flip_threshold,
                revive: self.revive_threshold,
            });
        }
        Ok(())
    }

    /// Squared distance at which the crab picks up a shell
    pub fn pickup_radius_sq(&self) -> f32 {
        let r = self.crab_radius + self.shell_radius;
        r * r
    }
}
