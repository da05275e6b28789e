//! Water collision against the wavy shoreline
//!
//! The ocean is a row of deep rectangular bands laid side by side along X.
//! Each band's front edge sits on the shoreline for the current tide level,
//! pushed forward or back by a travelling sine wave, so the waterline reads
//! as a wave rather than a straight line. Two oversized bands cover the
//! off-map flanks.
//!
//! [`Shoreline::is_in_water`] is the only water test in the crate: health
//! drain, footstep sounds and the in-water flag in snapshots all call it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{lerp, shoreline_z};

/// Bands covering the playable beach
pub const IN_BOUNDS_BANDS: usize = 50;
/// Playable bands plus one flank band on each side
pub const TOTAL_BANDS: usize = IN_BOUNDS_BANDS + 2;
/// Width of a playable band (slight overlap closes seams)
pub const BAND_WIDTH: f32 = 100.0 / IN_BOUNDS_BANDS as f32 + 0.15;
/// Width of each flank band
pub const FLANK_WIDTH: f32 = 160.0;
/// Centre X of the flank bands
pub const FLANK_X: f32 = 130.0;
/// How far each band extends seaward behind its front edge
pub const BAND_DEPTH: f32 = 200.0;

/// Peak shoreline displacement from the wave (Z units)
pub const WAVE_AMPLITUDE: f32 = 5.0;
/// Spatial frequency of the wave along X
pub const WAVE_FREQUENCY: f32 = 0.02;
/// Temporal speed of the wave (radians per second)
pub const WAVE_SPEED: f32 = 1.0;

/// One lateral slice of ocean
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Band {
    /// Centre X
    pub x: f32,
    /// Extent along X
    pub width: f32,
    /// Per-band phase offset, fixed when the shoreline is built
    pub phase_offset: f32,
}

impl Band {
    /// Z of the band's front edge (the local waterline)
    pub fn front_z(&self, tide_level: f32, time: f32) -> f32 {
        let phase = self.x * WAVE_FREQUENCY
            + tide_level * std::f32::consts::TAU
            + self.phase_offset
            + time * WAVE_SPEED;
        shoreline_z(tide_level) + phase.sin() * WAVE_AMPLITUDE
    }

    /// Whether a ground-plane point lies inside the band's footprint
    pub fn contains(&self, pos: Vec2, tide_level: f32, time: f32) -> bool {
        let half_width = self.width / 2.0;
        if pos.x < self.x - half_width || pos.x > self.x + half_width {
            return false;
        }
        let front = self.front_z(tide_level, time);
        pos.y <= front && pos.y >= front - BAND_DEPTH
    }
}

/// The full animated shoreline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shoreline {
    bands: Vec<Band>,
}

impl Shoreline {
    /// Build the bands; `seed` fixes the per-band phase jitter
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut bands = Vec::with_capacity(TOTAL_BANDS);

        for i in 0..TOTAL_BANDS {
            let (x, width) = if i == 0 {
                (-FLANK_X, FLANK_WIDTH)
            } else if i == TOTAL_BANDS - 1 {
                (FLANK_X, FLANK_WIDTH)
            } else {
                let t = (i - 1) as f32 / (IN_BOUNDS_BANDS - 1) as f32;
                (lerp(-50.0, 50.0, t), BAND_WIDTH)
            };

            // Roughly one full wave across the beach, jittered by ±5%
            let jitter = 0.95 + rng.random::<f32>() * 0.1;
            let phase_offset = (x / 50.0) * std::f32::consts::TAU * jitter;

            bands.push(Band {
                x,
                width,
                phase_offset,
            });
        }

        Self { bands }
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Whether `pos` (x, z) is under water for this tide level and wave time
    pub fn is_in_water(&self, pos: Vec2, tide_level: f32, time: f32) -> bool {
        self.bands
            .iter()
            .any(|band| band.contains(pos, tide_level, time))
    }

    /// Local waterline Z at lateral position `x`, if any band covers it
    #[cfg(test)]
    fn waterline_at(&self, x: f32, tide_level: f32, time: f32) -> Option<f32> {
        self.bands
            .iter()
            .find(|band| (x - band.x).abs() <= band.width / 2.0)
            .map(|band| band.front_z(tide_level, time))
    }
}
