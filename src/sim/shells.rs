//! Shell layout and collection

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Seaward edge of the shell field (Z)
pub const FIELD_MIN_Z: f32 = -20.0;
/// Landward edge of the shell field (Z)
pub const FIELD_MAX_Z: f32 = 30.0;
/// Lateral half-width of the field at its seaward edge
pub const FIELD_HALF_WIDTH_MAX: f32 = 50.0;
/// Lateral half-width of the field at its landward edge
pub const FIELD_HALF_WIDTH_MIN: f32 = 10.0;

/// A collectible shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shell {
    pub id: u32,
    /// Ground-plane position (x, z)
    pub pos: Vec2,
    pub collected: bool,
}

/// Scatter `count` shells with a fixed-seed RNG
///
/// Squaring the first draw biases shells toward the seaward edge, where
/// the tide makes them dangerous to reach; the lateral spread narrows
/// toward the dry beach.
pub fn generate(count: u32, seed: u64) -> Vec<Shell> {
    let mut rng = Pcg32::seed_from_u64(seed);

    (0..count)
        .map(|id| {
            let r: f32 = rng.random();
            let biased = r * r;
            let z = FIELD_MIN_Z + biased * (FIELD_MAX_Z - FIELD_MIN_Z);

            let half_width = (FIELD_HALF_WIDTH_MAX - FIELD_HALF_WIDTH_MIN) * (1.0 - biased)
                + FIELD_HALF_WIDTH_MIN;
            let x = (rng.random::<f32>() * 2.0 - 1.0) * half_width;

            Shell {
                id,
                pos: Vec2::new(x, z),
                collected: false,
            }
        })
        .collect()
}

/// Mark every shell within pickup range of `crab` as collected
///
/// Returns the ids collected this call. Already-collected shells are
/// skipped, so calling twice in a row never reports a shell twice.
pub fn collect_near(shells: &mut [Shell], crab: Vec2, tuning: &Tuning) -> Vec<u32> {
    let radius_sq = tuning.pickup_radius_sq();
    let mut collected = Vec::new();

    for shell in shells.iter_mut().filter(|s| !s.collected) {
        if shell.pos.distance_squared(crab) <= radius_sq {
            shell.collected = true;
            collected.push(shell.id);
        }
    }

    collected
}

/// Put every shell back on the beach
pub fn reset(shells: &mut [Shell]) {
    for shell in shells {
        shell.collected = false;
    }
}
