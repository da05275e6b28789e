//! Health drain/regeneration and the flip hysteresis

use crate::tuning::Tuning;

/// Outcome of a hysteresis check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipChange {
    /// Health ran out, crab flipped onto its back
    Flipped,
    /// Health recovered past the revive threshold
    Revived,
}

/// Integrate health over one step
///
/// Submerged and upright: drain over `drain_secs`. Dry: regenerate over
/// `regen_secs`. A flipped crab in water neither drains nor regenerates.
pub fn integrate(health: f32, in_water: bool, flipped: bool, dt: f32, tuning: &Tuning) -> f32 {
    let next = if in_water && health > 0.0 && !flipped {
        health - dt / tuning.drain_secs
    } else if !in_water && health < 1.0 {
        health + dt / tuning.regen_secs
    } else {
        health
    };
    next.clamp(0.0, 1.0)
}

/// Apply the flip hysteresis band
///
/// Returns the new flipped flag and the change, if any. Between the two
/// thresholds the current flag is kept, so a crab that flipped at zero stays
/// flipped until health climbs all the way to `revive_threshold`.
pub fn hysteresis(health: f32, flipped: bool, tuning: &Tuning) -> (bool, Option<FlipChange>) {
    if !flipped && health <= tuning.flip_threshold {
        (true, Some(FlipChange::Flipped))
    } else if flipped && health >= tuning.revive_threshold {
        (false, Some(FlipChange::Revived))
    } else {
        (flipped, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_drains_in_water() {
        let t = Tuning::default();
        let h = integrate(1.0, true, false, 1.0, &t);
        assert!((h - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_regenerates_on_sand() {
        let t = Tuning::default();
        let h = integrate(0.0, false, false, 6.0, &t);
        assert!((h - 0.5).abs() < 1e-6);
        // Flipped crabs still regenerate on dry sand
        let h = integrate(0.0, false, true, 6.0, &t);
        assert!((h - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_flipped_does_not_drain() {
        let t = Tuning::default();
        assert_eq!(integrate(0.4, true, true, DT, &t), 0.4);
    }

    #[test]
    fn test_clamped() {
        let t = Tuning::default();
        assert_eq!(integrate(0.001, true, false, 1.0, &t), 0.0);
        assert_eq!(integrate(0.999, false, false, 1.0, &t), 1.0);
    }

    #[test]
    fn test_hysteresis_band() {
        let t = Tuning::default();
        assert_eq!(hysteresis(0.01, false, &t), (true, Some(FlipChange::Flipped)));
        assert_eq!(hysteresis(0.02, false, &t), (false, None));
        // Inside the band a flipped crab stays flipped
        assert_eq!(hysteresis(0.03, true, &t), (true, None));
        assert_eq!(hysteresis(0.05, true, &t), (false, Some(FlipChange::Revived)));
    }

    #[test]
    fn test_no_premature_unflip() {
        let t = Tuning::default();
        let mut flipped = true;
        // Wobble between 0.0 and 0.03: never revives
        for &h in &[0.0, 0.02, 0.03, 0.01, 0.0, 0.03] {
            let (f, change) = hysteresis(h, flipped, &t);
            assert!(f);
            assert_eq!(change, None);
            flipped = f;
        }
        let (f, change) = hysteresis(0.05, flipped, &t);
        assert!(!f);
        assert_eq!(change, Some(FlipChange::Revived));
    }
}
