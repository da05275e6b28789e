//! Player profile: high score and banked shells
//!
//! Persisted to LocalStorage. Shells banked at the end of each run are the
//! currency spent on raves.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, StorageError};

/// Persistent player totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    /// Best single-run score
    pub high_score: u32,
    /// Shells banked across all runs, minus shells spent
    pub total_shells: u32,
}

impl Profile {
    /// Storage key
    const STORAGE_KEY: &'static str = "crab_tide_profile";

    /// Deduct `amount` shells if the balance covers it
    ///
    /// Check and deduction happen in one call, so a failed spend leaves the
    /// balance untouched.
    pub fn spend_shells(&mut self, amount: u32) -> bool {
        match self.total_shells.checked_sub(amount) {
            Some(rest) => {
                self.total_shells = rest;
                true
            }
            None => false,
        }
    }

    /// Raise the high score if `score` beats it; true when raised
    pub fn record_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    /// Add a finished run's score to the shell balance
    pub fn bank(&mut self, score: u32) {
        self.total_shells = self.total_shells.saturating_add(score);
        self.record_score(score);
    }

    /// Load the profile (defaults if missing or corrupt)
    pub fn load() -> Self {
        persistence::load_json(Self::STORAGE_KEY)
    }

    pub fn save(&self) -> Result<(), StorageError> {
        persistence::save_json(Self::STORAGE_KEY, self)?;
        log::info!(
            "Profile saved (high score {}, {} shells)",
            self.high_score,
            self.total_shells
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_shells() {
        let mut profile = Profile {
            high_score: 0,
            total_shells: 99,
        };
        assert!(!profile.spend_shells(100));
        assert_eq!(profile.total_shells, 99);
        assert!(profile.spend_shells(99));
        assert_eq!(profile.total_shells, 0);
        assert!(profile.spend_shells(0));
    }

    #[test]
    fn test_record_score() {
        let mut profile = Profile::default();
        assert!(profile.record_score(3));
        assert!(!profile.record_score(3));
        assert!(!profile.record_score(1));
        assert_eq!(profile.high_score, 3);
    }

    #[test]
    fn test_bank() {
        let mut profile = Profile {
            high_score: 10,
            total_shells: 5,
        };
        profile.bank(12);
        assert_eq!(profile.total_shells, 17);
        assert_eq!(profile.high_score, 12);
    }

    #[test]
    fn test_save_load() {
        let profile = Profile {
            high_score: 42,
            total_shells: 300,
        };
        profile.save().unwrap();
        assert_eq!(Profile::load(), profile);
    }

    #[test]
    fn test_partial_json() {
        let profile: Profile = serde_json::from_str(r#"{"totalShells":8}"#).unwrap();
        assert_eq!(profile.total_shells, 8);
        assert_eq!(profile.high_score, 0);
    }
}
