//! Audio preferences
//!
//! Persisted separately from the profile in LocalStorage. The simulation
//! never reads these; they travel with the session so the presentation layer
//! has one place to fetch and store them.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, StorageError};

/// Which mixer bus a volume applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AudioBus {
    Music,
    Sfx,
}

impl AudioBus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioBus::Music => "music",
            AudioBus::Sfx => "sfx",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "music" => Some(AudioBus::Music),
            "sfx" | "effects" => Some(AudioBus::Sfx),
            _ => None,
        }
    }
}

/// Volume and mute preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AudioSettings {
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub music_enabled: bool,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub sfx_enabled: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            music_volume: 0.7,
            music_enabled: true,
            sfx_volume: 1.0,
            sfx_enabled: true,
        }
    }
}

impl AudioSettings {
    /// Storage key
    const STORAGE_KEY: &'static str = "crab_tide_audio";

    /// Set a bus volume, clamped to [0, 1]
    pub fn set_volume(&mut self, bus: AudioBus, volume: f32) {
        let volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        match bus {
            AudioBus::Music => self.music_volume = volume,
            AudioBus::Sfx => self.sfx_volume = volume,
        }
    }

    pub fn set_enabled(&mut self, bus: AudioBus, enabled: bool) {
        match bus {
            AudioBus::Music => self.music_enabled = enabled,
            AudioBus::Sfx => self.sfx_enabled = enabled,
        }
    }

    /// Gain to apply on a bus (0 when muted)
    pub fn effective_volume(&self, bus: AudioBus) -> f32 {
        match bus {
            AudioBus::Music if self.music_enabled => self.music_volume,
            AudioBus::Sfx if self.sfx_enabled => self.sfx_volume,
            _ => 0.0,
        }
    }

    /// Force both volumes back into range
    pub fn clamp_volumes(&mut self) {
        let (music, sfx) = (self.music_volume, self.sfx_volume);
        self.set_volume(AudioBus::Music, music);
        self.set_volume(AudioBus::Sfx, sfx);
    }

    /// Load settings (defaults if missing or corrupt)
    pub fn load() -> Self {
        let mut settings: Self = persistence::load_json(Self::STORAGE_KEY);
        settings.clamp_volumes();
        settings
    }

    pub fn save(&self) -> Result<(), StorageError> {
        persistence::save_json(Self::STORAGE_KEY, self)?;
        log::info!("Audio settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_clamped() {
        let mut s = AudioSettings::default();
        s.set_volume(AudioBus::Music, 1.7);
        assert_eq!(s.music_volume, 1.0);
        s.set_volume(AudioBus::Sfx, -0.2);
        assert_eq!(s.sfx_volume, 0.0);
        s.set_volume(AudioBus::Sfx, f32::NAN);
        assert_eq!(s.sfx_volume, 0.0);
    }

    #[test]
    fn test_muted_bus_is_silent() {
        let mut s = AudioSettings::default();
        assert_eq!(s.effective_volume(AudioBus::Music), 0.7);
        s.set_enabled(AudioBus::Music, false);
        assert_eq!(s.effective_volume(AudioBus::Music), 0.0);
        assert_eq!(s.effective_volume(AudioBus::Sfx), 1.0);
    }

    #[test]
    fn test_bus_names() {
        assert_eq!(AudioBus::from_str("SFX"), Some(AudioBus::Sfx));
        assert_eq!(AudioBus::from_str(AudioBus::Music.as_str()), Some(AudioBus::Music));
        assert_eq!(AudioBus::from_str("voice"), None);
    }

    #[test]
    fn test_load_reclamps() {
        crate::persistence::storage::write(
            AudioSettings::STORAGE_KEY,
            r#"{"musicVolume":3.0,"sfxEnabled":false}"#,
        )
        .unwrap();
        let s = AudioSettings::load();
        assert_eq!(s.music_volume, 1.0);
        assert!(!s.sfx_enabled);
        assert_eq!(s.sfx_volume, 1.0);
    }
}
