//! Crab Tide - a beach arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tide, water collision, health, phases)
//! - `session`: Frame driver, pause-aware clock and command surface
//! - `persistence`: LocalStorage-backed key/value storage
//! - `tuning`: Data-driven game balance

pub mod persistence;
pub mod profile;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use profile::Profile;
pub use session::Session;
pub use settings::AudioSettings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Simulation ticks per second
    pub const TICKS_PER_SECOND: u64 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Shoreline Z at tide level 0
    pub const SHORE_Z_AT_LOW: f32 = -20.0;
    /// Shoreline Z travel from tide level 0 to tide level 1
    pub const SHORE_Z_SPAN: f32 = 58.0;

    /// Playable beach bounds
    pub const BEACH_MIN_X: f32 = -50.0;
    pub const BEACH_MAX_X: f32 = 50.0;
    pub const BEACH_MAX_Z: f32 = 38.0;

    /// Lateral bounds for menu and rave wandering
    pub const STROLL_MAX_X: f32 = 10.0;

    /// Where the crab waits on the main menu
    pub const MENU_SPOT: (f32, f32) = (0.0, 34.0);
    /// Where the crab sits while assets load
    pub const LOADING_SPOT: (f32, f32) = (0.0, 20.0);
    /// Fixed Z of the rave floor
    pub const RAVE_Z: f32 = 32.0;
    /// Safe point the crab runs to when a run ends
    pub const ENDING_TARGET: (f32, f32) = (0.0, 46.0);
}

/// Z position of the straight shoreline for a normalized tide level
#[inline]
pub fn shoreline_z(tide_level: f32) -> f32 {
    consts::SHORE_Z_AT_LOW + tide_level * consts::SHORE_Z_SPAN
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
