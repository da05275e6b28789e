//! Crab movement
//!
//! The crab moves differently in each phase: free steering toward the
//! pointer while playing, sideways shuffling on the menu and the rave floor,
//! a passive drift toward shore while flipped, and a scripted dash to safety
//! when a run ends.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Inside this distance the crab stops chasing the pointer
pub const DEADZONE: f32 = 0.8;
/// Distance at which the crab reaches full speed
pub const DISTANCE_AT_MAX_SPEED: f32 = 6.0;
/// Velocity smoothing rate (1/s)
pub const VELOCITY_DAMPING: f32 = 10.0;
/// Extra damping inside the deadzone to kill jitter
pub const DEADZONE_DAMPING_BOOST: f32 = 2.5;
/// Lateral offsets smaller than this are ignored when strolling
pub const STROLL_TOLERANCE: f32 = 0.1;
/// Minimum speed that counts as walking for footsteps
pub const WALKING_SPEED: f32 = 0.2;

/// Distance between footsteps while playing
pub const RUN_STRIDE: f32 = 1.3;
/// Distance between footsteps on the main menu
pub const MENU_STRIDE: f32 = 1.0;
/// Distance between footsteps during the ending dash
pub const ENDING_STRIDE: f32 = 0.6;
/// Notional footstep speed during the ending dash
pub const ENDING_FOOTSTEP_SPEED: f32 = 8.0;

/// Scripted run from wherever the crab was to the safe point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndingPath {
    pub start: Vec2,
    pub target: Vec2,
    /// Seconds the dash takes
    pub duration: f32,
    /// Seconds elapsed so far
    pub elapsed: f32,
}

impl EndingPath {
    pub fn new(start: Vec2, target: Vec2, speed: f32) -> Self {
        let duration = start.distance(target) / speed;
        Self {
            start,
            target,
            duration,
            elapsed: 0.0,
        }
    }

    /// Linear progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    /// Advance the dash; returns the new position
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        self.elapsed += dt;
        let p = self.progress();
        // Ease out cubic
        let eased = 1.0 - (1.0 - p).powi(3);
        self.start.lerp(self.target, eased)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crab {
    /// Ground-plane position (x, z)
    pub pos: Vec2,
    /// Smoothed velocity while steering
    pub vel: Vec2,
    /// Distance walked since the last footstep
    pub footstep_distance: f32,
    /// Active scripted dash, if any
    pub ending: Option<EndingPath>,
}

impl Crab {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            footstep_distance: 0.0,
            ending: None,
        }
    }

    /// Teleport and drop all motion state
    pub fn place(&mut self, pos: Vec2) {
        *self = Self::new(pos);
    }

    /// Steer toward `target` with smoothed velocity (playing phase)
    ///
    /// `min_z` is the seaward limit for the current tide cycle.
    pub fn steer(&mut self, target: Vec2, dt: f32, max_speed: f32, min_z: f32) {
        let to_target = target - self.pos;
        let distance = to_target.length();

        let desired = if distance > DEADZONE {
            let ramp = (distance - DEADZONE) / (DISTANCE_AT_MAX_SPEED - DEADZONE).max(1e-4);
            to_target / distance * max_speed * ramp.min(1.0)
        } else {
            Vec2::ZERO
        };

        let boost = if distance < DEADZONE {
            DEADZONE_DAMPING_BOOST
        } else {
            1.0
        };
        let alpha = 1.0 - (-dt * VELOCITY_DAMPING * boost).exp();
        self.vel = self.vel.lerp(desired, alpha).clamp_length_max(max_speed);

        let next = self.pos + self.vel * dt;
        self.pos = Vec2::new(
            next.x.clamp(BEACH_MIN_X, BEACH_MAX_X),
            next.y.clamp(min_z.min(BEACH_MAX_Z), BEACH_MAX_Z),
        );
    }

    /// Coast to a stop when there is no pointer target
    pub fn coast(&mut self, dt: f32, min_z: f32) {
        let alpha = 1.0 - (-dt * VELOCITY_DAMPING).exp();
        self.vel = self.vel.lerp(Vec2::ZERO, alpha);
        let next = self.pos + self.vel * dt;
        self.pos = Vec2::new(
            next.x.clamp(BEACH_MIN_X, BEACH_MAX_X),
            next.y.clamp(min_z.min(BEACH_MAX_Z), BEACH_MAX_Z),
        );
    }

    /// Shuffle sideways toward `target_x` (menu and rave)
    ///
    /// Returns the lateral distance moved.
    pub fn stroll(&mut self, target_x: f32, dt: f32, max_speed: f32) -> f32 {
        let offset = target_x - self.pos.x;
        if offset.abs() <= STROLL_TOLERANCE {
            return 0.0;
        }

        let speed = if offset.abs() > DEADZONE {
            let ramp = (offset.abs() - DEADZONE) / (DISTANCE_AT_MAX_SPEED - DEADZONE);
            max_speed * ramp.min(1.0)
        } else {
            0.0
        };

        let new_x = (self.pos.x + offset.signum() * speed * dt).clamp(-STROLL_MAX_X, STROLL_MAX_X);
        let moved = (new_x - self.pos.x).abs();
        self.pos.x = new_x;
        moved
    }

    /// Wash a flipped crab toward shore
    pub fn rescue_drift(&mut self, dt: f32, speed: f32) {
        self.vel = Vec2::ZERO;
        self.pos.y = (self.pos.y + speed * dt).min(BEACH_MAX_Z);
    }

    /// Add walked distance; true when a footstep is due
    pub fn stride(&mut self, travelled: f32, stride: f32) -> bool {
        self.footstep_distance += travelled;
        if self.footstep_distance >= stride {
            self.footstep_distance = 0.0;
            true
        } else {
            false
        }
    }
}
