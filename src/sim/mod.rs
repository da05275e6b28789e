//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by shell ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod crab;
pub mod health;
pub mod phase;
pub mod shells;
pub mod state;
pub mod tick;
pub mod tide;
pub mod timer;
pub mod water;

pub use clock::{FixedStep, GameClock};
pub use crab::{Crab, EndingPath};
pub use phase::{EdgeKind, GamePhase, TransitionError};
pub use shells::Shell;
pub use state::{GameEvent, GameState, Snapshot};
pub use tick::{TickInput, tick};
pub use tide::{TidePhase, TideRange, TideSample};
pub use timer::{TimerAction, Timers};
pub use water::Shoreline;
