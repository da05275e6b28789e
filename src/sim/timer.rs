//! Deferred phase actions
//!
//! Timers are stamped with the phase epoch they were scheduled in. Every
//! transition bumps the epoch, so a timer that outlives its phase can never
//! fire into the wrong one.

use serde::{Deserialize, Serialize};

use super::phase::GamePhase;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    /// Rave time is up
    EndRave,
    /// Take a deferred transition (re-validated when it fires)
    Transition(GamePhase),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer {
    fires_at_tick: u64,
    epoch: u64,
    action: TimerAction,
}

/// Pending timers, in scheduling order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timers {
    pending: Vec<Timer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire at `fires_at_tick`, owned by `epoch`
    pub fn schedule(&mut self, fires_at_tick: u64, epoch: u64, action: TimerAction) {
        self.pending.push(Timer {
            fires_at_tick,
            epoch,
            action,
        });
    }

    /// Drop every pending timer
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the actions due at `tick`
    ///
    /// Timers from an older epoch are discarded without firing.
    pub fn due(&mut self, tick: u64, epoch: u64) -> Vec<TimerAction> {
        let mut fired = Vec::new();
        self.pending.retain(|timer| {
            if timer.epoch != epoch {
                return false;
            }
            if timer.fires_at_tick <= tick {
                fired.push(timer.action);
                return false;
            }
            true
        });
        fired
    }
}
