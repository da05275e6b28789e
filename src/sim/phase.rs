//! Game phase state machine
//!
//! Phases form a directed graph. Each edge is either taken by the player
//! (menu buttons) or by the simulation itself (time up, animation finished,
//! rave over). Anything not listed in [`GamePhase::edge_to`] is rejected.

use serde::{Deserialize, Serialize};

/// Current phase of the game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Main menu, crab wanders under the pointer
    #[default]
    Enter,
    /// Assets loading
    Loading,
    /// Waiting for the start button
    Ready,
    /// Active run against the tide
    Playing,
    /// Scripted dash to safety after the last cycle peaks
    Ending,
    /// Run summary
    GameOver,
    /// Timed rave minigame
    Rave,
    /// Rave summary
    RaveEnd,
}

/// Who is allowed to take a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Requested through a UI command
    Player,
    /// Taken by the simulation tick or a timer
    Simulation,
}

/// Why a requested transition was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("no transition from {from:?} to {to:?}")]
    InvalidTransition { from: GamePhase, to: GamePhase },

    #[error("transition from {from:?} to {to:?} is driven by the simulation")]
    NotPlayerTriggered { from: GamePhase, to: GamePhase },

    #[error("not enough shells: have {have}, need {need}")]
    InsufficientShells { have: u32, need: u32 },
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Enter => "enter",
            GamePhase::Loading => "loading",
            GamePhase::Ready => "ready",
            GamePhase::Playing => "playing",
            GamePhase::Ending => "ending",
            GamePhase::GameOver => "gameOver",
            GamePhase::Rave => "rave",
            GamePhase::RaveEnd => "raveEnd",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "enter" => Some(GamePhase::Enter),
            "loading" => Some(GamePhase::Loading),
            "ready" => Some(GamePhase::Ready),
            "playing" => Some(GamePhase::Playing),
            "ending" => Some(GamePhase::Ending),
            "gameOver" => Some(GamePhase::GameOver),
            "rave" => Some(GamePhase::Rave),
            "raveEnd" => Some(GamePhase::RaveEnd),
            _ => None,
        }
    }

    /// The edge from `self` to `target`, if the graph has one
    pub fn edge_to(self, target: GamePhase) -> Option<EdgeKind> {
        use EdgeKind::*;
        use GamePhase::*;

        match (self, target) {
            (Enter, Loading) => Some(Player),
            (Loading, Ready) => Some(Player),
            (Ready, Playing) => Some(Player),
            (Playing, Ending) => Some(Simulation),
            // Main menu from the pause popup
            (Playing, Enter) => Some(Player),
            (Ending, GameOver) => Some(Simulation),
            (GameOver, Ready) => Some(Player),
            (GameOver, Enter) => Some(Player),
            (GameOver, Rave) => Some(Player),
            (Rave, RaveEnd) => Some(Simulation),
            (Rave, Enter) => Some(Player),
            (RaveEnd, Rave) => Some(Player),
            (RaveEnd, Ready) => Some(Player),
            (RaveEnd, Enter) => Some(Player),
            _ => None,
        }
    }

    /// Validate a transition requested from the UI
    pub fn check_player_transition(self, target: GamePhase) -> Result<(), TransitionError> {
        match self.edge_to(target) {
            Some(EdgeKind::Player) => Ok(()),
            Some(EdgeKind::Simulation) => Err(TransitionError::NotPlayerTriggered {
                from: self,
                to: target,
            }),
            None => Err(TransitionError::InvalidTransition {
                from: self,
                to: target,
            }),
        }
    }

    /// Phases in which a run clock is alive
    pub fn has_run_clock(&self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Ending | GamePhase::Rave)
    }

    /// Phases in which health and flipping are simulated
    pub fn simulates_health(&self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Rave)
    }

    /// Phases in which a new run clock starts on entry
    pub fn starts_run(&self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Rave)
    }

    /// Phases entered through a full run reset
    pub fn resets_run(&self) -> bool {
        matches!(self, GamePhase::Enter | GamePhase::Ready)
    }
}
