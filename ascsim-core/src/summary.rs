//! Per-turn reporting structures.

use crate::outcome::Outcome;
use crate::state::{FactionId, WorldState};
use serde::{Deserialize, Serialize};

/// One resolved action, as it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub faction: FactionId,
    pub action_id: String,
}

/// A player action that cleared submission checks but failed during
/// resolution, because an earlier action in the same turn changed the
/// world out from under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedAction {
    pub faction: FactionId,
    pub action_id: String,
    pub reason: String,
}

/// An event that resolved this turn and which option it took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_id: String,
    pub option_index: usize,
}

/// The headline indices at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub fci: f64,
    pub ari: f64,
    pub rsi: f64,
    pub automation: f64,
    pub governance: f64,
    pub suspicion: f64,
    pub autonomy: f64,
}

impl ProgressSnapshot {
    pub fn capture(state: &WorldState) -> Self {
        Self {
            fci: state.progress.fci,
            ari: state.progress.ari,
            rsi: state.progress.rsi,
            automation: state.progress.automation,
            governance: state.progress.governance,
            suspicion: state.ai.suspicion.get(),
            autonomy: state.ai.autonomy.get(),
        }
    }
}

/// Everything that happened in one turn, for logs, UIs, and batch reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnSummary {
    pub turn: u64,
    pub actions: Vec<ActionRecord>,
    /// Actions that failed mid-turn, with the refusal reason, for the UI
    pub rejected: Vec<RejectedAction>,
    pub event: Option<EventRecord>,
    pub news: Option<String>,
    pub snapshot: ProgressSnapshot,
    pub outcome: Outcome,
    /// Present on turns where the checksum cadence fired
    pub checksum: Option<u64>,
}

impl TurnSummary {
    pub fn begin(turn: u64, state: &WorldState) -> Self {
        Self {
            turn,
            actions: Vec::new(),
            rejected: Vec::new(),
            event: None,
            news: None,
            snapshot: ProgressSnapshot::capture(state),
            outcome: Outcome::Undecided,
            checksum: None,
        }
    }
}
