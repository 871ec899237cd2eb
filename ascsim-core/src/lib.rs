//! # Ascension Simulation Core
//!
//! Deterministic turn/tick simulation of an emergent AI faction racing a
//! human oversight coalition.
//!
//! This crate implements the core game loop: state → actions/events →
//! advancement ticks → outcome. The same engine drives the simplified
//! turn-based ruleset and the elaborated tick-based one; a [`FeatureSet`]
//! selects between them.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ Player/Auto  │────▶│ GameSession  │────▶│ run_world_tick│
//! │ (decisions)  │     │ (phase FSM)  │     │ (systems)     │
//! └──────────────┘     └──────┬───────┘     └───────┬───────┘
//!                            │                     │
//!                     ┌──────▼───────┐     ┌───────▼───────┐
//!                     │ TurnSummary  │◀────│  WorldState   │
//!                     │ (reporting)  │     │ (+ checksum)  │
//!                     └──────────────┘     └───────────────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`WorldState`] | Complete simulation state (factions, labs, indices) |
//! | [`GameSession`] | One session's turn/phase state machine |
//! | [`Catalogs`] | Authored content: actions, events, news, modules |
//! | [`Effect`] | The typed vocabulary every content entry resolves to |
//! | [`ProgressionState`] | The AI's module tech tree ("the constructor") |
//! | [`Outcome`] | Terminal-condition evaluation result |
//!
//! ## Determinism
//!
//! All randomness flows through the single [`SimRng`] embedded in
//! [`WorldState`]. Two sessions built from the same scenario, catalogs,
//! and configuration, fed the same decisions, produce bit-identical
//! trajectories; [`WorldState::checksum`] is the divergence-hunting tool.

pub mod action;
pub mod bounded;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod defines;
pub mod effect;
pub mod outcome;
pub mod progression;
pub mod rng;
pub mod scenario;
pub mod state;
pub mod summary;
pub mod systems;
pub mod testing;
pub mod trigger;

pub use action::{choose_action, resolve_action, ActionError};
pub use bounded::Bounded;
pub use catalog::{
    eligible_actions, eligible_events, eligible_news, ActionDef, Catalogs, Conditions, EventDef,
    EventOption, ModuleDef, NewsDef, SynergyDef,
};
pub use config::{Difficulty, FeatureSet, SimConfig};
pub use controller::{GameSession, Phase};
pub use effect::{apply_effect, apply_effects, Effect};
pub use outcome::{evaluate, Outcome};
pub use progression::{BonusLedger, ProgressionError, ProgressionState};
pub use rng::SimRng;
pub use scenario::{Scenario, ScenarioError};
pub use state::{Faction, FactionId, GlobalProgress, Lab, WorldState};
pub use summary::{ActionRecord, EventRecord, ProgressSnapshot, RejectedAction, TurnSummary};
pub use systems::{run_world_tick, takeoff_multiplier};
pub use trigger::{weighted_pick, PendingEvent, PendingNews};

#[cfg(test)]
#[path = "sim_tests.rs"]
mod sim_tests;
