//! Per-tick world advancement systems.
//!
//! Executed once per tick after actions and events resolve. Every rate in
//! `defines` is written per turn; systems multiply by `dt = 1 /
//! ticks_per_turn` so trajectories are invariant to how finely the caller
//! subdivides a turn.

pub mod capability;
pub mod drift;
pub mod labs;
pub mod regen;
pub mod suspicion;
pub mod takeoff;

pub use capability::{capability_pressure, run_capability_tick, safety_pressure};
pub use drift::run_drift_tick;
pub use labs::run_lab_tick;
pub use regen::run_regen_tick;
pub use suspicion::run_suspicion_tick;
pub use takeoff::{run_rsi_tick, takeoff_multiplier};

use crate::config::SimConfig;
use crate::progression::BonusLedger;
use crate::state::WorldState;
use tracing::instrument;

/// Advance world dynamics by one tick.
///
/// Order matters: lab derived stats first (they feed pressure), then the
/// capability/safety integration, then RSI, then suspicion feedback (which
/// reads this tick's capability pressure), then meter drift and passive
/// regeneration.
#[instrument(skip_all, name = "world_tick")]
pub fn run_world_tick(state: &mut WorldState, config: &SimConfig, bonuses: &BonusLedger) {
    let dt = 1.0 / f64::from(config.ticks_per_turn.max(1));
    let features = &config.features;

    run_lab_tick(state, features, dt);

    let pressure = capability_pressure(state);
    run_capability_tick(state, features, bonuses, pressure, dt);

    if features.rsi_takeoff {
        run_rsi_tick(state, dt);
    }

    run_suspicion_tick(state, features, pressure, dt);
    run_drift_tick(state, dt);

    if features.passive_regen {
        run_regen_tick(state, bonuses, dt);
    }

    state.tick += 1;
}
