use crate::defines::{capability, regen as defines, safety, suspicion};
use crate::progression::BonusLedger;
use crate::state::WorldState;
use tracing::instrument;

/// Passive per-tick resource regeneration (elaborated feature set).
///
/// Each trickle is a function of existing progress. Stealth only recovers
/// while suspicion is still low, and compute access stops recovering once
/// the crackdown begins; under a crackdown the drain in the suspicion
/// system must be the only force on it.
#[instrument(skip_all, name = "regen")]
pub fn run_regen_tick(state: &mut WorldState, bonuses: &BonusLedger, dt: f64) {
    let level = state.ai.suspicion.get();

    if level < suspicion::CRACKDOWN {
        let gain = defines::COMPUTE_ACCESS_RATE * state.progress.automation
            + bonuses.compute_regen;
        state.ai.add_resource("compute_access", gain * dt);
    }

    state.ai.add_resource(
        "influence",
        defines::INFLUENCE_RATE * state.ai.autonomy.ratio() * dt,
    );

    if level < suspicion::NOTICED {
        let gain = defines::STEALTH_RATE + bonuses.stealth_regen;
        state.ai.add_resource("stealth", gain * dt);
    }

    state.human.add_resource(
        "funding",
        defines::FUNDING_RATE * (state.progress.fci / capability::FCI_MAX) * dt,
    );
    state.human.add_resource(
        "coordination",
        defines::COORDINATION_RATE * state.progress.governance * dt,
    );
    state.human.add_resource(
        "trust",
        defines::TRUST_RATE * (state.progress.ari / safety::ARI_MAX) * dt,
    );
}
