use crate::defines::{drift as defines, takeoff};
use crate::state::WorldState;
use tracing::instrument;

/// Additive per-tick gains for autonomy, automation, governance, and hard
/// power, each damped or boosted by the indices that drive it.
#[instrument(skip_all, name = "drift")]
pub fn run_drift_tick(state: &mut WorldState, dt: f64) {
    let suspicion = state.ai.suspicion.get();
    let governance = state.progress.governance;
    let rsi_ratio = state.progress.rsi / takeoff::RSI_MAX;
    let fci_ratio = state.progress.fci / crate::defines::capability::FCI_MAX;

    let autonomy_gain = (defines::AUTONOMY_BASE + defines::AUTONOMY_RSI_COEF * rsi_ratio)
        / (1.0
            + governance * defines::AUTONOMY_GOVERNANCE_DAMP
            + suspicion * defines::SUSPICION_DAMP);
    state.ai.autonomy.add(autonomy_gain * dt);

    let automation_gain = (defines::AUTOMATION_BASE + defines::AUTOMATION_FCI_COEF * fci_ratio)
        / (1.0 + suspicion * defines::SUSPICION_DAMP);
    state.progress.add_automation(automation_gain * dt);

    let governance_gain = defines::GOVERNANCE_BASE
        + defines::GOVERNANCE_LEGITIMACY_COEF * state.human.legitimacy.get();
    state.progress.add_governance(governance_gain * dt);

    let hard_power_gain =
        defines::HARD_POWER_BASE + defines::HARD_POWER_GOVERNANCE_COEF * governance;
    state.human.hard_power.add(hard_power_gain * dt);
}
