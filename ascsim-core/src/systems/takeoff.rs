use crate::defines::takeoff as defines;
use crate::state::WorldState;
use tracing::instrument;

/// Capability growth multiplier for a given RSI level.
///
/// Piecewise-linear ramp across the named regimes. Each threshold raises
/// both the base value and the slope, so crossing one is visible as a kink
/// in the capability curve, and the late regimes are explosive rather than
/// linear.
pub fn takeoff_multiplier(rsi: f64) -> f64 {
    let (threshold, base, slope) = if rsi >= defines::SINGULARITY {
        (
            defines::SINGULARITY,
            defines::SINGULARITY_BASE,
            defines::SINGULARITY_SLOPE,
        )
    } else if rsi >= defines::CRITICAL {
        (
            defines::CRITICAL,
            defines::CRITICAL_BASE,
            defines::CRITICAL_SLOPE,
        )
    } else if rsi >= defines::FAST {
        (defines::FAST, defines::FAST_BASE, defines::FAST_SLOPE)
    } else if rsi >= defines::MEDIUM {
        (defines::MEDIUM, defines::MEDIUM_BASE, defines::MEDIUM_SLOPE)
    } else {
        (0.0, defines::SLOW_BASE, defines::SLOW_SLOPE)
    };
    base + slope * (rsi - threshold)
}

/// Integrate the RSI level for one tick.
///
/// RSI only starts accumulating once FCI and automation clear their
/// activation thresholds. Its growth rate is multiplied by its own takeoff
/// ramp (the feedback loop that produces the explosion) and damped by
/// suspicion and governance.
#[instrument(skip_all, name = "rsi")]
pub fn run_rsi_tick(state: &mut WorldState, dt: f64) {
    if state.progress.fci < defines::RSI_FCI_ACTIVATION
        || state.progress.automation < defines::RSI_AUTOMATION_ACTIVATION
    {
        return;
    }

    let damping = 1.0
        + state.ai.suspicion.get() * defines::RSI_SUSPICION_DAMP
        + state.progress.governance * defines::RSI_GOVERNANCE_DAMP;
    let gain = defines::RSI_BASE_RATE * takeoff_multiplier(state.progress.rsi) / damping;

    state.progress.add_rsi(gain * dt);
    log::debug!("rsi tick: level {:.3} gain {:.4}", state.progress.rsi, gain);
}
