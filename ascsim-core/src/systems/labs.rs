use crate::config::FeatureSet;
use crate::defines::labs as defines;
use crate::defines::takeoff;
use crate::state::WorldState;
use tracing::instrument;

/// Close a fraction of the gap toward a target. The interpolation is what
/// gives derived stats momentum: a stat hit by an effect drifts back over
/// several ticks instead of snapping.
fn smooth_toward(value: f64, target: f64, rate: f64) -> f64 {
    value + (target - value) * rate.clamp(0.0, 1.0)
}

/// Recompute each lab's derived stats from its base stats.
#[instrument(skip_all, name = "labs")]
pub fn run_lab_tick(state: &mut WorldState, features: &FeatureSet, dt: f64) {
    let rate = defines::SMOOTHING_RATE * dt;
    let automation = state.progress.automation;
    let rsi_ratio = if features.rsi_takeoff {
        state.progress.rsi / takeoff::RSI_MAX
    } else {
        0.0
    };

    for lab in &mut state.labs {
        let capability_target = lab.available_compute / defines::CAPABILITY_LEVEL_SCALE
            * (0.5 + lab.capability_focus);
        let research_target = (1.0
            + defines::RESEARCH_FUNDING_COEF * (lab.funding - 1.0)
            + defines::RESEARCH_OPENNESS_COEF * lab.openness)
            .max(0.1);
        let accel_target = defines::ACCEL_AUTOMATION_COEF * automation
            + defines::ACCEL_RSI_COEF * rsi_ratio;

        lab.capability_level = smooth_toward(lab.capability_level, capability_target, rate);
        lab.research_speed = smooth_toward(lab.research_speed, research_target, rate);
        lab.acceleration = smooth_toward(lab.acceleration, accel_target, rate);

        log::debug!(
            "lab {}: capability_level {:.3} research_speed {:.3} acceleration {:.3}",
            lab.id,
            lab.capability_level,
            lab.research_speed,
            lab.acceleration
        );
    }
}
