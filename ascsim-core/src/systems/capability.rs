use crate::config::FeatureSet;
use crate::defines::{capability as defines, safety};
use crate::progression::BonusLedger;
use crate::state::WorldState;
use crate::systems::takeoff::takeoff_multiplier;
use tracing::instrument;

/// Raw capability pressure: what the world's compute is pushing toward the
/// frontier this tick, before automation and takeoff amplification.
pub fn capability_pressure(state: &WorldState) -> f64 {
    let lab_pressure: f64 = state
        .labs
        .iter()
        .map(|lab| {
            lab.available_compute / defines::COMPUTE_PER_PRESSURE
                * lab.capability_focus
                * lab.research_speed
                * (1.0 + lab.acceleration)
        })
        .sum();
    lab_pressure + defines::COMPUTE_ACCESS_COEF * state.ai.resource("compute_access")
}

/// Raw safety pressure from lab safety commitments and the coalition's
/// coordination and trust.
pub fn safety_pressure(state: &WorldState) -> f64 {
    let lab_pressure: f64 = state
        .labs
        .iter()
        .map(|lab| {
            lab.available_compute / defines::COMPUTE_PER_PRESSURE
                * lab.safety_commitment
                * lab.research_speed
        })
        .sum();
    lab_pressure
        + safety::COORDINATION_COEF * state.human.resource("coordination")
        + safety::TRUST_COEF * state.human.resource("trust")
}

/// Integrate FCI and ARI for one tick.
#[instrument(skip_all, name = "capability")]
pub fn run_capability_tick(
    state: &mut WorldState,
    features: &FeatureSet,
    bonuses: &BonusLedger,
    pressure: f64,
    dt: f64,
) {
    let takeoff = if features.rsi_takeoff {
        takeoff_multiplier(state.progress.rsi)
    } else {
        1.0
    };
    let amplified = pressure
        * (1.0 + state.progress.automation * defines::AUTOMATION_COEF)
        * (1.0 + bonuses.capability_mult)
        * takeoff;

    state.progress.add_fci(amplified * defines::FCI_GAIN_RATE * dt);
    state
        .progress
        .add_ari(safety_pressure(state) * safety::ARI_GAIN_RATE * dt);

    log::debug!(
        "capability tick: pressure {:.3} takeoff {:.2} fci {:.2} ari {:.2}",
        pressure,
        takeoff,
        state.progress.fci,
        state.progress.ari
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScenarioBuilder;

    #[test]
    fn test_fci_increases_with_compute() {
        let mut state = ScenarioBuilder::new().with_lab("deep", 150.0, 0.85).build();
        let features = FeatureSet::elaborated();
        let bonuses = BonusLedger::default();

        let pressure = capability_pressure(&state);
        assert!(pressure > 0.0);

        run_capability_tick(&mut state, &features, &bonuses, pressure, 1.0);
        assert!(state.progress.fci > 0.0);
    }

    #[test]
    fn test_halving_focus_slows_growth() {
        let full = {
            let mut state = ScenarioBuilder::new().with_lab("a", 150.0, 0.85).build();
            let pressure = capability_pressure(&state);
            run_capability_tick(
                &mut state,
                &FeatureSet::elaborated(),
                &BonusLedger::default(),
                pressure,
                1.0,
            );
            state.progress.fci
        };
        let halved = {
            let mut state = ScenarioBuilder::new().with_lab("a", 150.0, 0.425).build();
            let pressure = capability_pressure(&state);
            run_capability_tick(
                &mut state,
                &FeatureSet::elaborated(),
                &BonusLedger::default(),
                pressure,
                1.0,
            );
            state.progress.fci
        };
        assert!(full > halved);
    }

    #[test]
    fn test_automation_amplifies_pressure() {
        let mut flat = ScenarioBuilder::new().with_lab("a", 100.0, 0.5).build();
        let mut automated = flat.clone();
        automated.progress.automation = 1.0;

        let features = FeatureSet::elaborated();
        let bonuses = BonusLedger::default();
        let pressure = capability_pressure(&flat);

        run_capability_tick(&mut flat, &features, &bonuses, pressure, 1.0);
        run_capability_tick(&mut automated, &features, &bonuses, pressure, 1.0);

        assert!(automated.progress.fci > flat.progress.fci);
    }

    #[test]
    fn test_tick_scale_invariance() {
        // One 1.0-dt tick and four 0.25-dt ticks of pure integration land
        // close together (not identical: pressure is re-sampled per tick).
        let base = ScenarioBuilder::new().with_lab("a", 100.0, 0.5).build();
        let features = FeatureSet::simplified();
        let bonuses = BonusLedger::default();

        let mut coarse = base.clone();
        let pressure = capability_pressure(&coarse);
        run_capability_tick(&mut coarse, &features, &bonuses, pressure, 1.0);

        let mut fine = base.clone();
        for _ in 0..4 {
            let pressure = capability_pressure(&fine);
            run_capability_tick(&mut fine, &features, &bonuses, pressure, 0.25);
        }

        assert!((coarse.progress.fci - fine.progress.fci).abs() < 0.05);
    }

    #[test]
    fn test_safety_pressure_reads_coalition_resources() {
        let state = ScenarioBuilder::new()
            .with_lab("a", 100.0, 0.5)
            .with_human_resource("coordination", 2.0)
            .with_human_resource("trust", 1.0)
            .build();
        let expected_floor =
            safety::COORDINATION_COEF * 2.0 + safety::TRUST_COEF * 1.0;
        assert!(safety_pressure(&state) >= expected_floor);
    }
}
