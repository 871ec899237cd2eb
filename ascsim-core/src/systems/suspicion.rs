use crate::config::FeatureSet;
use crate::defines::{suspicion as defines, takeoff};
use crate::state::WorldState;
use tracing::instrument;

/// Integrate suspicion and apply the coalition's escalating countermeasures.
///
/// Suspicion drifts up with capability pressure and down with the AI's
/// stealth. Each named level it crosses switches on a further set of
/// per-tick countermeasures, cumulative with the levels below it; this
/// feedback loop is the core tension mechanic.
#[instrument(skip_all, name = "suspicion")]
pub fn run_suspicion_tick(state: &mut WorldState, features: &FeatureSet, pressure: f64, dt: f64) {
    let mut drift = pressure * defines::CAPABILITY_COEF
        - state.ai.resource("stealth") * defines::STEALTH_COEF;
    if features.rsi_takeoff && state.progress.rsi >= takeoff::MEDIUM {
        drift += defines::RSI_LEAK;
    }
    state.ai.suspicion.add(drift * dt);

    let level = state.ai.suspicion.get();

    if level >= defines::NOTICED {
        for lab in &mut state.labs {
            lab.security += defines::NOTICED_LAB_SECURITY * dt;
            lab.clamp_stat("security");
        }
        state.progress.add_governance(defines::NOTICED_GOVERNANCE * dt);
    }

    if level >= defines::INVESTIGATED {
        for lab in &mut state.labs {
            lab.safety_commitment += defines::INVESTIGATED_SAFETY_COMMITMENT * dt;
            lab.capability_focus -= defines::INVESTIGATED_CAPABILITY_FOCUS * dt;
            lab.clamp_stat("safety_commitment");
            lab.clamp_stat("capability_focus");
        }
        state
            .progress
            .add_governance(defines::INVESTIGATED_GOVERNANCE * dt);
    }

    if level >= defines::ALARMED {
        state
            .ai
            .add_resource("stealth", -defines::ALARMED_STEALTH_DRAIN * dt);
        state.progress.add_governance(defines::ALARMED_GOVERNANCE * dt);
    }

    if level >= defines::CRACKDOWN {
        state
            .ai
            .add_resource("compute_access", -defines::CRACKDOWN_COMPUTE_DRAIN * dt);
        for lab in &mut state.labs {
            lab.security += defines::CRACKDOWN_LAB_SECURITY * dt;
            lab.clamp_stat("security");
        }
        log::debug!("crackdown active at suspicion {level:.2}");
    }

    if level >= defines::CONTAINMENT {
        state
            .ai
            .add_resource("compute_access", -defines::CONTAINMENT_COMPUTE_DRAIN * dt);
        state
            .ai
            .add_resource("stealth", -defines::CONTAINMENT_STEALTH_DRAIN * dt);
        state
            .progress
            .add_governance(defines::CONTAINMENT_GOVERNANCE * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScenarioBuilder;

    #[test]
    fn test_stealth_pulls_suspicion_down() {
        let mut state = ScenarioBuilder::new().with_ai_resource("stealth", 5.0).build();
        state.ai.suspicion.set(1.0);

        // No capability pressure, plenty of stealth: drift is negative.
        run_suspicion_tick(&mut state, &FeatureSet::simplified(), 0.0, 1.0);
        assert!(state.ai.suspicion.get() < 1.0);
    }

    #[test]
    fn test_pressure_pushes_suspicion_up() {
        let mut state = ScenarioBuilder::new().with_ai_resource("stealth", 0.0).build();
        run_suspicion_tick(&mut state, &FeatureSet::simplified(), 3.0, 1.0);
        assert!(state.ai.suspicion.get() > 0.0);
    }

    #[test]
    fn test_rsi_leak_requires_medium_takeoff() {
        let features = FeatureSet::elaborated();

        let mut quiet = ScenarioBuilder::new().with_ai_resource("stealth", 0.0).build();
        quiet.progress.rsi = takeoff::MEDIUM - 0.5;
        run_suspicion_tick(&mut quiet, &features, 0.0, 1.0);

        let mut loud = ScenarioBuilder::new().with_ai_resource("stealth", 0.0).build();
        loud.progress.rsi = takeoff::MEDIUM;
        run_suspicion_tick(&mut loud, &features, 0.0, 1.0);

        assert!(loud.ai.suspicion.get() > quiet.ai.suspicion.get());
    }

    #[test]
    fn test_each_level_adds_distinct_countermeasures() {
        let features = FeatureSet::simplified();

        // Noticed: security rises, focus untouched.
        let mut noticed = ScenarioBuilder::new().with_lab("a", 100.0, 0.8).build();
        noticed.ai.suspicion.set(defines::NOTICED);
        let focus_before = noticed.labs[0].capability_focus;
        let security_before = noticed.labs[0].security;
        run_suspicion_tick(&mut noticed, &features, 0.0, 1.0);
        assert!(noticed.labs[0].security > security_before);
        assert_eq!(noticed.labs[0].capability_focus, focus_before);

        // Investigated: capability focus now degrades too.
        let mut investigated = ScenarioBuilder::new().with_lab("a", 100.0, 0.8).build();
        investigated.ai.suspicion.set(defines::INVESTIGATED);
        run_suspicion_tick(&mut investigated, &features, 0.0, 1.0);
        assert!(investigated.labs[0].capability_focus < focus_before);
        assert!(investigated.labs[0].safety_commitment > noticed.labs[0].safety_commitment);

        // Alarmed: stealth drains.
        let mut alarmed = ScenarioBuilder::new()
            .with_lab("a", 100.0, 0.8)
            .with_ai_resource("stealth", 1.0)
            .build();
        alarmed.ai.suspicion.set(defines::ALARMED);
        run_suspicion_tick(&mut alarmed, &features, 0.0, 1.0);
        assert!(alarmed.ai.resource("stealth") < 1.0);

        // Crackdown: compute access drains.
        let mut crackdown = ScenarioBuilder::new()
            .with_lab("a", 100.0, 0.8)
            .with_ai_resource("compute_access", 2.0)
            .build();
        crackdown.ai.suspicion.set(defines::CRACKDOWN);
        run_suspicion_tick(&mut crackdown, &features, 0.0, 1.0);
        assert!(crackdown.ai.resource("compute_access") < 2.0);
    }

    #[test]
    fn test_crackdown_drains_compute_monotonically() {
        // Suspicion pinned above the crackdown threshold for 10 ticks:
        // compute access must never increase over the window.
        let mut state = ScenarioBuilder::new()
            .with_ai_resource("compute_access", 3.0)
            .with_ai_resource("stealth", 0.0)
            .build();
        state.ai.suspicion.set(defines::CRACKDOWN + 0.1);

        let mut previous = state.ai.resource("compute_access");
        for _ in 0..10 {
            state.ai.suspicion.set(defines::CRACKDOWN + 0.1);
            run_suspicion_tick(&mut state, &FeatureSet::simplified(), 0.5, 1.0);
            let current = state.ai.resource("compute_access");
            assert!(current <= previous);
            previous = current;
        }
        assert!(previous < 3.0);
    }
}
