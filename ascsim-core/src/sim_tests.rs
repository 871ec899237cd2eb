//! End-to-end trajectory tests over the whole engine.

use crate::testing::{self, ScenarioBuilder};
use crate::*;

fn two_lab_scenario(focus_scale: f64) -> Scenario {
    ScenarioBuilder::new()
        .seed(1337)
        .max_turns(200)
        .with_lab("alpha", 150.0, 0.85 * focus_scale)
        .with_lab("beta", 100.0, 0.3 * focus_scale)
        .with_ai_resource("stealth", 1.0)
        .scenario()
}

fn content() -> Catalogs {
    let mut catalogs = Catalogs::default();
    let mut grow = testing::action("expand_compute", FactionId::Ai);
    grow.category = "capability".to_string();
    grow.effects.push(catalog::EffectDef {
        kind: "add_resource".into(),
        faction: None,
        target: "compute_access".into(),
        stat: String::new(),
        amount: 0.1,
    });
    catalogs.actions.push(grow);
    catalogs.events.push(testing::event("breach", 1.0));
    catalogs.events.push(testing::event("audit", 2.0));
    catalogs.news.push(testing::news("press_cycle", 1.0));
    catalogs
}

#[test]
fn test_identical_sessions_stay_bit_identical() {
    let scenario = two_lab_scenario(1.0);
    let config = SimConfig::default();
    let mut first = GameSession::new(&scenario, content(), config.clone()).unwrap();
    let mut second = GameSession::new(&scenario, content(), config).unwrap();

    for _ in 0..40 {
        first.advance_turn();
        second.advance_turn();
        assert_eq!(first.state().checksum(), second.state().checksum());
    }

    let first_json = serde_json::to_value(first.state()).unwrap();
    let second_json = serde_json::to_value(second.state()).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn test_state_survives_serialization() {
    let scenario = two_lab_scenario(1.0);
    let mut session = GameSession::new(&scenario, content(), SimConfig::default()).unwrap();
    session.run_batch(25);

    let json = serde_json::to_string(session.state()).unwrap();
    let restored: WorldState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.checksum(), session.state().checksum());
}

#[test]
fn test_capability_grows_under_sustained_focus() {
    let mut session =
        GameSession::new(&two_lab_scenario(1.0), Catalogs::default(), SimConfig::default())
            .unwrap();

    let mut previous = session.state().progress.fci;
    for _ in 0..20 {
        let summary = session.advance_turn();
        assert!(
            summary.snapshot.fci > previous,
            "fci stalled at turn {}",
            summary.turn
        );
        previous = summary.snapshot.fci;
    }
}

#[test]
fn test_halving_focus_slows_the_curve() {
    let mut focused =
        GameSession::new(&two_lab_scenario(1.0), Catalogs::default(), SimConfig::default())
            .unwrap();
    let mut divided =
        GameSession::new(&two_lab_scenario(0.5), Catalogs::default(), SimConfig::default())
            .unwrap();

    focused.run_batch(20);
    divided.run_batch(20);

    assert!(divided.state().progress.fci < focused.state().progress.fci);
}

#[test]
fn test_long_run_respects_every_bound() {
    let mut session = GameSession::new(
        &two_lab_scenario(1.0),
        content(),
        SimConfig::default(),
    )
    .unwrap();
    session.run_batch(100);

    let state = session.state();
    assert!(state.ai.suspicion.get() >= 0.0 && state.ai.suspicion.get() <= 3.0);
    assert!(state.ai.autonomy.get() >= 0.0 && state.ai.autonomy.get() <= 3.0);
    assert!(state.progress.fci >= 0.0 && state.progress.fci <= 100.0);
    assert!(state.progress.ari >= 0.0 && state.progress.ari <= 100.0);
    assert!(state.progress.automation >= 0.0 && state.progress.automation <= 1.0);
    assert!(state.progress.governance >= 0.0 && state.progress.governance <= 1.0);
    assert!(state.progress.rsi >= 0.0 && state.progress.rsi <= 10.0);
    for faction in [&state.ai, &state.human] {
        for (name, &amount) in &faction.resources {
            assert!(amount >= 0.0, "resource {name} went negative: {amount}");
        }
    }
    for lab in &state.labs {
        assert!(lab.available_compute >= 0.0 && lab.available_compute <= lab.compute_capacity);
        assert!(lab.capability_focus >= 0.0 && lab.capability_focus <= 1.0);
        assert!(lab.safety_commitment >= 0.0 && lab.safety_commitment <= 1.0);
        assert!(lab.security >= 0.0 && lab.security <= 1.0);
    }
}

#[test]
fn test_simplified_and_elaborated_rulesets_diverge() {
    let scenario = two_lab_scenario(1.0);
    let simplified_config = SimConfig {
        features: FeatureSet::simplified(),
        ..Default::default()
    };
    let mut simplified =
        GameSession::new(&scenario, Catalogs::default(), simplified_config).unwrap();
    let mut elaborated =
        GameSession::new(&scenario, Catalogs::default(), SimConfig::default()).unwrap();

    simplified.run_batch(30);
    elaborated.run_batch(30);

    // Same seed, same world, different rules: trajectories must split.
    assert_ne!(
        simplified.state().checksum(),
        elaborated.state().checksum()
    );
    // And the simplified ruleset never accumulates RSI at all.
    assert_eq!(simplified.state().progress.rsi, 0.0);
}
