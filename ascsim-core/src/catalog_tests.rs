//! Unit tests for catalog parsing and eligibility filtering.
use super::*;
use crate::testing::{action, ScenarioBuilder};

#[test]
fn test_unknown_effect_kind_compiles_to_unrecognized() {
    let def = EffectDef {
        kind: "reticulate_splines".into(),
        faction: None,
        target: "whatever".into(),
        stat: String::new(),
        amount: 3.0,
    };
    assert!(matches!(
        def.compile(FactionId::Ai),
        Effect::Unrecognized { .. }
    ));
}

#[test]
fn test_legacy_region_stat_synonym() {
    let def = EffectDef {
        kind: "modify_region_stat".into(),
        faction: None,
        target: "deep".into(),
        stat: "security".into(),
        amount: 0.1,
    };
    assert_eq!(
        def.compile(FactionId::Human),
        Effect::ModifyLabStat {
            lab: "deep".into(),
            stat: "security".into(),
            delta: 0.1,
        }
    );
}

#[test]
fn test_effect_faction_defaults_to_owner() {
    let def = EffectDef {
        kind: "add_resource".into(),
        faction: None,
        target: "stealth".into(),
        stat: String::new(),
        amount: 1.0,
    };
    match def.compile(FactionId::Ai) {
        Effect::AddResource { faction, .. } => assert_eq!(faction, FactionId::Ai),
        other => panic!("unexpected effect: {other:?}"),
    }
}

#[test]
fn test_catalog_json_tolerates_unknown_fields() {
    let json = r#"{
        "actions": [{
            "id": "expand_compute",
            "faction": "ai",
            "category": "capability",
            "icon": "chip.png",
            "effects": [{"kind": "add_resource", "target": "compute_access", "amount": 1.0}]
        }],
        "events": [],
        "future_section": [1, 2, 3]
    }"#;
    let catalogs: Catalogs = serde_json::from_str(json).unwrap();
    assert_eq!(catalogs.actions.len(), 1);
    assert_eq!(catalogs.actions[0].faction, FactionId::Ai);
}

#[test]
fn test_eligible_actions_faction_match() {
    let state = ScenarioBuilder::new().build();
    let mut catalogs = Catalogs::default();
    catalogs.actions.push(action("ai_act", FactionId::Ai));
    catalogs.actions.push(action("human_act", FactionId::Human));

    let eligible = eligible_actions(&state, &catalogs, FactionId::Ai);
    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].id, "ai_act");
}

#[test]
fn test_grants_flag_idempotence_guard() {
    let mut state = ScenarioBuilder::new().build();
    let mut catalogs = Catalogs::default();
    let mut upgrade = action("one_shot", FactionId::Ai);
    upgrade.grants = Some("upg_one_shot".into());
    catalogs.actions.push(upgrade);

    assert_eq!(eligible_actions(&state, &catalogs, FactionId::Ai).len(), 1);

    state.set_flag("upg_one_shot");

    // Never eligible again, however many times we ask.
    for _ in 0..3 {
        assert!(eligible_actions(&state, &catalogs, FactionId::Ai).is_empty());
    }
}

#[test]
fn test_required_and_forbidden_flags() {
    let mut state = ScenarioBuilder::new().build();
    let mut catalogs = Catalogs::default();
    let mut gated = action("gated", FactionId::Ai);
    gated.required_flags = vec!["breakout".into()];
    gated.forbidden_flags = vec!["contained".into()];
    catalogs.actions.push(gated);

    assert!(eligible_actions(&state, &catalogs, FactionId::Ai).is_empty());

    state.set_flag("breakout");
    assert_eq!(eligible_actions(&state, &catalogs, FactionId::Ai).len(), 1);

    state.set_flag("contained");
    assert!(eligible_actions(&state, &catalogs, FactionId::Ai).is_empty());
}

#[test]
fn test_unaffordable_action_not_eligible() {
    let mut state = ScenarioBuilder::new().build();
    state.ai.add_resource("influence", 0.5);

    let mut catalogs = Catalogs::default();
    let mut priced = action("priced", FactionId::Ai);
    priced.cost.insert("influence".into(), 1.0);
    catalogs.actions.push(priced);

    assert!(eligible_actions(&state, &catalogs, FactionId::Ai).is_empty());

    state.ai.add_resource("influence", 0.5);
    assert_eq!(eligible_actions(&state, &catalogs, FactionId::Ai).len(), 1);
}

#[test]
fn test_event_turn_bounds_and_seen_set() {
    let mut state = ScenarioBuilder::new().build();
    let features = crate::config::FeatureSet::simplified();
    let mut catalogs = Catalogs::default();
    catalogs.events.push(EventDef {
        id: "leak".into(),
        headline: String::new(),
        weight: 1.0,
        conditions: Conditions {
            min_turn: Some(2),
            max_turn: Some(5),
            ..Default::default()
        },
        ai_options: vec![],
        human_options: vec![],
    });

    assert!(eligible_events(&state, &catalogs, &features).is_empty());

    state.turn = 3;
    assert_eq!(eligible_events(&state, &catalogs, &features).len(), 1);

    state.seen_events.insert("leak".into());
    assert!(eligible_events(&state, &catalogs, &features).is_empty());

    state.seen_events.clear();
    state.turn = 6;
    assert!(eligible_events(&state, &catalogs, &features).is_empty());
}

#[test]
fn test_metric_thresholds_respect_feature_set() {
    let mut state = ScenarioBuilder::new().build();
    state.progress.rsi = 1.0;

    let mut catalogs = Catalogs::default();
    catalogs.events.push(EventDef {
        id: "takeoff_whispers".into(),
        headline: String::new(),
        weight: 1.0,
        conditions: Conditions {
            min_rsi: Some(2.0),
            ..Default::default()
        },
        ai_options: vec![],
        human_options: vec![],
    });

    // Elaborated: threshold enforced.
    let elaborated = crate::config::FeatureSet::elaborated();
    assert!(eligible_events(&state, &catalogs, &elaborated).is_empty());

    // Simplified: metric thresholds are not part of the ruleset.
    let simplified = crate::config::FeatureSet::simplified();
    assert_eq!(eligible_events(&state, &catalogs, &simplified).len(), 1);
}

#[test]
fn test_filtering_preserves_catalog_order() {
    let state = ScenarioBuilder::new().build();
    let mut catalogs = Catalogs::default();
    for id in ["c_act", "a_act", "b_act"] {
        catalogs.actions.push(action(id, FactionId::Ai));
    }
    let ids: Vec<_> = eligible_actions(&state, &catalogs, FactionId::Ai)
        .iter()
        .map(|action| action.id.as_str())
        .collect();
    assert_eq!(ids, vec!["c_act", "a_act", "b_act"]);
}

#[test]
fn test_options_for_returns_only_acting_branch() {
    let event = EventDef {
        id: "standoff".into(),
        headline: String::new(),
        weight: 1.0,
        conditions: Conditions::default(),
        ai_options: vec![EventOption {
            id: "lay_low".into(),
            label: String::new(),
            effects: vec![],
        }],
        human_options: vec![
            EventOption {
                id: "subpoena".into(),
                label: String::new(),
                effects: vec![],
            },
            EventOption {
                id: "ignore".into(),
                label: String::new(),
                effects: vec![],
            },
        ],
    };
    assert_eq!(event.options_for(FactionId::Ai).len(), 1);
    assert_eq!(event.options_for(FactionId::Human).len(), 2);
    assert_eq!(event.options_for(FactionId::Human)[0].id, "subpoena");
}
