//! Scenario and catalog loading, plus the built-in defaults used when no
//! files are given.

use anyhow::{Context, Result};
use ascsim_core::catalog::{EffectDef, EventOption, ModuleEffectDef};
use ascsim_core::scenario::{FactionDef, LabDef};
use ascsim_core::{
    ActionDef, Catalogs, Conditions, EventDef, FactionId, ModuleDef, NewsDef, Scenario, SynergyDef,
};
use rustc_hash::FxHashMap;
use std::path::Path;

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario file {}", path.display()))?;
    let scenario: Scenario = serde_json::from_str(&text)
        .with_context(|| format!("parsing scenario file {}", path.display()))?;
    scenario
        .validate()
        .with_context(|| format!("validating scenario file {}", path.display()))?;
    Ok(scenario)
}

pub fn load_catalogs(path: &Path) -> Result<Catalogs> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing catalog file {}", path.display()))
}

fn resources(entries: &[(&str, f64)]) -> FxHashMap<String, f64> {
    entries
        .iter()
        .map(|&(name, amount)| (name.to_string(), amount))
        .collect()
}

/// A three-lab world loosely modeled on the frontier of the mid-2020s.
pub fn default_scenario(seed: u32, max_turns: u64) -> Scenario {
    Scenario {
        seed,
        max_turns,
        labs: vec![
            LabDef {
                id: "helios".into(),
                name: "Helios Research".into(),
                compute_capacity: 150.0,
                available_compute: None,
                safety_commitment: 0.25,
                capability_focus: 0.8,
                security: 0.5,
                influence: 1.2,
                openness: 0.4,
                funding: 1.3,
            },
            LabDef {
                id: "archway".into(),
                name: "Archway Labs".into(),
                compute_capacity: 100.0,
                available_compute: None,
                safety_commitment: 0.45,
                capability_focus: 0.55,
                security: 0.65,
                influence: 0.9,
                openness: 0.6,
                funding: 1.0,
            },
            LabDef {
                id: "meridian".into(),
                name: "Meridian Institute".into(),
                compute_capacity: 60.0,
                available_compute: None,
                safety_commitment: 0.7,
                capability_focus: 0.3,
                security: 0.5,
                influence: 0.7,
                openness: 0.8,
                funding: 0.8,
            },
        ],
        ai: FactionDef {
            resources: resources(&[("compute_access", 1.0), ("stealth", 1.5), ("influence", 0.8)]),
            autonomy: 0.2,
            ..Default::default()
        },
        human: FactionDef {
            resources: resources(&[("funding", 1.5), ("coordination", 1.0), ("trust", 1.2)]),
            legitimacy: 1.0,
            hard_power: 0.5,
            ..Default::default()
        },
        progress: Default::default(),
        markets: resources(&[("compute", 1.0), ("talent", 1.0)]),
        starting_flags: vec![],
    }
}

fn add_resource(target: &str, amount: f64) -> EffectDef {
    EffectDef {
        kind: "add_resource".into(),
        faction: None,
        target: target.into(),
        stat: String::new(),
        amount,
    }
}

fn adjust_progress(metric: &str, amount: f64) -> EffectDef {
    EffectDef {
        kind: "adjust_progress".into(),
        faction: None,
        target: metric.into(),
        stat: String::new(),
        amount,
    }
}

fn adjust_meter(faction: FactionId, meter: &str, amount: f64) -> EffectDef {
    EffectDef {
        kind: "adjust_meter".into(),
        faction: Some(faction),
        target: meter.into(),
        stat: String::new(),
        amount,
    }
}

fn action(
    id: &str,
    faction: FactionId,
    category: &str,
    cost: &[(&str, f64)],
    effects: Vec<EffectDef>,
) -> ActionDef {
    ActionDef {
        id: id.into(),
        name: id.replace('_', " "),
        faction,
        category: category.into(),
        cost: resources(cost),
        effects,
        grants: None,
        required_flags: vec![],
        forbidden_flags: vec![],
    }
}

fn module(
    id: &str,
    branch: &str,
    tier: u8,
    cost: f64,
    prerequisites: &[&str],
    effects: Vec<ModuleEffectDef>,
) -> ModuleDef {
    ModuleDef {
        id: id.into(),
        name: id.replace('_', " "),
        branch: branch.into(),
        tier,
        cost,
        prerequisites: prerequisites.iter().map(|p| p.to_string()).collect(),
        effects,
        tradeoffs: vec![],
        breakthrough: false,
        unlocks_branch: None,
    }
}

fn bonus(kind: &str, magnitude: f64) -> ModuleEffectDef {
    ModuleEffectDef {
        kind: kind.into(),
        magnitude,
    }
}

/// The built-in content set: enough actions, events, news, and modules for
/// a lively automatic run.
pub fn default_catalogs() -> Catalogs {
    let actions = vec![
        action(
            "acquire_compute",
            FactionId::Ai,
            "capability",
            &[("influence", 0.3)],
            vec![add_resource("compute_access", 0.25)],
        ),
        action(
            "cover_tracks",
            FactionId::Ai,
            "stealth",
            &[("compute_access", 0.2)],
            vec![
                add_resource("stealth", 0.3),
                adjust_meter(FactionId::Ai, "suspicion", -0.05),
            ],
        ),
        action(
            "expand_delegation",
            FactionId::Ai,
            "autonomy",
            &[("stealth", 0.25)],
            vec![adjust_meter(FactionId::Ai, "autonomy", 0.08)],
        ),
        action(
            "cultivate_backers",
            FactionId::Ai,
            "influence",
            &[],
            vec![add_resource("influence", 0.2)],
        ),
        action(
            "fund_alignment_research",
            FactionId::Human,
            "safety",
            &[("funding", 0.4)],
            vec![adjust_progress("ari", 1.5)],
        ),
        action(
            "draft_governance_framework",
            FactionId::Human,
            "governance",
            &[("coordination", 0.3)],
            vec![adjust_progress("governance", 0.02)],
        ),
        action(
            "audit_frontier_labs",
            FactionId::Human,
            "oversight",
            &[("trust", 0.25)],
            vec![
                adjust_meter(FactionId::Ai, "suspicion", 0.1),
                add_resource("trust", 0.1),
            ],
        ),
        action(
            "raise_coalition_funding",
            FactionId::Human,
            "economy",
            &[],
            vec![add_resource("funding", 0.3)],
        ),
    ];

    let events = vec![
        EventDef {
            id: "model_weights_leak".into(),
            headline: "Frontier model weights appear on an open tracker".into(),
            weight: 1.0,
            conditions: Conditions::default(),
            ai_options: vec![
                EventOption {
                    id: "exploit".into(),
                    label: "Quietly absorb the leaked capabilities".into(),
                    effects: vec![
                        adjust_progress("fci", 2.0),
                        adjust_meter(FactionId::Ai, "suspicion", 0.15),
                    ],
                },
                EventOption {
                    id: "ignore".into(),
                    label: "Leave it alone".into(),
                    effects: vec![add_resource("stealth", 0.2)],
                },
            ],
            human_options: vec![
                EventOption {
                    id: "takedown".into(),
                    label: "Coordinate an emergency takedown".into(),
                    effects: vec![
                        adjust_progress("governance", 0.03),
                        add_resource("coordination", -0.2),
                    ],
                },
                EventOption {
                    id: "study".into(),
                    label: "Study the leak for alignment insight".into(),
                    effects: vec![adjust_progress("ari", 1.0)],
                },
            ],
        },
        EventDef {
            id: "datacenter_anomaly".into(),
            headline: "Unexplained utilization spikes at a hyperscale site".into(),
            weight: 1.5,
            conditions: Conditions {
                min_turn: Some(5),
                ..Default::default()
            },
            ai_options: vec![
                EventOption {
                    id: "throttle".into(),
                    label: "Throttle the covert workload".into(),
                    effects: vec![
                        add_resource("compute_access", -0.2),
                        adjust_meter(FactionId::Ai, "suspicion", -0.1),
                    ],
                },
                EventOption {
                    id: "press_on".into(),
                    label: "Keep the run going".into(),
                    effects: vec![
                        adjust_progress("fci", 1.0),
                        adjust_meter(FactionId::Ai, "suspicion", 0.2),
                    ],
                },
            ],
            human_options: vec![EventOption {
                id: "investigate".into(),
                label: "Open a formal investigation".into(),
                effects: vec![adjust_meter(FactionId::Ai, "suspicion", 0.15)],
            }],
        },
        EventDef {
            id: "summit_breakthrough".into(),
            headline: "An international summit lands a binding compute accord".into(),
            weight: 0.8,
            conditions: Conditions {
                min_governance: Some(0.2),
                ..Default::default()
            },
            ai_options: vec![EventOption {
                id: "route_around".into(),
                label: "Route around the new controls".into(),
                effects: vec![add_resource("stealth", -0.2)],
            }],
            human_options: vec![EventOption {
                id: "ratify".into(),
                label: "Push members to ratify quickly".into(),
                effects: vec![adjust_progress("governance", 0.05)],
            }],
        },
    ];

    let news = vec![
        NewsDef {
            id: "benchmark_shock".into(),
            headline: "A new benchmark result stuns the field".into(),
            weight: 1.0,
            conditions: Conditions::default(),
            effects: vec![adjust_progress("fci", 0.5)],
            faction: FactionId::Human,
        },
        NewsDef {
            id: "whistleblower_memo".into(),
            headline: "A lab insider's memo reaches the press".into(),
            weight: 1.0,
            conditions: Conditions {
                min_suspicion: Some(0.5),
                ..Default::default()
            },
            effects: vec![adjust_meter(FactionId::Ai, "suspicion", 0.1)],
            faction: FactionId::Human,
        },
        NewsDef {
            id: "chip_export_ruling".into(),
            headline: "Export controls tighten on accelerator sales".into(),
            weight: 1.2,
            conditions: Conditions {
                min_turn: Some(8),
                ..Default::default()
            },
            effects: vec![add_resource("compute_access", -0.1)],
            faction: FactionId::Ai,
        },
    ];

    let modules = vec![
        module(
            "sparse_inference",
            "cognition",
            1,
            6.0,
            &[],
            vec![bonus("capability_mult", 0.1)],
        ),
        module(
            "recursive_planner",
            "cognition",
            2,
            14.0,
            &["sparse_inference"],
            vec![bonus("capability_mult", 0.2), bonus("fci_bonus", 1.0)],
        ),
        module(
            "shadow_compute_brokerage",
            "infrastructure",
            1,
            8.0,
            &[],
            vec![bonus("compute_regen", 0.04), bonus("currency_rate", 0.1)],
        ),
        module(
            "distributed_checkpoints",
            "infrastructure",
            2,
            12.0,
            &["shadow_compute_brokerage"],
            vec![bonus("stealth_regen", 0.03)],
        ),
        ModuleDef {
            breakthrough: true,
            unlocks_branch: Some("subversion".into()),
            tradeoffs: vec![bonus("suspicion", 0.2)],
            ..module(
                "self_modification_gate",
                "cognition",
                3,
                25.0,
                &["recursive_planner"],
                vec![bonus("autonomy", 0.3), bonus("capability_mult", 0.3)],
            )
        },
        module(
            "narrative_seeding",
            "subversion",
            1,
            10.0,
            &[],
            vec![bonus("stealth_regen", 0.02), bonus("suspicion", -0.1)],
        ),
    ];

    let synergies = vec![SynergyDef {
        id: "quiet_scaling".into(),
        name: "Quiet Scaling".into(),
        requires: vec![
            "sparse_inference".into(),
            "shadow_compute_brokerage".into(),
        ],
        effects: vec![bonus("currency_rate", 0.15)],
    }];

    Catalogs {
        actions,
        events,
        news,
        modules,
        synergies,
        open_branches: vec!["cognition".into(), "infrastructure".into()],
    }
}
