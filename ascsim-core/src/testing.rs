//! Test helpers: world builders and synthetic catalog entries.

use crate::catalog::{ActionDef, EventDef, EventOption, ModuleDef, NewsDef};
use crate::scenario::{FactionDef, LabDef, Scenario};
use crate::state::{FactionId, WorldState};
use rustc_hash::FxHashMap;

pub struct ScenarioBuilder {
    scenario: Scenario,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self {
            scenario: Scenario {
                seed: 1,
                max_turns: 100,
                labs: vec![],
                ai: FactionDef {
                    resources: [
                        ("compute_access".to_string(), 1.0),
                        ("stealth".to_string(), 1.0),
                        ("influence".to_string(), 1.0),
                    ]
                    .into_iter()
                    .collect(),
                    ..Default::default()
                },
                human: FactionDef {
                    resources: [
                        ("funding".to_string(), 1.0),
                        ("coordination".to_string(), 1.0),
                        ("trust".to_string(), 1.0),
                    ]
                    .into_iter()
                    .collect(),
                    ..Default::default()
                },
                progress: Default::default(),
                markets: [("compute".to_string(), 1.0)].into_iter().collect(),
                starting_flags: vec![],
            },
        }
    }

    pub fn seed(mut self, seed: u32) -> Self {
        self.scenario.seed = seed;
        self
    }

    pub fn max_turns(mut self, max_turns: u64) -> Self {
        self.scenario.max_turns = max_turns;
        self
    }

    pub fn with_lab(mut self, id: &str, compute: f64, capability_focus: f64) -> Self {
        self.scenario.labs.push(LabDef {
            id: id.to_string(),
            name: String::new(),
            compute_capacity: compute,
            available_compute: None,
            safety_commitment: 0.2,
            capability_focus,
            security: 0.5,
            influence: 1.0,
            openness: 0.5,
            funding: 1.0,
        });
        self
    }

    pub fn with_ai_resource(mut self, name: &str, amount: f64) -> Self {
        self.scenario.ai.resources.insert(name.to_string(), amount);
        self
    }

    pub fn with_human_resource(mut self, name: &str, amount: f64) -> Self {
        self.scenario
            .human
            .resources
            .insert(name.to_string(), amount);
        self
    }

    pub fn with_flag(mut self, flag: &str) -> Self {
        self.scenario.starting_flags.push(flag.to_string());
        self
    }

    pub fn scenario(mut self) -> Scenario {
        // A scenario needs at least one lab to validate.
        if self.scenario.labs.is_empty() {
            self = self.with_lab("frontier", 100.0, 0.5);
        }
        self.scenario
    }

    pub fn build(self) -> WorldState {
        WorldState::from_scenario(&self.scenario()).expect("test scenario must validate")
    }
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A free, effect-less action for eligibility tests.
pub fn action(id: &str, faction: FactionId) -> ActionDef {
    ActionDef {
        id: id.to_string(),
        name: String::new(),
        faction,
        category: "economy".to_string(),
        cost: FxHashMap::default(),
        effects: vec![],
        grants: None,
        required_flags: vec![],
        forbidden_flags: vec![],
    }
}

/// An always-eligible event with one option per faction.
pub fn event(id: &str, weight: f64) -> EventDef {
    EventDef {
        id: id.to_string(),
        headline: String::new(),
        weight,
        conditions: Default::default(),
        ai_options: vec![EventOption {
            id: format!("{id}_ai_opt"),
            label: String::new(),
            effects: vec![],
        }],
        human_options: vec![EventOption {
            id: format!("{id}_human_opt"),
            label: String::new(),
            effects: vec![],
        }],
    }
}

/// An always-eligible, effect-less news item.
pub fn news(id: &str, weight: f64) -> NewsDef {
    NewsDef {
        id: id.to_string(),
        headline: String::new(),
        weight,
        conditions: Default::default(),
        effects: vec![],
        faction: FactionId::Human,
    }
}

/// A minimal constructor module.
pub fn module(id: &str, branch: &str, cost: f64) -> ModuleDef {
    ModuleDef {
        id: id.to_string(),
        name: String::new(),
        branch: branch.to_string(),
        tier: 1,
        cost,
        prerequisites: vec![],
        effects: vec![],
        tradeoffs: vec![],
        breakthrough: false,
        unlocks_branch: None,
    }
}
