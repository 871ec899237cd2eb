//! Scenario definitions: the starting conditions a session is built from.
//!
//! A scenario is consumed, never produced, by the engine. Loading one from
//! disk is the driver's job; here it is already a parsed in-memory shape.

use crate::rng::SimRng;
use crate::state::{Faction, GlobalProgress, Lab, WorldState};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("scenario has no labs")]
    NoLabs,
    #[error("duplicate lab id '{0}'")]
    DuplicateLab(String),
    #[error("meter '{meter}' initial value {value} outside [{min}, {max}]")]
    MeterOutOfRange {
        meter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Initial stats for one lab. Derived stats start at zero and converge over
/// the first ticks via smoothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabDef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub compute_capacity: f64,
    #[serde(default)]
    pub available_compute: Option<f64>,
    #[serde(default)]
    pub safety_commitment: f64,
    #[serde(default)]
    pub capability_focus: f64,
    #[serde(default = "default_half")]
    pub security: f64,
    #[serde(default)]
    pub influence: f64,
    #[serde(default = "default_half")]
    pub openness: f64,
    #[serde(default = "default_funding")]
    pub funding: f64,
}

fn default_half() -> f64 {
    0.5
}

fn default_funding() -> f64 {
    1.0
}

/// Initial resources, meters, and upgrade flags for one faction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactionDef {
    #[serde(default)]
    pub resources: FxHashMap<String, f64>,
    #[serde(default)]
    pub suspicion: f64,
    #[serde(default)]
    pub autonomy: f64,
    #[serde(default = "default_funding")]
    pub legitimacy: f64,
    #[serde(default = "default_half")]
    pub hard_power: f64,
    #[serde(default)]
    pub upgrades: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub seed: u32,
    pub max_turns: u64,
    pub labs: Vec<LabDef>,
    pub ai: FactionDef,
    pub human: FactionDef,
    #[serde(default)]
    pub progress: GlobalProgress,
    #[serde(default)]
    pub markets: FxHashMap<String, f64>,
    #[serde(default)]
    pub starting_flags: Vec<String>,
}

impl Scenario {
    /// Reject scenarios the engine cannot meaningfully run.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.labs.is_empty() {
            return Err(ScenarioError::NoLabs);
        }
        let mut seen = BTreeSet::new();
        for lab in &self.labs {
            if !seen.insert(lab.id.as_str()) {
                return Err(ScenarioError::DuplicateLab(lab.id.clone()));
            }
        }
        for (meter, value, min, max) in [
            ("ai.suspicion", self.ai.suspicion, 0.0, 3.0),
            ("ai.autonomy", self.ai.autonomy, 0.0, 3.0),
            ("human.legitimacy", self.human.legitimacy, 0.0, 2.5),
            ("human.hard_power", self.human.hard_power, 0.0, 2.5),
        ] {
            if value < min || value > max {
                return Err(ScenarioError::MeterOutOfRange {
                    meter,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

fn build_faction(def: &FactionDef) -> Faction {
    let mut faction = Faction::default();
    faction.resources = def
        .resources
        .iter()
        .map(|(name, &amount)| (name.clone(), amount.max(0.0)))
        .collect();
    faction.suspicion.set(def.suspicion);
    faction.autonomy.set(def.autonomy);
    faction.legitimacy.set(def.legitimacy);
    faction.hard_power.set(def.hard_power);
    faction.upgrades = def.upgrades.iter().cloned().collect();
    faction
}

impl WorldState {
    /// Build the initial world for a session.
    pub fn from_scenario(scenario: &Scenario) -> Result<WorldState, ScenarioError> {
        scenario.validate()?;

        let labs = scenario
            .labs
            .iter()
            .map(|def| Lab {
                id: def.id.clone(),
                name: if def.name.is_empty() {
                    def.id.clone()
                } else {
                    def.name.clone()
                },
                compute_capacity: def.compute_capacity.max(0.0),
                available_compute: def
                    .available_compute
                    .unwrap_or(def.compute_capacity)
                    .clamp(0.0, def.compute_capacity.max(0.0)),
                safety_commitment: def.safety_commitment.clamp(0.0, 1.0),
                capability_focus: def.capability_focus.clamp(0.0, 1.0),
                security: def.security.clamp(0.0, 1.0),
                influence: def.influence.max(0.0),
                openness: def.openness.clamp(0.0, 1.0),
                funding: def.funding.max(0.0),
                capability_level: 0.0,
                research_speed: 1.0,
                acceleration: 0.0,
            })
            .collect();

        Ok(WorldState {
            turn: 0,
            tick: 0,
            rng: SimRng::new(scenario.seed),
            ai: build_faction(&scenario.ai),
            human: build_faction(&scenario.human),
            labs,
            progress: scenario.progress.clone(),
            markets: scenario.markets.clone(),
            flags: scenario.starting_flags.iter().cloned().collect(),
            seen_events: BTreeSet::new(),
            seen_news: BTreeSet::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_scenario() -> Scenario {
        Scenario {
            seed: 1,
            max_turns: 50,
            labs: vec![LabDef {
                id: "deep".into(),
                name: String::new(),
                compute_capacity: 100.0,
                available_compute: None,
                safety_commitment: 0.2,
                capability_focus: 0.6,
                security: 0.5,
                influence: 1.0,
                openness: 0.5,
                funding: 1.0,
            }],
            ai: FactionDef::default(),
            human: FactionDef::default(),
            progress: GlobalProgress::default(),
            markets: FxHashMap::default(),
            starting_flags: vec!["scenario_start".into()],
        }
    }

    #[test]
    fn test_from_scenario_basics() {
        let state = WorldState::from_scenario(&minimal_scenario()).unwrap();
        assert_eq!(state.turn, 0);
        assert_eq!(state.labs.len(), 1);
        assert_eq!(state.labs[0].available_compute, 100.0);
        assert!(state.has_flag("scenario_start"));
    }

    #[test]
    fn test_validate_rejects_empty_labs() {
        let mut scenario = minimal_scenario();
        scenario.labs.clear();
        assert!(matches!(scenario.validate(), Err(ScenarioError::NoLabs)));
    }

    #[test]
    fn test_validate_rejects_duplicate_lab() {
        let mut scenario = minimal_scenario();
        scenario.labs.push(scenario.labs[0].clone());
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::DuplicateLab(_))
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_meter() {
        let mut scenario = minimal_scenario();
        scenario.ai.suspicion = 7.5;
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::MeterOutOfRange { meter: "ai.suspicion", .. })
        ));
    }

    #[test]
    fn test_scenario_tolerates_unknown_fields() {
        let json = r#"{
            "seed": 3,
            "max_turns": 10,
            "editor_note": "not an engine field",
            "labs": [{"id": "a", "compute_capacity": 10.0, "capability_focus": 0.5, "future_stat": 9}],
            "ai": {"resources": {"stealth": 1.0}},
            "human": {}
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.labs[0].id, "a");
    }
}
