//! Content catalogs: the parsed in-memory shape of action/event/news/module
//! definitions.
//!
//! Catalogs are read-only configuration injected into the engine at
//! construction; the engine never assumes an authoring format beyond these
//! structs. Unknown fields are tolerated everywhere, and unknown effect
//! kinds compile to [`Effect::Unrecognized`] rather than an error, so data
//! written for a newer engine still loads.

use crate::config::FeatureSet;
use crate::effect::Effect;
use crate::state::{FactionId, WorldState};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Raw effect as authored in a catalog. Compiled to [`Effect`] at the parse
/// boundary; this is the only place the "unknown kind" policy lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectDef {
    pub kind: String,
    /// Owning faction for resource/meter effects. Defaults to the faction
    /// of the entry the effect belongs to.
    #[serde(default)]
    pub faction: Option<FactionId>,
    /// Lab id, market name, flag id, metric name, or meter name, depending
    /// on the kind.
    #[serde(default)]
    pub target: String,
    /// Lab stat name for `modify_lab_stat`.
    #[serde(default)]
    pub stat: String,
    #[serde(default)]
    pub amount: f64,
}

impl EffectDef {
    /// Compile to a typed effect. `owner` supplies the faction when the
    /// authored effect omits one.
    pub fn compile(&self, owner: FactionId) -> Effect {
        let faction = self.faction.unwrap_or(owner);
        match self.kind.as_str() {
            "add_resource" => Effect::AddResource {
                faction,
                resource: self.target.clone(),
                amount: self.amount,
            },
            // modify_region_stat is the legacy spelling from older catalogs.
            "modify_lab_stat" | "modify_region_stat" => Effect::ModifyLabStat {
                lab: self.target.clone(),
                stat: self.stat.clone(),
                delta: self.amount,
            },
            "change_global_market" => Effect::ChangeGlobalMarket {
                market: self.target.clone(),
                delta: self.amount,
            },
            "set_flag" => Effect::SetFlag {
                flag: self.target.clone(),
            },
            "adjust_progress" => Effect::AdjustProgress {
                metric: self.target.clone(),
                amount: self.amount,
            },
            "adjust_meter" => Effect::AdjustMeter {
                faction,
                meter: self.target.clone(),
                amount: self.amount,
            },
            other => Effect::Unrecognized {
                kind: other.to_string(),
            },
        }
    }
}

fn compile_all(defs: &[EffectDef], owner: FactionId) -> Vec<Effect> {
    defs.iter().map(|def| def.compile(owner)).collect()
}

/// An action one faction can take.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub faction: FactionId,
    /// Policy category ("capability", "safety", ...); ranks automatic play
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub cost: FxHashMap<String, f64>,
    #[serde(default)]
    pub effects: Vec<EffectDef>,
    /// Upgrade flag granted on success. Once set, the action leaves the
    /// eligible pool for the rest of the session.
    #[serde(default)]
    pub grants: Option<String>,
    #[serde(default)]
    pub required_flags: Vec<String>,
    #[serde(default)]
    pub forbidden_flags: Vec<String>,
}

impl ActionDef {
    pub fn compiled_effects(&self) -> Vec<Effect> {
        compile_all(&self.effects, self.faction)
    }

    /// Sum of absolute effect amounts; the policy's cheap value heuristic.
    pub fn effect_magnitude(&self) -> f64 {
        self.compiled_effects().iter().map(Effect::magnitude).sum()
    }
}

/// Declarative trigger conditions for events and news.
///
/// Metric thresholds only apply under the elaborated feature set; the
/// simplified ruleset ignores them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conditions {
    #[serde(default)]
    pub min_turn: Option<u64>,
    #[serde(default)]
    pub max_turn: Option<u64>,
    #[serde(default)]
    pub required_flag: Option<String>,
    #[serde(default)]
    pub forbidden_flag: Option<String>,
    #[serde(default)]
    pub min_fci: Option<f64>,
    #[serde(default)]
    pub min_rsi: Option<f64>,
    #[serde(default)]
    pub min_autonomy: Option<f64>,
    #[serde(default)]
    pub min_suspicion: Option<f64>,
    #[serde(default)]
    pub min_governance: Option<f64>,
}

impl Conditions {
    pub fn holds(&self, state: &WorldState, features: &FeatureSet) -> bool {
        if self.min_turn.is_some_and(|t| state.turn < t) {
            return false;
        }
        if self.max_turn.is_some_and(|t| state.turn > t) {
            return false;
        }
        if self
            .required_flag
            .as_deref()
            .is_some_and(|flag| !state.has_flag(flag))
        {
            return false;
        }
        if self
            .forbidden_flag
            .as_deref()
            .is_some_and(|flag| state.has_flag(flag))
        {
            return false;
        }
        if features.event_thresholds {
            if self.min_fci.is_some_and(|v| state.progress.fci < v) {
                return false;
            }
            if self.min_rsi.is_some_and(|v| state.progress.rsi < v) {
                return false;
            }
            if self
                .min_autonomy
                .is_some_and(|v| state.ai.autonomy.get() < v)
            {
                return false;
            }
            if self
                .min_suspicion
                .is_some_and(|v| state.ai.suspicion.get() < v)
            {
                return false;
            }
            if self
                .min_governance
                .is_some_and(|v| state.progress.governance < v)
            {
                return false;
            }
        }
        true
    }
}

/// One selectable branch of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventOption {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub effects: Vec<EffectDef>,
}

/// A narrative event with per-faction option branches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDef {
    pub id: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub conditions: Conditions,
    #[serde(default)]
    pub ai_options: Vec<EventOption>,
    #[serde(default)]
    pub human_options: Vec<EventOption>,
}

fn default_weight() -> f64 {
    1.0
}

impl EventDef {
    /// Options for the acting faction only; the other branch is never
    /// surfaced to callers.
    pub fn options_for(&self, faction: FactionId) -> &[EventOption] {
        match faction {
            FactionId::Ai => &self.ai_options,
            FactionId::Human => &self.human_options,
        }
    }

    pub fn compile_option(&self, faction: FactionId, option_index: usize) -> Vec<Effect> {
        let options = self.options_for(faction);
        options
            .get(option_index)
            .map(|option| compile_all(&option.effects, faction))
            .unwrap_or_default()
    }
}

/// A news item: one dismiss action, effects apply unconditionally on
/// acknowledgment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsDef {
    pub id: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub conditions: Conditions,
    #[serde(default)]
    pub effects: Vec<EffectDef>,
    /// Whose world the item is about, for effect faction defaulting
    #[serde(default = "default_news_faction")]
    pub faction: FactionId,
}

fn default_news_faction() -> FactionId {
    FactionId::Human
}

impl NewsDef {
    pub fn compiled_effects(&self) -> Vec<Effect> {
        compile_all(&self.effects, self.faction)
    }
}

/// A typed (kind, magnitude) pair on a constructor module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleEffectDef {
    pub kind: String,
    pub magnitude: f64,
}

/// A node of the constructor tech tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub branch: String,
    #[serde(default = "default_tier")]
    pub tier: u8,
    pub cost: f64,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub effects: Vec<ModuleEffectDef>,
    /// Negative side of the bargain, applied on install alongside effects
    #[serde(default)]
    pub tradeoffs: Vec<ModuleEffectDef>,
    /// Breakthrough modules cannot be pruned and may unlock a branch
    #[serde(default)]
    pub breakthrough: bool,
    #[serde(default)]
    pub unlocks_branch: Option<String>,
}

fn default_tier() -> u8 {
    1
}

/// A set bonus: activates once when every required module is installed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynergyDef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub requires: Vec<String>,
    #[serde(default)]
    pub effects: Vec<ModuleEffectDef>,
}

/// Everything the engine consumes as content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalogs {
    #[serde(default)]
    pub actions: Vec<ActionDef>,
    #[serde(default)]
    pub events: Vec<EventDef>,
    #[serde(default)]
    pub news: Vec<NewsDef>,
    #[serde(default)]
    pub modules: Vec<ModuleDef>,
    #[serde(default)]
    pub synergies: Vec<SynergyDef>,
    /// Branches open from the start (others need a breakthrough unlock)
    #[serde(default)]
    pub open_branches: Vec<String>,
}

impl Catalogs {
    pub fn module(&self, id: &str) -> Option<&ModuleDef> {
        self.modules.iter().find(|module| module.id == id)
    }

    pub fn action(&self, id: &str) -> Option<&ActionDef> {
        self.actions.iter().find(|action| action.id == id)
    }
}

/// Actions currently available to a faction, in catalog order.
///
/// Pure: no mutation, stable with respect to catalog order (downstream
/// tie-breaks depend on that order, weighting does not).
pub fn eligible_actions<'a>(
    state: &WorldState,
    catalogs: &'a Catalogs,
    faction: FactionId,
) -> Vec<&'a ActionDef> {
    catalogs
        .actions
        .iter()
        .filter(|action| action.faction == faction)
        // A once-taken upgrade action disappears from the pool.
        .filter(|action| {
            action
                .grants
                .as_deref()
                .map_or(true, |flag| !state.has_flag(flag))
        })
        .filter(|action| action.required_flags.iter().all(|flag| state.has_flag(flag)))
        .filter(|action| !action.forbidden_flags.iter().any(|flag| state.has_flag(flag)))
        .filter(|action| state.faction(faction).can_afford(&action.cost))
        .collect()
}

/// Events currently eligible to fire, in catalog order.
pub fn eligible_events<'a>(
    state: &WorldState,
    catalogs: &'a Catalogs,
    features: &FeatureSet,
) -> Vec<&'a EventDef> {
    catalogs
        .events
        .iter()
        .filter(|event| !state.seen_events.contains(&event.id))
        .filter(|event| event.conditions.holds(state, features))
        .collect()
}

/// News items currently eligible to fire, in catalog order.
pub fn eligible_news<'a>(
    state: &WorldState,
    catalogs: &'a Catalogs,
    features: &FeatureSet,
) -> Vec<&'a NewsDef> {
    catalogs
        .news
        .iter()
        .filter(|news| !state.seen_news.contains(&news.id))
        .filter(|news| news.conditions.holds(state, features))
        .collect()
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
