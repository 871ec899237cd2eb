//! The effect engine: the one mutation vocabulary shared by actions,
//! events, news, and modules.
//!
//! Applying an effect list is a plain fold; each effect mutates the world
//! immediately and unconditionally. There is no failure path: unknown lab
//! ids, stat names, market names, metric names, and meter names are
//! silently ignored so that content catalogs stay forward-compatible with
//! older engine builds. That tolerance is documented behavior, not a bug.

use crate::state::{FactionId, WorldState};
use serde::{Deserialize, Serialize};

/// A typed world mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    AddResource {
        faction: FactionId,
        resource: String,
        amount: f64,
    },
    ModifyLabStat {
        lab: String,
        stat: String,
        delta: f64,
    },
    ChangeGlobalMarket {
        market: String,
        delta: f64,
    },
    SetFlag {
        flag: String,
    },
    AdjustProgress {
        metric: String,
        amount: f64,
    },
    AdjustMeter {
        faction: FactionId,
        meter: String,
        amount: f64,
    },
    /// An effect kind this engine build does not know. Deliberately a no-op.
    Unrecognized {
        kind: String,
    },
}

impl Effect {
    /// Cheap magnitude heuristic used by the automatic action policy:
    /// the absolute numeric weight of the mutation, whatever its kind.
    pub fn magnitude(&self) -> f64 {
        match self {
            Effect::AddResource { amount, .. } => amount.abs(),
            Effect::ModifyLabStat { delta, .. } => delta.abs(),
            Effect::ChangeGlobalMarket { delta, .. } => delta.abs(),
            Effect::AdjustProgress { amount, .. } => amount.abs(),
            Effect::AdjustMeter { amount, .. } => amount.abs(),
            Effect::SetFlag { .. } | Effect::Unrecognized { .. } => 0.0,
        }
    }
}

/// Apply one effect to the world.
pub fn apply_effect(state: &mut WorldState, effect: &Effect) {
    match effect {
        Effect::AddResource {
            faction,
            resource,
            amount,
        } => {
            state.faction_mut(*faction).add_resource(resource, *amount);
        }
        Effect::ModifyLabStat { lab, stat, delta } => {
            let Some(lab) = state.lab_mut(lab) else {
                log::debug!("ignoring effect on unknown lab '{lab}'");
                return;
            };
            match stat.as_str() {
                "compute_capacity" => lab.compute_capacity += delta,
                "available_compute" => lab.available_compute += delta,
                "safety_commitment" => lab.safety_commitment += delta,
                "capability_focus" => lab.capability_focus += delta,
                "security" => lab.security += delta,
                "influence" => lab.influence += delta,
                "openness" => lab.openness += delta,
                "funding" => lab.funding += delta,
                other => {
                    log::debug!("ignoring effect on unknown lab stat '{other}'");
                    return;
                }
            }
            lab.clamp_stat(stat);
        }
        Effect::ChangeGlobalMarket { market, delta } => {
            state.change_market(market, *delta);
        }
        Effect::SetFlag { flag } => {
            state.set_flag(flag);
        }
        Effect::AdjustProgress { metric, amount } => {
            state.progress.adjust(metric, *amount);
        }
        Effect::AdjustMeter {
            faction,
            meter,
            amount,
        } => {
            let faction = state.faction_mut(*faction);
            match meter.as_str() {
                "suspicion" => faction.suspicion.add(*amount),
                "autonomy" => faction.autonomy.add(*amount),
                "legitimacy" => faction.legitimacy.add(*amount),
                "hard_power" => faction.hard_power.add(*amount),
                other => log::debug!("ignoring adjustment to unknown meter '{other}'"),
            }
        }
        Effect::Unrecognized { kind } => {
            log::debug!("ignoring unrecognized effect kind '{kind}'");
        }
    }
}

/// Apply an effect list in order.
pub fn apply_effects(state: &mut WorldState, effects: &[Effect]) {
    for effect in effects {
        apply_effect(state, effect);
    }
}
