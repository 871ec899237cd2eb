//! Action resolution: one resolver shared by automatic and player play.
//!
//! Rejections are structured values, not panics, so a UI can surface "not
//! affordable" inline without interrupting the turn.

use crate::catalog::{eligible_actions, ActionDef, Catalogs};
use crate::defines::policy;
use crate::effect::apply_effects;
use crate::state::{FactionId, WorldState};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("not affordable: {resource} requires {required:.2}, have {available:.2}")]
    NotAffordable {
        resource: String,
        required: f64,
        available: f64,
    },
    #[error("unknown action '{0}'")]
    UnknownAction(String),
    #[error("action '{id}' not eligible: {reason}")]
    NotEligible { id: String, reason: String },
}

/// Resolve one action for its faction.
///
/// Unaffordable actions fail before any mutation: no cost is deducted and
/// no effect lands. On success the full cost map is paid, the effect list
/// applied, and the grants flag (if any) set, which retires the action
/// from the eligible pool for the rest of the session.
pub fn resolve_action(state: &mut WorldState, action: &ActionDef) -> Result<(), ActionError> {
    let faction = state.faction(action.faction);
    for (resource, &required) in &action.cost {
        let available = faction.resource(resource);
        if available < required {
            return Err(ActionError::NotAffordable {
                resource: resource.clone(),
                required,
                available,
            });
        }
    }

    state.faction_mut(action.faction).pay(&action.cost);
    apply_effects(state, &action.compiled_effects());
    if let Some(flag) = &action.grants {
        // The world flag retires the action; the faction set records who
        // earned the upgrade.
        state.set_flag(flag);
        state
            .faction_mut(action.faction)
            .upgrades
            .insert(flag.clone());
    }

    log::debug!("{} resolved action '{}'", action.faction, action.id);
    Ok(())
}

fn category_rank(faction: FactionId, category: &str) -> usize {
    let priorities: &[&str] = match faction {
        FactionId::Ai => &policy::AI_PRIORITIES,
        FactionId::Human => &policy::HUMAN_PRIORITIES,
    };
    priorities
        .iter()
        .position(|&c| c == category)
        .unwrap_or(priorities.len())
}

/// Pick an action for automatic play, or `None` to pass.
///
/// Ranking: faction category priority, then effect magnitude (descending),
/// then id, fully deterministic. When the top two candidates' magnitudes
/// sit within `SCORE_EPSILON` of each other at equal priority, the RNG
/// breaks the tie uniformly between exactly those two. Candidates past the
/// second never join the coin flip, even if they are also within epsilon;
/// that truncation is a deliberate balance choice.
pub fn choose_action<'a>(
    state: &mut WorldState,
    catalogs: &'a Catalogs,
    faction: FactionId,
) -> Option<&'a ActionDef> {
    let mut candidates = eligible_actions(state, catalogs, faction);
    if candidates.is_empty() {
        return None;
    }

    candidates.sort_by(|a, b| {
        category_rank(faction, &a.category)
            .cmp(&category_rank(faction, &b.category))
            .then_with(|| b.effect_magnitude().total_cmp(&a.effect_magnitude()))
            .then_with(|| a.id.cmp(&b.id))
    });

    if candidates.len() >= 2 {
        let (first, second) = (candidates[0], candidates[1]);
        let same_priority =
            category_rank(faction, &first.category) == category_rank(faction, &second.category);
        let close =
            (first.effect_magnitude() - second.effect_magnitude()).abs() < policy::SCORE_EPSILON;
        if same_priority && close && state.rng.next_float01() < 0.5 {
            return Some(second);
        }
    }

    Some(candidates[0])
}
