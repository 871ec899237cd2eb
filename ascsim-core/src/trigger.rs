//! Event and news triggering: weighted selection and resolution.
//!
//! Selected entries join the seen set before resolution completes, so an
//! entry can fire at most once per session no matter how resolution goes.

use crate::catalog::{eligible_events, eligible_news, Catalogs, EventDef, NewsDef};
use crate::config::FeatureSet;
use crate::defines::MIN_SELECTION_WEIGHT;
use crate::effect::apply_effects;
use crate::rng::SimRng;
use crate::state::{FactionId, WorldState};
use serde::{Deserialize, Serialize};

/// An event that fired and is waiting for a choice among the acting
/// faction's options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEvent {
    pub event_id: String,
    /// Whose option branch applies
    pub faction: FactionId,
}

/// A news item waiting for acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingNews {
    pub news_id: String,
}

/// Weighted random selection over an eligible set.
///
/// Weights are floored at 0.01 so an authored zero or negative weight still
/// leaves an entry selectable. The cumulative walk returns the first entry
/// whose running total reaches the roll; the last entry is the fallback for
/// floating-point edge cases at the top of the range.
pub fn weighted_pick<'a, T>(
    rng: &mut SimRng,
    entries: &[&'a T],
    weight_of: impl Fn(&T) -> f64,
) -> Option<&'a T> {
    if entries.is_empty() {
        return None;
    }
    let total: f64 = entries
        .iter()
        .map(|entry| weight_of(entry).max(MIN_SELECTION_WEIGHT))
        .sum();
    let roll = rng.next_float01() * total;

    let mut cumulative = 0.0;
    for entry in entries {
        cumulative += weight_of(entry).max(MIN_SELECTION_WEIGHT);
        if cumulative >= roll {
            return Some(entry);
        }
    }
    entries.last().copied()
}

/// Fire an event for the acting faction, if any is eligible.
///
/// The selected event is marked seen immediately; resolution happens later
/// via [`resolve_event_option`].
pub fn fire_event(
    state: &mut WorldState,
    catalogs: &Catalogs,
    features: &FeatureSet,
    acting: FactionId,
) -> Option<PendingEvent> {
    let selected = {
        let eligible = eligible_events(state, catalogs, features);
        weighted_pick(&mut state.rng, &eligible, |event| event.weight)
            .map(|event| event.id.clone())
    }?;

    state.seen_events.insert(selected.clone());
    log::info!("event fired: {selected}");
    Some(PendingEvent {
        event_id: selected,
        faction: acting,
    })
}

/// Fire a news item, if any is eligible. Marked seen immediately.
pub fn fire_news(
    state: &mut WorldState,
    catalogs: &Catalogs,
    features: &FeatureSet,
) -> Option<PendingNews> {
    let selected = {
        let eligible = eligible_news(state, catalogs, features);
        weighted_pick(&mut state.rng, &eligible, |news| news.weight).map(|news| news.id.clone())
    }?;

    state.seen_news.insert(selected.clone());
    log::info!("news fired: {selected}");
    Some(PendingNews { news_id: selected })
}

/// Apply the chosen option of a pending event.
pub fn resolve_event_option(
    state: &mut WorldState,
    event: &EventDef,
    faction: FactionId,
    option_index: usize,
) {
    let effects = event.compile_option(faction, option_index);
    apply_effects(state, &effects);
    log::debug!(
        "event '{}' resolved with option {} for {}",
        event.id,
        option_index,
        faction
    );
}

/// Pick an option uniformly for the automatic (non-player) path.
pub fn auto_option_index(rng: &mut SimRng, event: &EventDef, faction: FactionId) -> usize {
    let count = event.options_for(faction).len();
    if count <= 1 {
        0
    } else {
        rng.next_int(0, count as i64) as usize
    }
}

/// Acknowledge a news item: its effects apply unconditionally.
pub fn acknowledge_news(state: &mut WorldState, news: &NewsDef) {
    apply_effects(state, &news.compiled_effects());
    log::debug!("news '{}' acknowledged", news.id);
}
