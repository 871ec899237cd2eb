//! The turn/phase controller: one session's state machine.
//!
//! A turn runs action resolution (both factions in a fixed order), then the
//! event and news trigger checks, then the world-advancement ticks, then
//! terminal-condition evaluation. Interactive play pauses the machine at
//! each point the player owes a decision; batch play resolves those points
//! automatically with the same RNG stream, so a batch session and an
//! interactive session that makes the same choices produce identical
//! worlds.

use crate::action::{choose_action, resolve_action, ActionError};
use crate::catalog::{eligible_actions, ActionDef, Catalogs, EventDef, NewsDef};
use crate::config::SimConfig;
use crate::defines::timers;
use crate::outcome::{evaluate, Outcome};
use crate::progression::{BonusLedger, ProgressionError, ProgressionState};
use crate::scenario::{Scenario, ScenarioError};
use crate::state::{FactionId, WorldState};
use crate::summary::{ActionRecord, EventRecord, RejectedAction, TurnSummary};
use crate::systems::run_world_tick;
use crate::trigger::{
    acknowledge_news, auto_option_index, fire_event, fire_news, resolve_event_option,
    PendingEvent, PendingNews,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Where the session's state machine is paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// The player owes an action (or a pass)
    AwaitingPlayerAction,
    /// A fired event owes an option choice
    AwaitingEventChoice,
    /// A fired news item owes an acknowledgment
    AwaitingNewsAcknowledgment,
    /// The turn fully resolved; call `begin_turn` for the next one
    TurnComplete,
    GameOver,
}

/// One full game session: world, content, configuration, and the phase
/// machine that sequences them.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: WorldState,
    catalogs: Catalogs,
    config: SimConfig,
    max_turns: u64,
    phase: Phase,
    outcome: Outcome,
    progression: ProgressionState,
    pending_event: Option<PendingEvent>,
    pending_news: Option<PendingNews>,
    event_timer: i64,
    news_timer: i64,
    record: TurnSummary,
    last_summary: Option<TurnSummary>,
}

impl GameSession {
    pub fn new(
        scenario: &Scenario,
        catalogs: Catalogs,
        config: SimConfig,
    ) -> Result<Self, ScenarioError> {
        let mut state = WorldState::from_scenario(scenario)?;
        let event_timer = state.rng.next_int(timers::EVENT_MIN, timers::EVENT_MAX + 1);
        let news_timer = state.rng.next_int(timers::NEWS_MIN, timers::NEWS_MAX + 1);
        let record = TurnSummary::begin(0, &state);
        Ok(Self {
            progression: ProgressionState::new(&catalogs),
            state,
            catalogs,
            config,
            max_turns: scenario.max_turns,
            phase: Phase::TurnComplete,
            outcome: Outcome::Undecided,
            pending_event: None,
            pending_news: None,
            event_timer,
            news_timer,
            record,
            last_summary: None,
        })
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn progression(&self) -> &ProgressionState {
        &self.progression
    }

    /// The most recently completed turn's summary.
    pub fn last_summary(&self) -> Option<&TurnSummary> {
        self.last_summary.as_ref()
    }

    /// Actions the given faction could take right now.
    pub fn available_actions(&self, faction: FactionId) -> Vec<&ActionDef> {
        eligible_actions(&self.state, &self.catalogs, faction)
    }

    /// The event waiting for a choice, if the machine is paused on one.
    pub fn pending_event(&self) -> Option<&EventDef> {
        self.pending_event
            .as_ref()
            .and_then(|pending| self.catalogs.events.iter().find(|e| e.id == pending.event_id))
    }

    /// The news item waiting for acknowledgment, if any.
    pub fn pending_news(&self) -> Option<&NewsDef> {
        self.pending_news
            .as_ref()
            .and_then(|pending| self.catalogs.news.iter().find(|n| n.id == pending.news_id))
    }

    /// Open the next turn. The machine pauses for the player's action;
    /// actions actually resolve, in faction order, when the player submits.
    /// Without a player faction, submit a pass (or use `advance_turn`).
    pub fn begin_turn(&mut self) {
        assert!(
            self.phase == Phase::TurnComplete,
            "begin_turn called in phase {:?}",
            self.phase
        );
        self.record = TurnSummary::begin(self.state.turn, &self.state);
        self.phase = Phase::AwaitingPlayerAction;
    }

    /// Resolve the player's action (`None` passes) and run the turn as far
    /// as the next pause point.
    pub fn submit_action(&mut self, action_id: Option<&str>) -> Result<(), ActionError> {
        assert!(
            self.phase == Phase::AwaitingPlayerAction,
            "submit_action called in phase {:?}",
            self.phase
        );

        // Validate the player's submission before anything resolves, so a
        // rejected submission leaves the whole turn untouched and
        // retryable.
        let player_action = match (self.config.player, action_id) {
            (None, Some(id)) => {
                // An id without a player faction is a caller bug, not a pass.
                return Err(ActionError::NotEligible {
                    id: id.to_string(),
                    reason: "no player faction is configured".to_string(),
                });
            }
            (Some(faction), Some(id)) => {
                let action = self
                    .catalogs
                    .action(id)
                    .ok_or_else(|| ActionError::UnknownAction(id.to_string()))?
                    .clone();
                if action.faction != faction {
                    return Err(ActionError::NotEligible {
                        id: id.to_string(),
                        reason: format!("belongs to {}", action.faction),
                    });
                }
                for (resource, &required) in &action.cost {
                    let available = self.state.faction(faction).resource(resource);
                    if available < required {
                        return Err(ActionError::NotAffordable {
                            resource: resource.clone(),
                            required,
                            available,
                        });
                    }
                }
                Some(action)
            }
            _ => None,
        };

        // Both factions act in a fixed order; the player's slot takes the
        // submitted action, every other slot plays automatically.
        for faction in [FactionId::Ai, FactionId::Human] {
            if self.config.player == Some(faction) {
                if let Some(action) = &player_action {
                    // Pre-validated above; a failure here means an earlier
                    // automatic action drained the player mid-turn.
                    match resolve_action(&mut self.state, action) {
                        Ok(()) => self.record.actions.push(ActionRecord {
                            faction,
                            action_id: action.id.clone(),
                        }),
                        Err(error) => {
                            log::warn!("player action '{}' failed late: {error}", action.id);
                            self.record.rejected.push(RejectedAction {
                                faction,
                                action_id: action.id.clone(),
                                reason: error.to_string(),
                            });
                        }
                    }
                }
            } else {
                self.act_automatically(faction);
            }
        }

        self.run_triggers();
        self.settle();
        Ok(())
    }

    /// Resolve the pending event with the chosen option.
    pub fn submit_event_choice(&mut self, option_index: usize) {
        assert!(
            self.phase == Phase::AwaitingEventChoice,
            "submit_event_choice called in phase {:?}",
            self.phase
        );
        let pending = self.pending_event.take().expect("phase implies a pending event");
        self.resolve_pending_event(&pending, option_index);
        self.settle();
    }

    /// Acknowledge the pending news item, applying its effects.
    pub fn submit_news_ack(&mut self) {
        assert!(
            self.phase == Phase::AwaitingNewsAcknowledgment,
            "submit_news_ack called in phase {:?}",
            self.phase
        );
        let pending = self.pending_news.take().expect("phase implies pending news");
        self.resolve_pending_news(&pending);
        self.settle();
    }

    /// Install a constructor module. Available whenever the game is live,
    /// independent of the turn phase.
    pub fn install_module(&mut self, module_id: &str) -> Result<(), ProgressionError> {
        if !self.config.features.progression {
            return Err(ProgressionError::Disabled);
        }
        self.progression
            .install(&mut self.state, &self.catalogs, module_id)
    }

    /// Prune an installed constructor module.
    pub fn prune_module(&mut self, module_id: &str) -> Result<(), ProgressionError> {
        if !self.config.features.progression {
            return Err(ProgressionError::Disabled);
        }
        self.progression
            .prune(&mut self.state, &self.catalogs, module_id)
    }

    /// Run one full turn automatically and return its summary. Batch mode's
    /// workhorse; panics if a player decision is already pending.
    #[instrument(skip_all, name = "turn")]
    pub fn advance_turn(&mut self) -> TurnSummary {
        self.begin_turn();
        while self.phase == Phase::AwaitingPlayerAction {
            self.submit_action(None).expect("a pass cannot fail");
        }
        while let Some(pending) = self.pending_event.take() {
            let index = self
                .pending_event_auto_index(&pending);
            self.resolve_pending_event(&pending, index);
            self.settle();
        }
        while let Some(pending) = self.pending_news.take() {
            self.resolve_pending_news(&pending);
            self.settle();
        }
        self.last_summary
            .clone()
            .expect("a completed turn always leaves a summary")
    }

    /// Run up to `turns` automatic turns, stopping early at a terminal
    /// outcome.
    pub fn run_batch(&mut self, turns: u64) -> Vec<TurnSummary> {
        let mut summaries = Vec::new();
        for _ in 0..turns {
            if self.outcome.is_over() {
                break;
            }
            summaries.push(self.advance_turn());
        }
        summaries
    }

    fn act_automatically(&mut self, faction: FactionId) {
        let chosen =
            choose_action(&mut self.state, &self.catalogs, faction).map(|action| action.clone());
        if let Some(action) = chosen {
            // Eligibility already checked affordability; a failure here
            // would be a bug in the eligibility filter.
            if let Err(error) = resolve_action(&mut self.state, &action) {
                log::warn!("automatic action '{}' failed: {error}", action.id);
                return;
            }
            self.record.actions.push(ActionRecord {
                faction,
                action_id: action.id,
            });
        }
    }

    /// Tick the event and news timers; a timer reaching zero fires its
    /// trigger check and re-rolls.
    fn run_triggers(&mut self) {
        self.event_timer -= 1;
        if self.event_timer <= 0 {
            self.event_timer = self
                .state
                .rng
                .next_int(timers::EVENT_MIN, timers::EVENT_MAX + 1);
            let acting = self.config.player.unwrap_or(FactionId::Ai);
            self.pending_event =
                fire_event(&mut self.state, &self.catalogs, &self.config.features, acting);
        }

        self.news_timer -= 1;
        if self.news_timer <= 0 {
            self.news_timer = self
                .state
                .rng
                .next_int(timers::NEWS_MIN, timers::NEWS_MAX + 1);
            self.pending_news = fire_news(&mut self.state, &self.catalogs, &self.config.features);
        }
    }

    /// Drive the machine to the next pause point, resolving automatically
    /// where no player decision is owed. Events always settle before news.
    fn settle(&mut self) {
        if self.pending_event.is_some() {
            if self.config.player.is_some() {
                self.phase = Phase::AwaitingEventChoice;
                return;
            }
            let pending = self.pending_event.take().expect("checked above");
            let index = self.pending_event_auto_index(&pending);
            self.resolve_pending_event(&pending, index);
        }

        if self.pending_news.is_some() {
            if self.config.player.is_some() {
                self.phase = Phase::AwaitingNewsAcknowledgment;
                return;
            }
            let pending = self.pending_news.take().expect("checked above");
            self.resolve_pending_news(&pending);
        }

        self.finish_turn();
    }

    fn pending_event_auto_index(&mut self, pending: &PendingEvent) -> usize {
        match self.catalogs.events.iter().find(|e| e.id == pending.event_id) {
            Some(event) => auto_option_index(&mut self.state.rng, event, pending.faction),
            None => 0,
        }
    }

    fn resolve_pending_event(&mut self, pending: &PendingEvent, option_index: usize) {
        if let Some(event) = self
            .catalogs
            .events
            .iter()
            .find(|e| e.id == pending.event_id)
            .cloned()
        {
            resolve_event_option(&mut self.state, &event, pending.faction, option_index);
        }
        self.record.event = Some(EventRecord {
            event_id: pending.event_id.clone(),
            option_index,
        });
    }

    fn resolve_pending_news(&mut self, pending: &PendingNews) {
        if let Some(news) = self
            .catalogs
            .news
            .iter()
            .find(|n| n.id == pending.news_id)
            .cloned()
        {
            acknowledge_news(&mut self.state, &news);
        }
        self.record.news = Some(pending.news_id.clone());
    }

    /// Advance world dynamics for the turn, then evaluate the ending.
    fn finish_turn(&mut self) {
        let ticks = self.config.ticks_per_turn.max(1);
        let dt = 1.0 / f64::from(ticks);
        let ledger = if self.config.features.progression {
            self.progression.ledger
        } else {
            BonusLedger::default()
        };

        for _ in 0..ticks {
            if self.config.features.progression {
                self.progression.accrue(&self.state, dt);
            }
            run_world_tick(&mut self.state, &self.config, &ledger);

            let frequency = u64::from(self.config.checksum_frequency);
            if frequency > 0 && self.state.tick % frequency == 0 {
                let checksum = self.state.checksum();
                log::debug!("tick {} checksum {checksum:#018x}", self.state.tick);
                self.record.checksum = Some(checksum);
            }
        }

        self.state.turn += 1;
        self.outcome = evaluate(&self.state, &self.config, self.max_turns);
        self.phase = if self.outcome.is_over() {
            log::info!("game over on turn {}: {}", self.state.turn, self.outcome);
            Phase::GameOver
        } else {
            Phase::TurnComplete
        };

        self.record.outcome = self.outcome;
        self.record.snapshot = crate::summary::ProgressSnapshot::capture(&self.state);
        self.last_summary = Some(std::mem::replace(
            &mut self.record,
            TurnSummary::begin(self.state.turn, &self.state),
        ));
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
