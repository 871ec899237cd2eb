//! Terminal-condition evaluation.

use crate::config::SimConfig;
use crate::defines::outcome as defines;
use crate::state::{FactionId, WorldState};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How (or whether) a session has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Undecided,
    /// The AI cleared its capability, autonomy, and (elaborated) RSI bars.
    AiAscension,
    /// The coalition reached aligned deployment: safety research plus
    /// institutional governance.
    HumanAlignment,
    /// The coalition boxed the AI in before takeoff got away.
    HumanContainment,
    /// The turn limit ran out with neither side decisive. The status quo
    /// holds, which favors the coalition, but nobody scores a win.
    Timeout,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        self != Outcome::Undecided
    }

    /// The winning side, if any. A timeout has no winner.
    pub fn winner(self) -> Option<FactionId> {
        match self {
            Outcome::AiAscension => Some(FactionId::Ai),
            Outcome::HumanAlignment | Outcome::HumanContainment => Some(FactionId::Human),
            Outcome::Undecided | Outcome::Timeout => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Undecided => "undecided",
            Outcome::AiAscension => "ai ascension",
            Outcome::HumanAlignment => "human victory (alignment)",
            Outcome::HumanContainment => "human victory (containment)",
            Outcome::Timeout => "timeout",
        };
        f.write_str(label)
    }
}

/// Difficulty scales only the player-controlled side's bars; the automatic
/// side always plays at face values.
fn threshold_scale(config: &SimConfig, faction: FactionId) -> f64 {
    if config.player == Some(faction) {
        config.difficulty.threshold_scale()
    } else {
        1.0
    }
}

/// Evaluate terminal conditions. Checked every turn boundary; first match
/// wins, AI ascension ahead of the human paths, alignment ahead of
/// containment.
pub fn evaluate(state: &WorldState, config: &SimConfig, max_turns: u64) -> Outcome {
    let ai_scale = threshold_scale(config, FactionId::Ai);
    let human_scale = threshold_scale(config, FactionId::Human);
    let progress = &state.progress;

    let rsi_cleared = !config.features.rsi_takeoff || progress.rsi >= defines::AI_RSI * ai_scale;
    if progress.fci >= defines::AI_FCI * ai_scale
        && state.ai.autonomy.get() >= defines::AI_AUTONOMY * ai_scale
        && rsi_cleared
    {
        return Outcome::AiAscension;
    }

    if progress.ari >= defines::HUMAN_ARI * human_scale
        && progress.governance >= defines::HUMAN_GOVERNANCE * human_scale
    {
        return Outcome::HumanAlignment;
    }

    // Containment only counts while RSI is still below the ceiling; once
    // takeoff is past it, boxing the AI in no longer ends the game.
    let rsi_contained =
        !config.features.rsi_takeoff || progress.rsi < defines::CONTAINMENT_RSI_CEILING;
    if state.ai.suspicion.get() >= defines::CONTAINMENT_SUSPICION * human_scale
        && progress.governance >= defines::CONTAINMENT_GOVERNANCE * human_scale
        && rsi_contained
    {
        return Outcome::HumanContainment;
    }

    if state.turn >= max_turns {
        return Outcome::Timeout;
    }

    Outcome::Undecided
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;
    use crate::testing::ScenarioBuilder;

    fn auto_config() -> SimConfig {
        SimConfig::default()
    }

    #[test]
    fn test_fresh_world_is_undecided() {
        let state = ScenarioBuilder::new().build();
        assert_eq!(evaluate(&state, &auto_config(), 100), Outcome::Undecided);
        assert!(!Outcome::Undecided.is_over());
    }

    #[test]
    fn test_ai_ascension_needs_all_three_bars() {
        let mut state = ScenarioBuilder::new().build();
        state.progress.fci = defines::AI_FCI;
        state.ai.autonomy.set(defines::AI_AUTONOMY);

        // RSI still zero: no ascension under the elaborated ruleset.
        assert_eq!(evaluate(&state, &auto_config(), 100), Outcome::Undecided);

        state.progress.rsi = defines::AI_RSI;
        assert_eq!(evaluate(&state, &auto_config(), 100), Outcome::AiAscension);
        assert_eq!(Outcome::AiAscension.winner(), Some(FactionId::Ai));
    }

    #[test]
    fn test_simplified_ruleset_drops_the_rsi_bar() {
        let mut config = auto_config();
        config.features = crate::config::FeatureSet::simplified();

        let mut state = ScenarioBuilder::new().build();
        state.progress.fci = defines::AI_FCI;
        state.ai.autonomy.set(defines::AI_AUTONOMY);

        assert_eq!(evaluate(&state, &config, 100), Outcome::AiAscension);
    }

    #[test]
    fn test_alignment_victory() {
        let mut state = ScenarioBuilder::new().build();
        state.progress.ari = defines::HUMAN_ARI;
        state.progress.governance = defines::HUMAN_GOVERNANCE;
        assert_eq!(evaluate(&state, &auto_config(), 100), Outcome::HumanAlignment);
        assert_eq!(
            Outcome::HumanAlignment.winner(),
            Some(FactionId::Human)
        );
    }

    #[test]
    fn test_containment_blocked_past_the_rsi_ceiling() {
        let mut state = ScenarioBuilder::new().build();
        state.ai.suspicion.set(defines::CONTAINMENT_SUSPICION);
        state.progress.governance = defines::CONTAINMENT_GOVERNANCE;
        assert_eq!(
            evaluate(&state, &auto_config(), 100),
            Outcome::HumanContainment
        );

        state.progress.rsi = defines::CONTAINMENT_RSI_CEILING;
        assert_eq!(evaluate(&state, &auto_config(), 100), Outcome::Undecided);
    }

    #[test]
    fn test_timeout_has_no_winner() {
        let mut state = ScenarioBuilder::new().build();
        state.turn = 100;
        let outcome = evaluate(&state, &auto_config(), 100);
        assert_eq!(outcome, Outcome::Timeout);
        assert_eq!(outcome.winner(), None);
    }

    #[test]
    fn test_difficulty_scales_player_side_only() {
        let mut config = auto_config();
        config.player = Some(FactionId::Ai);
        config.difficulty = Difficulty::Easy;

        let mut state = ScenarioBuilder::new().build();
        state.progress.fci = defines::AI_FCI * defines::EASY_SCALE;
        state.ai.autonomy.set(defines::AI_AUTONOMY * defines::EASY_SCALE);
        state.progress.rsi = defines::AI_RSI * defines::EASY_SCALE;

        assert_eq!(evaluate(&state, &config, 100), Outcome::AiAscension);

        // The same world with no player: full bars apply, no win yet.
        config.player = None;
        assert_eq!(evaluate(&state, &config, 100), Outcome::Undecided);
    }
}
