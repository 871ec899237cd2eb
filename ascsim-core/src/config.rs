use crate::state::FactionId;
use serde::{Deserialize, Serialize};

/// Which elaborated mechanics are switched on.
///
/// The simplified turn-based ruleset and the elaborated tick-based ruleset
/// are one engine; this set selects between them (or any mix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// RSI accumulation and the takeoff multiplier ramp
    pub rsi_takeoff: bool,
    /// The constructor (tech-tree) progression subsystem
    pub progression: bool,
    /// Passive per-tick resource regeneration
    pub passive_regen: bool,
    /// Metric-threshold conditions on event/news eligibility
    pub event_thresholds: bool,
}

impl FeatureSet {
    /// The simplified turn-based ruleset.
    pub fn simplified() -> Self {
        Self {
            rsi_takeoff: false,
            progression: false,
            passive_regen: false,
            event_thresholds: false,
        }
    }

    /// The elaborated tick-based ruleset.
    pub fn elaborated() -> Self {
        Self {
            rsi_takeoff: true,
            progression: true,
            passive_regen: true,
            event_thresholds: true,
        }
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::elaborated()
    }
}

/// Difficulty scales the victory thresholds of the player-controlled side
/// only; the automatic side always plays at face values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn threshold_scale(self) -> f64 {
        use crate::defines::outcome;
        match self {
            Difficulty::Easy => outcome::EASY_SCALE,
            Difficulty::Normal => outcome::NORMAL_SCALE,
            Difficulty::Hard => outcome::HARD_SCALE,
        }
    }
}

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub features: FeatureSet,

    /// How finely a turn is subdivided. Per-tick quantities are divided by
    /// this, so trajectories are invariant to the subdivision.
    pub ticks_per_turn: u32,

    pub difficulty: Difficulty,

    /// Which side a human is driving. `None` means fully automatic play
    /// (batch mode); difficulty scaling then applies to neither side.
    pub player: Option<FactionId>,

    /// Compute a world checksum every N ticks (0 = disabled).
    ///
    /// Recommended values:
    /// - `1`: every tick (safest for divergence hunting)
    /// - `10`: every few turns (balanced)
    pub checksum_frequency: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            features: FeatureSet::default(),
            ticks_per_turn: 1,
            difficulty: Difficulty::Normal,
            player: None,
            checksum_frequency: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.ticks_per_turn, 1);
        assert_eq!(config.checksum_frequency, 10);
        assert_eq!(config.features, FeatureSet::elaborated());
    }

    #[test]
    fn test_simplified_features_off() {
        let features = FeatureSet::simplified();
        assert!(!features.rsi_takeoff);
        assert!(!features.progression);
        assert!(!features.passive_regen);
        assert!(!features.event_thresholds);
    }
}
