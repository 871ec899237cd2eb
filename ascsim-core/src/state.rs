use crate::bounded::{self, Bounded};
use crate::defines;
use crate::rng::SimRng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One side of the contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactionId {
    /// The emergent AI
    Ai,
    /// The human oversight coalition
    Human,
}

impl FactionId {
    pub fn opponent(self) -> FactionId {
        match self {
            FactionId::Ai => FactionId::Human,
            FactionId::Human => FactionId::Ai,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FactionId::Ai => "ai",
            FactionId::Human => "human",
        }
    }
}

impl std::fmt::Display for FactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-faction state: a resource pool, four bounded meters, and the set of
/// upgrade flags this side has acquired.
///
/// The resource set differs per faction (the AI runs on compute_access /
/// stealth / influence, the coalition on funding / coordination / trust);
/// the engine treats resource names as opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faction {
    pub resources: FxHashMap<String, f64>,
    pub suspicion: Bounded,
    pub autonomy: Bounded,
    pub legitimacy: Bounded,
    pub hard_power: Bounded,
    /// Upgrade identifiers granted by taken actions. Append-only.
    pub upgrades: BTreeSet<String>,
}

impl Default for Faction {
    fn default() -> Self {
        Self {
            resources: FxHashMap::default(),
            suspicion: bounded::new_suspicion(),
            autonomy: bounded::new_autonomy(),
            legitimacy: bounded::new_legitimacy(),
            hard_power: bounded::new_hard_power(),
            upgrades: BTreeSet::new(),
        }
    }
}

impl Faction {
    /// Current amount of a resource; unknown names read as zero.
    pub fn resource(&self, name: &str) -> f64 {
        self.resources.get(name).copied().unwrap_or(0.0)
    }

    /// Add (or drain, with a negative amount) a resource. Resources never go
    /// negative: excess spend clamps to zero.
    pub fn add_resource(&mut self, name: &str, amount: f64) {
        let entry = self.resources.entry(name.to_string()).or_insert(0.0);
        *entry = (*entry + amount).max(0.0);
    }

    /// True if every entry of the cost map is covered by current resources.
    pub fn can_afford(&self, cost: &FxHashMap<String, f64>) -> bool {
        cost.iter().all(|(name, &amount)| self.resource(name) >= amount)
    }

    /// Deduct a full cost map. Caller must have checked affordability; any
    /// shortfall still clamps at zero rather than going negative.
    pub fn pay(&mut self, cost: &FxHashMap<String, f64>) {
        for (name, &amount) in cost {
            self.add_resource(name, -amount);
        }
    }
}

/// A frontier lab (or region, in older catalogs).
///
/// Base stats are mutated by effects; the three derived stats at the bottom
/// are recomputed each tick by smoothed interpolation toward a target, so
/// they carry momentum instead of stepping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lab {
    pub id: String,
    pub name: String,
    pub compute_capacity: f64,
    pub available_compute: f64,
    /// Fraction of effort on safety, 0..1
    pub safety_commitment: f64,
    /// Fraction of effort on capability, 0..1
    pub capability_focus: f64,
    /// Resistance to infiltration, 0..1
    pub security: f64,
    pub influence: f64,
    /// Publication / transparency posture, 0..1
    pub openness: f64,
    pub funding: f64,

    // Derived, smoothed.
    pub capability_level: f64,
    pub research_speed: f64,
    pub acceleration: f64,
}

impl Lab {
    /// Clamp a named base stat after an effect lands on it. Fraction stats
    /// stay in 0..1, pool stats stay non-negative.
    pub fn clamp_stat(&mut self, stat: &str) {
        match stat {
            "safety_commitment" => self.safety_commitment = self.safety_commitment.clamp(0.0, 1.0),
            "capability_focus" => self.capability_focus = self.capability_focus.clamp(0.0, 1.0),
            "security" => self.security = self.security.clamp(0.0, 1.0),
            "openness" => self.openness = self.openness.clamp(0.0, 1.0),
            "compute_capacity" => {
                self.compute_capacity = self.compute_capacity.max(0.0);
                // A capacity cut takes the pooled compute down with it.
                self.available_compute = self.available_compute.clamp(0.0, self.compute_capacity);
            }
            "available_compute" => {
                self.available_compute = self.available_compute.clamp(0.0, self.compute_capacity)
            }
            "influence" => self.influence = self.influence.max(0.0),
            "funding" => self.funding = self.funding.max(0.0),
            _ => {}
        }
    }
}

/// Scalar progress indices shared by the whole world.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalProgress {
    /// Frontier Capability Index
    pub fci: f64,
    /// Alignment Readiness Index
    pub ari: f64,
    /// Share of AI R&D that runs without humans in the loop, 0..1
    pub automation: f64,
    /// Governance control, 0..1
    pub governance: f64,
    /// Recursive self-improvement level (elaborated feature set)
    pub rsi: f64,
}

impl GlobalProgress {
    pub fn add_fci(&mut self, amount: f64) {
        self.fci = (self.fci + amount).clamp(0.0, defines::capability::FCI_MAX);
    }

    pub fn add_ari(&mut self, amount: f64) {
        self.ari = (self.ari + amount).clamp(0.0, defines::safety::ARI_MAX);
    }

    pub fn add_automation(&mut self, amount: f64) {
        self.automation = (self.automation + amount).clamp(0.0, defines::drift::AUTOMATION_MAX);
    }

    pub fn add_governance(&mut self, amount: f64) {
        self.governance = (self.governance + amount).clamp(0.0, defines::drift::GOVERNANCE_MAX);
    }

    pub fn add_rsi(&mut self, amount: f64) {
        self.rsi = (self.rsi + amount).clamp(0.0, defines::takeoff::RSI_MAX);
    }

    /// Adjust a metric by name. Unknown metric names are ignored so catalogs
    /// can reference metrics this build does not know about.
    pub fn adjust(&mut self, metric: &str, amount: f64) {
        match metric {
            "fci" => self.add_fci(amount),
            "ari" => self.add_ari(amount),
            "automation" => self.add_automation(amount),
            "governance" => self.add_governance(amount),
            "rsi" => self.add_rsi(amount),
            other => log::debug!("ignoring adjustment to unknown metric '{other}'"),
        }
    }
}

/// Complete simulation state. Constructed once per session from a scenario
/// and mutated in place; the embedded RNG is the sole source of randomness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    pub turn: u64,
    /// Ticks elapsed within the whole session (a turn may span several)
    pub tick: u64,
    pub rng: SimRng,
    pub ai: Faction,
    pub human: Faction,
    /// Catalog order; iteration order is part of the determinism contract
    pub labs: Vec<Lab>,
    pub progress: GlobalProgress,
    /// Global market prices, mutated by `ChangeGlobalMarket` effects
    pub markets: FxHashMap<String, f64>,
    /// Irreversible narrative/unlock markers. Append-only for the session.
    pub flags: BTreeSet<String>,
    pub seen_events: BTreeSet<String>,
    pub seen_news: BTreeSet<String>,
}

impl WorldState {
    pub fn faction(&self, id: FactionId) -> &Faction {
        match id {
            FactionId::Ai => &self.ai,
            FactionId::Human => &self.human,
        }
    }

    pub fn faction_mut(&mut self, id: FactionId) -> &mut Faction {
        match id {
            FactionId::Ai => &mut self.ai,
            FactionId::Human => &mut self.human,
        }
    }

    pub fn lab(&self, id: &str) -> Option<&Lab> {
        self.labs.iter().find(|lab| lab.id == id)
    }

    pub fn lab_mut(&mut self, id: &str) -> Option<&mut Lab> {
        self.labs.iter_mut().find(|lab| lab.id == id)
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Set a narrative flag. Flags are never removed during play.
    pub fn set_flag(&mut self, flag: &str) {
        if self.flags.insert(flag.to_string()) {
            log::debug!("flag set: {flag}");
        }
    }

    /// Change a global market price. Unknown market names are ignored.
    pub fn change_market(&mut self, market: &str, delta: f64) {
        match self.markets.get_mut(market) {
            Some(price) => *price = (*price + delta).max(0.0),
            None => log::debug!("ignoring change to unknown market '{market}'"),
        }
    }

    /// Compute a deterministic checksum of the world state.
    ///
    /// Used for replay validation and divergence debugging: identical
    /// trajectories produce identical checksums. Maps are hashed in sorted
    /// key order.
    pub fn checksum(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        fn hash_f64<H: Hasher>(hasher: &mut H, v: f64) {
            v.to_bits().hash(hasher);
        }

        fn hash_faction<H: Hasher>(hasher: &mut H, faction: &Faction) {
            let mut names: Vec<_> = faction.resources.keys().collect();
            names.sort();
            for name in names {
                name.hash(hasher);
                hash_f64(hasher, faction.resources[name]);
            }
            hash_f64(hasher, faction.suspicion.get());
            hash_f64(hasher, faction.autonomy.get());
            hash_f64(hasher, faction.legitimacy.get());
            hash_f64(hasher, faction.hard_power.get());
            for upgrade in &faction.upgrades {
                upgrade.hash(hasher);
            }
        }

        let mut hasher = DefaultHasher::new();

        self.turn.hash(&mut hasher);
        self.tick.hash(&mut hasher);
        self.rng.state().hash(&mut hasher);

        hash_faction(&mut hasher, &self.ai);
        hash_faction(&mut hasher, &self.human);

        for lab in &self.labs {
            lab.id.hash(&mut hasher);
            hash_f64(&mut hasher, lab.compute_capacity);
            hash_f64(&mut hasher, lab.available_compute);
            hash_f64(&mut hasher, lab.safety_commitment);
            hash_f64(&mut hasher, lab.capability_focus);
            hash_f64(&mut hasher, lab.security);
            hash_f64(&mut hasher, lab.influence);
            hash_f64(&mut hasher, lab.openness);
            hash_f64(&mut hasher, lab.funding);
            hash_f64(&mut hasher, lab.capability_level);
            hash_f64(&mut hasher, lab.research_speed);
            hash_f64(&mut hasher, lab.acceleration);
        }

        hash_f64(&mut hasher, self.progress.fci);
        hash_f64(&mut hasher, self.progress.ari);
        hash_f64(&mut hasher, self.progress.automation);
        hash_f64(&mut hasher, self.progress.governance);
        hash_f64(&mut hasher, self.progress.rsi);

        let mut markets: Vec<_> = self.markets.keys().collect();
        markets.sort();
        for market in markets {
            market.hash(&mut hasher);
            hash_f64(&mut hasher, self.markets[market]);
        }

        for flag in &self.flags {
            flag.hash(&mut hasher);
        }
        for id in &self.seen_events {
            id.hash(&mut hasher);
        }
        for id in &self.seen_news {
            id.hash(&mut hasher);
        }

        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScenarioBuilder;

    #[test]
    fn test_resource_floor() {
        let mut faction = Faction::default();
        faction.add_resource("stealth", 1.0);
        faction.add_resource("stealth", -5.0);
        assert_eq!(faction.resource("stealth"), 0.0);

        // Repeated negative adds stay at the floor.
        faction.add_resource("stealth", -1.0);
        assert_eq!(faction.resource("stealth"), 0.0);
    }

    #[test]
    fn test_unknown_resource_reads_zero() {
        let faction = Faction::default();
        assert_eq!(faction.resource("nonexistent"), 0.0);
    }

    #[test]
    fn test_can_afford_partial_shortfall() {
        let mut faction = Faction::default();
        faction.add_resource("influence", 2.0);
        faction.add_resource("funding", 1.0);

        let mut cost = FxHashMap::default();
        cost.insert("influence".to_string(), 1.0);
        cost.insert("funding".to_string(), 1.5);

        // One covered resource is not enough; every entry must be covered.
        assert!(!faction.can_afford(&cost));
    }

    #[test]
    fn test_lab_stat_clamping() {
        let state = ScenarioBuilder::new().with_lab("deep", 100.0, 0.5).build();
        let mut lab = state.labs[0].clone();

        lab.capability_focus = 3.0;
        lab.clamp_stat("capability_focus");
        assert_eq!(lab.capability_focus, 1.0);

        lab.available_compute = -5.0;
        lab.clamp_stat("available_compute");
        assert_eq!(lab.available_compute, 0.0);

        // Cutting capacity below the pool drags the pool down too.
        lab.available_compute = 100.0;
        lab.compute_capacity = 40.0;
        lab.clamp_stat("compute_capacity");
        assert_eq!(lab.available_compute, 40.0);
    }

    #[test]
    fn test_progress_bounds() {
        let mut progress = GlobalProgress::default();
        progress.add_fci(1_000.0);
        assert_eq!(progress.fci, defines::capability::FCI_MAX);
        progress.add_fci(-2_000.0);
        assert_eq!(progress.fci, 0.0);

        progress.add_automation(5.0);
        assert_eq!(progress.automation, 1.0);
    }

    #[test]
    fn test_unknown_metric_ignored() {
        let mut progress = GlobalProgress::default();
        progress.adjust("quantum_flux", 99.0);
        assert_eq!(progress.fci, 0.0);
        assert_eq!(progress.rsi, 0.0);
    }

    #[test]
    fn test_checksum_sensitive_to_state() {
        let a = ScenarioBuilder::new().with_lab("deep", 100.0, 0.5).build();
        let mut b = a.clone();
        assert_eq!(a.checksum(), b.checksum());

        b.progress.add_fci(0.1);
        assert_ne!(a.checksum(), b.checksum());
    }

    #[test]
    fn test_flags_are_append_only() {
        let mut state = ScenarioBuilder::new().build();
        state.set_flag("escaped_sandbox");
        state.set_flag("escaped_sandbox");
        assert!(state.has_flag("escaped_sandbox"));
        assert_eq!(state.flags.len(), 1);
    }
}
