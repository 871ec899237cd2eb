//! Game mechanic constants (defines).
//!
//! Every tuning value in the simulation lives here so balance passes touch
//! one file. Per-tick rates are written for a full turn and normalized by
//! `SimConfig::ticks_per_turn` at the point of use.

/// Capability research constants
pub mod capability {
    /// Compute units per point of pressure (labs contribute
    /// `available_compute / COMPUTE_PER_PRESSURE * capability_focus`)
    pub const COMPUTE_PER_PRESSURE: f64 = 100.0;

    /// Pressure per point of the AI faction's compute-access resource
    pub const COMPUTE_ACCESS_COEF: f64 = 0.4;

    /// FCI gained per point of capability pressure per turn
    pub const FCI_GAIN_RATE: f64 = 0.5;

    /// How strongly automation amplifies capability pressure
    /// (`pressure * (1 + automation * AUTOMATION_COEF)`)
    pub const AUTOMATION_COEF: f64 = 1.5;

    /// Upper bound of the Frontier Capability Index
    pub const FCI_MAX: f64 = 100.0;
}

/// Safety research constants
pub mod safety {
    /// Pressure per point of the human faction's coordination resource
    pub const COORDINATION_COEF: f64 = 0.3;

    /// Pressure per point of the human faction's trust resource
    pub const TRUST_COEF: f64 = 0.2;

    /// ARI gained per point of safety pressure per turn
    pub const ARI_GAIN_RATE: f64 = 0.45;

    /// Upper bound of the Alignment Readiness Index
    pub const ARI_MAX: f64 = 100.0;
}

/// Takeoff regime thresholds and ramp parameters.
///
/// The multiplier is piecewise-linear in RSI: each regime has a base value
/// at its entry threshold and a slope per RSI point above it. Crossing a
/// threshold raises both, which is what makes late-game growth explosive
/// rather than linear.
pub mod takeoff {
    /// RSI level where the "medium" takeoff regime begins
    pub const MEDIUM: f64 = 2.0;
    /// RSI level where the "fast" regime begins
    pub const FAST: f64 = 4.0;
    /// RSI level where the "critical" regime begins
    pub const CRITICAL: f64 = 6.0;
    /// RSI level where the "singularity" regime begins
    pub const SINGULARITY: f64 = 8.0;

    /// Multiplier base / slope for the slow regime (RSI below MEDIUM)
    pub const SLOW_BASE: f64 = 1.0;
    pub const SLOW_SLOPE: f64 = 0.10;

    pub const MEDIUM_BASE: f64 = 1.3;
    pub const MEDIUM_SLOPE: f64 = 0.25;

    pub const FAST_BASE: f64 = 2.0;
    pub const FAST_SLOPE: f64 = 0.5;

    pub const CRITICAL_BASE: f64 = 3.5;
    pub const CRITICAL_SLOPE: f64 = 1.0;

    pub const SINGULARITY_BASE: f64 = 6.0;
    pub const SINGULARITY_SLOPE: f64 = 2.0;

    /// Upper bound of the RSI level
    pub const RSI_MAX: f64 = 10.0;

    /// FCI required before RSI begins accumulating
    pub const RSI_FCI_ACTIVATION: f64 = 25.0;

    /// Automation level required before RSI begins accumulating
    pub const RSI_AUTOMATION_ACTIVATION: f64 = 0.3;

    /// Base RSI gain per turn once active (self-amplified by the ramp)
    pub const RSI_BASE_RATE: f64 = 0.12;

    /// Damping weight of suspicion on RSI growth
    pub const RSI_SUSPICION_DAMP: f64 = 0.5;

    /// Damping weight of governance on RSI growth
    pub const RSI_GOVERNANCE_DAMP: f64 = 1.2;
}

/// Suspicion escalation levels and countermeasure strengths.
///
/// Each level's per-turn feedback is cumulative with the levels below it.
pub mod suspicion {
    /// The coalition has noticed something
    pub const NOTICED: f64 = 0.8;
    /// Formal investigations are under way
    pub const INVESTIGATED: f64 = 1.4;
    /// Public alarm, emergency hearings
    pub const ALARMED: f64 = 2.0;
    /// Active crackdown on frontier compute
    pub const CRACKDOWN: f64 = 2.5;
    /// Full containment posture
    pub const CONTAINMENT: f64 = 2.9;

    /// Suspicion gained per point of capability pressure per turn
    pub const CAPABILITY_COEF: f64 = 0.06;

    /// Suspicion removed per point of AI stealth per turn
    pub const STEALTH_COEF: f64 = 0.05;

    /// Flat suspicion per turn once RSI passes its medium threshold
    pub const RSI_LEAK: f64 = 0.08;

    // Per-turn countermeasure magnitudes, by level.
    pub const NOTICED_LAB_SECURITY: f64 = 0.01;
    pub const NOTICED_GOVERNANCE: f64 = 0.005;

    pub const INVESTIGATED_SAFETY_COMMITMENT: f64 = 0.012;
    pub const INVESTIGATED_CAPABILITY_FOCUS: f64 = 0.008;
    pub const INVESTIGATED_GOVERNANCE: f64 = 0.01;

    pub const ALARMED_STEALTH_DRAIN: f64 = 0.05;
    pub const ALARMED_GOVERNANCE: f64 = 0.02;

    pub const CRACKDOWN_COMPUTE_DRAIN: f64 = 0.08;
    pub const CRACKDOWN_LAB_SECURITY: f64 = 0.02;

    pub const CONTAINMENT_COMPUTE_DRAIN: f64 = 0.15;
    pub const CONTAINMENT_STEALTH_DRAIN: f64 = 0.1;
    pub const CONTAINMENT_GOVERNANCE: f64 = 0.04;
}

/// Meter and index drift constants
pub mod drift {
    /// Base autonomy gain per turn
    pub const AUTONOMY_BASE: f64 = 0.02;

    /// Extra autonomy per turn per point of RSI ratio
    pub const AUTONOMY_RSI_COEF: f64 = 0.1;

    /// Damping weight of governance on autonomy growth
    pub const AUTONOMY_GOVERNANCE_DAMP: f64 = 0.8;

    /// Damping weight of suspicion on autonomy/automation growth
    pub const SUSPICION_DAMP: f64 = 0.3;

    /// Base automation gain per turn
    pub const AUTOMATION_BASE: f64 = 0.004;

    /// Extra automation per turn per point of FCI ratio
    pub const AUTOMATION_FCI_COEF: f64 = 0.03;

    /// Upper bound of the automation level
    pub const AUTOMATION_MAX: f64 = 1.0;

    /// Base governance gain per turn
    pub const GOVERNANCE_BASE: f64 = 0.003;

    /// Extra governance per turn per point of human legitimacy
    pub const GOVERNANCE_LEGITIMACY_COEF: f64 = 0.004;

    /// Upper bound of governance control
    pub const GOVERNANCE_MAX: f64 = 1.0;

    /// Base hard-power gain per turn (human faction)
    pub const HARD_POWER_BASE: f64 = 0.005;

    /// Extra hard power per turn per point of governance
    pub const HARD_POWER_GOVERNANCE_COEF: f64 = 0.02;
}

/// Passive resource regeneration (elaborated feature set only)
pub mod regen {
    /// Compute access per turn per point of automation
    pub const COMPUTE_ACCESS_RATE: f64 = 0.06;

    /// Influence per turn per point of autonomy ratio
    pub const INFLUENCE_RATE: f64 = 0.05;

    /// Stealth per turn, only while suspicion is below NOTICED
    pub const STEALTH_RATE: f64 = 0.03;

    /// Funding per turn per point of FCI ratio (human side benefits from
    /// visible progress too)
    pub const FUNDING_RATE: f64 = 0.08;

    /// Coordination per turn per point of governance
    pub const COORDINATION_RATE: f64 = 0.05;

    /// Trust per turn per point of ARI ratio
    pub const TRUST_RATE: f64 = 0.04;
}

/// Lab derived-stat smoothing
pub mod labs {
    /// Fraction of the gap closed per turn when interpolating derived stats
    pub const SMOOTHING_RATE: f64 = 0.2;

    /// Weight of funding in the research-speed target
    pub const RESEARCH_FUNDING_COEF: f64 = 0.5;

    /// Weight of openness in the research-speed target
    pub const RESEARCH_OPENNESS_COEF: f64 = 0.3;

    /// Weight of automation in the acceleration target
    pub const ACCEL_AUTOMATION_COEF: f64 = 0.6;

    /// Weight of RSI ratio in the acceleration target
    pub const ACCEL_RSI_COEF: f64 = 1.0;

    /// Compute units per point of capability level
    pub const CAPABILITY_LEVEL_SCALE: f64 = 200.0;
}

/// Progression (constructor) subsystem constants
pub mod progression {
    /// Flat currency accrued per turn
    pub const CURRENCY_BASE: f64 = 0.5;

    /// Currency per turn per point of compute access
    pub const CURRENCY_COMPUTE_COEF: f64 = 0.3;

    /// Currency per turn per point of autonomy
    pub const CURRENCY_AUTONOMY_COEF: f64 = 0.4;

    /// Currency per turn per point of RSI
    pub const CURRENCY_RSI_COEF: f64 = 0.25;

    /// Ticks that must elapse between prunes
    pub const PRUNE_COOLDOWN_TICKS: u64 = 20;

    /// Fraction of the original cost refunded on prune
    pub const PRUNE_REFUND_FRACTION: f64 = 0.5;

    /// Instant suspicion added by a prune (dismantling is noisy)
    pub const PRUNE_SUSPICION_PENALTY: f64 = 0.1;

    /// Cumulative-spend milestone threshold
    pub const MILESTONE_SPEND: f64 = 30.0;

    /// Branch-spread milestone: installed modules across at least this many
    /// branches
    pub const MILESTONE_BRANCH_SPREAD: usize = 3;

    /// One-time FCI bonus for each achieved milestone
    pub const MILESTONE_FCI_BONUS: f64 = 2.0;

    /// One-time currency bonus for each achieved milestone
    pub const MILESTONE_CURRENCY_BONUS: f64 = 3.0;
}

/// Victory/defeat thresholds.
///
/// Containment requires RSI below the fast-takeoff threshold: once the
/// explosion is under way, unplugging no longer works.
pub mod outcome {
    pub const AI_FCI: f64 = 85.0;
    pub const AI_AUTONOMY: f64 = 2.2;
    pub const AI_RSI: f64 = 7.0;

    pub const HUMAN_ARI: f64 = 70.0;
    pub const HUMAN_GOVERNANCE: f64 = 0.75;

    pub const CONTAINMENT_SUSPICION: f64 = 2.5;
    pub const CONTAINMENT_GOVERNANCE: f64 = 0.6;
    pub const CONTAINMENT_RSI_CEILING: f64 = 4.0;

    /// Threshold scale for the player-controlled side, by difficulty
    pub const EASY_SCALE: f64 = 0.85;
    pub const NORMAL_SCALE: f64 = 1.0;
    pub const HARD_SCALE: f64 = 1.2;
}

/// Event/news countdown ranges, in turns. Re-rolled after each firing.
pub mod timers {
    pub const EVENT_MIN: i64 = 3;
    pub const EVENT_MAX: i64 = 8;

    pub const NEWS_MIN: i64 = 2;
    pub const NEWS_MAX: i64 = 6;
}

/// Automatic action policy constants
pub mod policy {
    /// Category priority for the AI faction, most urgent first
    pub const AI_PRIORITIES: [&str; 5] =
        ["capability", "stealth", "autonomy", "influence", "economy"];

    /// Category priority for the human coalition, most urgent first
    pub const HUMAN_PRIORITIES: [&str; 5] =
        ["safety", "governance", "oversight", "influence", "economy"];

    /// Two candidates scoring within this margin are tie-broken by the RNG
    pub const SCORE_EPSILON: f64 = 0.05;
}

/// Floor weight for weighted event/news selection
pub const MIN_SELECTION_WEIGHT: f64 = 0.01;
