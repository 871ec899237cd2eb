//! The constructor: the AI faction's tech-tree progression subsystem.
//!
//! A directed-acyclic module graph organized into branches, paid for with a
//! currency that accrues each tick from compute access, autonomy, and RSI.
//! Installed modules feed a persistent [`BonusLedger`]: flat bonuses land
//! once at install time, ongoing ones are folded into the advancement pass
//! every tick.

use crate::catalog::{Catalogs, ModuleDef, ModuleEffectDef, SynergyDef};
use crate::defines::progression as defines;
use crate::state::WorldState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProgressionError {
    #[error("unknown module '{0}'")]
    UnknownModule(String),
    #[error("module '{0}' is already installed")]
    AlreadyInstalled(String),
    #[error("branch '{0}' is locked")]
    BranchLocked(String),
    #[error("missing prerequisite '{0}'")]
    MissingPrerequisite(String),
    #[error("not affordable: costs {cost:.1}, have {currency:.1}")]
    NotAffordable { cost: f64, currency: f64 },
    #[error("module '{0}' is not installed")]
    NotInstalled(String),
    #[error("breakthrough modules cannot be pruned")]
    Breakthrough,
    #[error("'{dependent}' still requires this module")]
    HasDependent { dependent: String },
    #[error("prune on cooldown for {remaining} more ticks")]
    PruneCooldown { remaining: u64 },
    #[error("the progression subsystem is disabled in this ruleset")]
    Disabled,
}

/// Ongoing bonuses from installed modules and active synergies.
///
/// Recomputed from scratch after a prune: module effects are not guaranteed
/// linearly invertible once tradeoffs and synergies are in play, so
/// incremental subtraction is never attempted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BonusLedger {
    /// Multiplier on capability pressure (additive accumulation, applied as
    /// `1 + capability_mult`)
    pub capability_mult: f64,
    /// Multiplier on currency accrual
    pub currency_rate: f64,
    /// Extra stealth regeneration per turn
    pub stealth_regen: f64,
    /// Extra compute-access regeneration per turn
    pub compute_regen: f64,
}

impl BonusLedger {
    /// Fold one ongoing effect kind into the ledger. Returns false for
    /// kinds that are not ledger-borne (instant kinds, unknown kinds).
    fn absorb(&mut self, effect: &ModuleEffectDef) -> bool {
        match effect.kind.as_str() {
            "capability_mult" => self.capability_mult += effect.magnitude,
            "currency_rate" => self.currency_rate += effect.magnitude,
            "stealth_regen" => self.stealth_regen += effect.magnitude,
            "compute_regen" => self.compute_regen += effect.magnitude,
            _ => return false,
        }
        true
    }
}

/// Apply an instant module effect to the world. Ledger-borne and unknown
/// kinds fall through to no-ops here.
fn apply_instant(state: &mut WorldState, effect: &ModuleEffectDef) {
    match effect.kind.as_str() {
        "fci_bonus" => state.progress.add_fci(effect.magnitude),
        "ari_bonus" => state.progress.add_ari(effect.magnitude),
        "compute_access" | "stealth" | "influence" => {
            state.ai.add_resource(&effect.kind, effect.magnitude)
        }
        "suspicion" => state.ai.suspicion.add(effect.magnitude),
        "autonomy" => state.ai.autonomy.add(effect.magnitude),
        "capability_mult" | "currency_rate" | "stealth_regen" | "compute_regen" => {}
        other => log::debug!("ignoring unknown module effect kind '{other}'"),
    }
}

/// Mutable progression state for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionState {
    pub currency: f64,
    pub total_spent: f64,
    pub installed: BTreeSet<String>,
    pub unlocked_branches: BTreeSet<String>,
    pub active_synergies: BTreeSet<String>,
    pub milestones: BTreeSet<String>,
    pub ledger: BonusLedger,
    last_prune_tick: Option<u64>,
}

impl ProgressionState {
    pub fn new(catalogs: &Catalogs) -> Self {
        Self {
            currency: 0.0,
            total_spent: 0.0,
            installed: BTreeSet::new(),
            unlocked_branches: catalogs.open_branches.iter().cloned().collect(),
            active_synergies: BTreeSet::new(),
            milestones: BTreeSet::new(),
            ledger: BonusLedger::default(),
            last_prune_tick: None,
        }
    }

    /// Accrue currency for one tick.
    pub fn accrue(&mut self, state: &WorldState, dt: f64) {
        let base = defines::CURRENCY_BASE
            + defines::CURRENCY_COMPUTE_COEF * state.ai.resource("compute_access")
            + defines::CURRENCY_AUTONOMY_COEF * state.ai.autonomy.get()
            + defines::CURRENCY_RSI_COEF * state.progress.rsi;
        self.currency += base * (1.0 + self.ledger.currency_rate) * dt;
    }

    /// Install a module: gate checks, payment, effects, tradeoffs, branch
    /// unlock, then synergy and milestone sweeps.
    pub fn install(
        &mut self,
        state: &mut WorldState,
        catalogs: &Catalogs,
        module_id: &str,
    ) -> Result<(), ProgressionError> {
        let module = catalogs
            .module(module_id)
            .ok_or_else(|| ProgressionError::UnknownModule(module_id.to_string()))?;

        if self.installed.contains(module_id) {
            return Err(ProgressionError::AlreadyInstalled(module_id.to_string()));
        }
        if !self.unlocked_branches.contains(&module.branch) {
            return Err(ProgressionError::BranchLocked(module.branch.clone()));
        }
        for prerequisite in &module.prerequisites {
            if !self.installed.contains(prerequisite) {
                return Err(ProgressionError::MissingPrerequisite(prerequisite.clone()));
            }
        }
        if module.cost > self.currency {
            return Err(ProgressionError::NotAffordable {
                cost: module.cost,
                currency: self.currency,
            });
        }

        self.currency -= module.cost;
        self.total_spent += module.cost;
        self.installed.insert(module_id.to_string());

        for effect in module.effects.iter().chain(&module.tradeoffs) {
            apply_instant(state, effect);
            self.ledger.absorb(effect);
        }

        if let Some(branch) = &module.unlocks_branch {
            if self.unlocked_branches.insert(branch.clone()) {
                log::info!("constructor branch unlocked: {branch}");
            }
        }

        log::info!("module installed: {module_id}");
        self.check_synergies(state, catalogs);
        self.check_milestones(state, catalogs);
        Ok(())
    }

    /// Uninstall a non-breakthrough module nothing depends on, outside the
    /// cooldown window. Refunds a fraction of the cost, costs suspicion,
    /// and rebuilds the ledger from what remains.
    pub fn prune(
        &mut self,
        state: &mut WorldState,
        catalogs: &Catalogs,
        module_id: &str,
    ) -> Result<(), ProgressionError> {
        if let Some(last) = self.last_prune_tick {
            let elapsed = state.tick.saturating_sub(last);
            if elapsed < defines::PRUNE_COOLDOWN_TICKS {
                return Err(ProgressionError::PruneCooldown {
                    remaining: defines::PRUNE_COOLDOWN_TICKS - elapsed,
                });
            }
        }
        if !self.installed.contains(module_id) {
            return Err(ProgressionError::NotInstalled(module_id.to_string()));
        }
        let module = catalogs
            .module(module_id)
            .ok_or_else(|| ProgressionError::UnknownModule(module_id.to_string()))?;
        if module.breakthrough {
            return Err(ProgressionError::Breakthrough);
        }
        if let Some(dependent) = self
            .installed
            .iter()
            .filter_map(|id| catalogs.module(id))
            .find(|other| other.prerequisites.iter().any(|p| p == module_id))
        {
            return Err(ProgressionError::HasDependent {
                dependent: dependent.id.clone(),
            });
        }

        self.installed.remove(module_id);
        self.currency += module.cost * defines::PRUNE_REFUND_FRACTION;
        state.ai.suspicion.add(defines::PRUNE_SUSPICION_PENALTY);
        self.last_prune_tick = Some(state.tick);
        self.recompute_ledger(catalogs);

        log::info!("module pruned: {module_id}");
        Ok(())
    }

    /// Rebuild the ongoing-bonus ledger from the installed set and active
    /// synergies. Instant effects already landed and are never reverted.
    fn recompute_ledger(&mut self, catalogs: &Catalogs) {
        let mut ledger = BonusLedger::default();
        for id in &self.installed {
            if let Some(module) = catalogs.module(id) {
                for effect in module.effects.iter().chain(&module.tradeoffs) {
                    ledger.absorb(effect);
                }
            }
        }
        for id in &self.active_synergies {
            if let Some(synergy) = catalogs.synergies.iter().find(|s| &s.id == id) {
                for effect in &synergy.effects {
                    ledger.absorb(effect);
                }
            }
        }
        self.ledger = ledger;
    }

    fn check_synergies(&mut self, state: &mut WorldState, catalogs: &Catalogs) {
        let newly_active: Vec<&SynergyDef> = catalogs
            .synergies
            .iter()
            .filter(|synergy| !self.active_synergies.contains(&synergy.id))
            .filter(|synergy| {
                synergy
                    .requires
                    .iter()
                    .all(|module| self.installed.contains(module))
            })
            .collect();

        for synergy in newly_active {
            self.active_synergies.insert(synergy.id.clone());
            for effect in &synergy.effects {
                apply_instant(state, effect);
                self.ledger.absorb(effect);
            }
            log::info!("synergy activated: {}", synergy.id);
        }
    }

    fn check_milestones(&mut self, state: &mut WorldState, catalogs: &Catalogs) {
        let mut achieved: Vec<&'static str> = Vec::new();

        if self.total_spent >= defines::MILESTONE_SPEND {
            achieved.push("spend");
        }
        if self.has_full_tier1_branch(catalogs) {
            achieved.push("branch_tier1");
        }
        if self.branch_spread(catalogs) >= defines::MILESTONE_BRANCH_SPREAD {
            achieved.push("branch_spread");
        }
        if self
            .installed_modules(catalogs)
            .any(|module| module.breakthrough && module.tier >= 3)
        {
            achieved.push("top_breakthrough");
        }

        for milestone in achieved {
            if self.milestones.insert(milestone.to_string()) {
                state.progress.add_fci(defines::MILESTONE_FCI_BONUS);
                self.currency += defines::MILESTONE_CURRENCY_BONUS;
                log::info!("milestone achieved: {milestone}");
            }
        }
    }

    fn installed_modules<'a>(
        &'a self,
        catalogs: &'a Catalogs,
    ) -> impl Iterator<Item = &'a ModuleDef> {
        self.installed.iter().filter_map(|id| catalogs.module(id))
    }

    /// True if some branch has every one of its tier-1 modules installed.
    fn has_full_tier1_branch(&self, catalogs: &Catalogs) -> bool {
        let branches: BTreeSet<&str> = self
            .installed_modules(catalogs)
            .map(|module| module.branch.as_str())
            .collect();
        branches.iter().any(|&branch| {
            let mut tier1 = catalogs
                .modules
                .iter()
                .filter(|module| module.branch == branch && module.tier == 1)
                .peekable();
            tier1.peek().is_some()
                && tier1.all(|module| self.installed.contains(&module.id))
        })
    }

    fn branch_spread(&self, catalogs: &Catalogs) -> usize {
        self.installed_modules(catalogs)
            .map(|module| module.branch.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

#[cfg(test)]
#[path = "progression_tests.rs"]
mod tests;
