//! Per-fight owner of all combat rule state.
//!
//! A [`CombatSession`] is created when a fight starts and dropped at teardown.
//! Nothing is global: two sessions never observe each other's effects or
//! pools, so fights can run side by side (or in parallel tests).
//!
//! The session is the orchestrator-facing surface. It forwards to the
//! subsystems and logs failures that the rules recover from locally.

use crate::combat::{
    DamageBreakdown, DamageResolver, MitigationError, MitigationPools, MitigationState,
};
use crate::config::CombatConfig;
use crate::error::CombatError;
use crate::state::{CombatantId, SourceId};
use crate::status::{
    ApplyOutcome, ClassFilter, EffectCatalog, EffectInstance, EffectKind, EffectRecord,
    StatusError, StatusLedger, TurnProcessor, TurnStartReport,
};

/// Rule state for one fight.
#[derive(Clone, Debug)]
pub struct CombatSession {
    catalog: EffectCatalog,
    config: CombatConfig,
    ledger: StatusLedger,
    mitigation: MitigationState,
    turns: TurnProcessor,
}

impl CombatSession {
    pub fn new(catalog: EffectCatalog, config: CombatConfig) -> Self {
        Self {
            catalog,
            config,
            ledger: StatusLedger::new(),
            mitigation: MitigationState::new(),
            turns: TurnProcessor,
        }
    }

    /// Session over the built-in effect kinds and default configuration.
    pub fn standard() -> Self {
        Self::new(EffectCatalog::standard(), CombatConfig::default())
    }

    pub fn catalog(&self) -> &EffectCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn ledger(&self) -> &StatusLedger {
        &self.ledger
    }

    pub fn mitigation(&self) -> &MitigationState {
        &self.mitigation
    }

    // ========================================================================
    // Status effects
    // ========================================================================

    /// Applies an effect, logging and swallowing validation failures.
    ///
    /// Returns whether the ledger accepted the application. A bad card
    /// definition costs one effect, never the turn.
    pub fn apply_effect(
        &mut self,
        target: CombatantId,
        kind: EffectKind,
        magnitude: i32,
        duration: i32,
        source: SourceId,
    ) -> bool {
        match self.try_apply_effect(target, kind, magnitude, duration, source) {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(
                    "Rejected {} on {} from {} [{}]: {}",
                    kind,
                    target,
                    source,
                    err.error_code(),
                    err
                );
                false
            }
        }
    }

    /// Applies an effect and returns the ledger's verdict unchanged.
    pub fn try_apply_effect(
        &mut self,
        target: CombatantId,
        kind: EffectKind,
        magnitude: i32,
        duration: i32,
        source: SourceId,
    ) -> Result<ApplyOutcome, StatusError> {
        self.ledger
            .apply(&self.catalog, target, kind, magnitude, duration, source)
    }

    /// Applies an effect for its catalog default duration.
    pub fn apply_effect_default(
        &mut self,
        target: CombatantId,
        kind: EffectKind,
        magnitude: i32,
        source: SourceId,
    ) -> Result<ApplyOutcome, StatusError> {
        self.ledger
            .apply_default(&self.catalog, target, kind, magnitude, source)
    }

    pub fn remove_effect(&mut self, target: CombatantId, kind: EffectKind) -> bool {
        self.ledger.remove(target, kind)
    }

    pub fn query(&self, target: CombatantId, kind: EffectKind) -> u32 {
        self.ledger.query(target, kind)
    }

    pub fn effects(&self, target: CombatantId) -> Vec<EffectInstance> {
        self.ledger.list(target)
    }

    /// Removes buffs or debuffs from `target` (cleanse / purge card effects).
    pub fn clear_effects_by_class(
        &mut self,
        target: CombatantId,
        filter: ClassFilter,
    ) -> Vec<EffectKind> {
        self.ledger.clear_by_class(&self.catalog, target, filter)
    }

    // ========================================================================
    // Turn boundaries
    // ========================================================================

    /// Start of `target`'s turn: counts down its effects.
    pub fn process_turn_start(&mut self, target: CombatantId) -> TurnStartReport {
        self.turns
            .process_turn_start(&mut self.ledger, &self.catalog, target)
    }

    /// End of `owner`'s own turn `turn`: resets its block once.
    pub fn end_turn(&mut self, owner: CombatantId, turn: u32) -> Result<u32, MitigationError> {
        self.mitigation.end_turn(owner, turn).inspect_err(|err| {
            tracing::warn!("Turn-end contract violated [{}]: {}", err.error_code(), err);
        })
    }

    // ========================================================================
    // Mitigation and damage
    // ========================================================================

    pub fn add_block(&mut self, target: CombatantId, base: u32) -> u32 {
        self.mitigation
            .add_block(&self.ledger, &self.catalog, target, base)
    }

    pub fn add_armor(&mut self, target: CombatantId, amount: u32) -> u32 {
        self.mitigation.add_armor(target, amount)
    }

    pub fn clear_block(&mut self, target: CombatantId) -> u32 {
        self.mitigation.clear_block(target)
    }

    pub fn pools(&self, target: CombatantId) -> MitigationPools {
        self.mitigation.pools(target)
    }

    pub fn compute_damage(
        &mut self,
        base: u32,
        attacker: CombatantId,
        defender: CombatantId,
    ) -> DamageBreakdown {
        DamageResolver::new(&self.catalog, &self.ledger, self.config.damage_floor).compute_damage(
            &mut self.mitigation,
            base,
            attacker,
            defender,
        )
    }

    pub fn preview_damage(
        &self,
        base: u32,
        attacker: CombatantId,
        defender: CombatantId,
    ) -> DamageBreakdown {
        DamageResolver::new(&self.catalog, &self.ledger, self.config.damage_floor).preview_damage(
            &self.mitigation,
            base,
            attacker,
            defender,
        )
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Forgets a combatant that left the fight.
    pub fn remove_combatant(&mut self, target: CombatantId) {
        self.ledger.clear(target);
        self.mitigation.remove(target);
    }

    /// Drops all effects and pools. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.ledger.clear_all();
        self.mitigation.clear_all();
    }

    /// Ledger contents for an external save collaborator.
    pub fn effect_records(&self) -> Vec<EffectRecord> {
        self.ledger.records()
    }

    /// Replaces ledger contents from saved records.
    pub fn restore_effects(
        &mut self,
        records: impl IntoIterator<Item = EffectRecord>,
    ) -> Result<usize, StatusError> {
        self.ledger.restore(&self.catalog, records)
    }
}

impl Default for CombatSession {
    fn default() -> Self {
        Self::standard()
    }
}
