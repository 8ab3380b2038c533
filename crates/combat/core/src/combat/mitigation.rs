//! Defensive pools: block and armor.
//!
//! - **Block** is ephemeral. It is reset once per owner turn-end.
//! - **Armor** persists for the whole fight and only shrinks when damage
//!   resolution consumes it.
//!
//! Only this module and [`DamageResolver`](super::DamageResolver) write the
//! pools.

use std::collections::BTreeMap;

use crate::error::{CombatError, ErrorSeverity};
use crate::state::CombatantId;
use crate::status::{CombatModifier, EffectCatalog, StatusLedger};

/// Errors from the turn-end block reset contract.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MitigationError {
    #[error("block of {owner} was already cleared at the end of turn {turn}")]
    BlockAlreadyCleared { owner: CombatantId, turn: u32 },

    #[error("turn {turn} of {owner} is older than the last cleared turn {last_cleared}")]
    StaleTurn {
        owner: CombatantId,
        turn: u32,
        last_cleared: u32,
    },
}

impl CombatError for MitigationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::BlockAlreadyCleared { .. } | Self::StaleTurn { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BlockAlreadyCleared { .. } => "MITIGATION_BLOCK_ALREADY_CLEARED",
            Self::StaleTurn { .. } => "MITIGATION_STALE_TURN",
        }
    }
}

/// Snapshot of one combatant's pools.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MitigationPools {
    pub block: u32,
    pub armor: u32,
}

impl MitigationPools {
    pub const fn new(block: u32, armor: u32) -> Self {
        Self { block, armor }
    }

    pub const fn total(&self) -> u32 {
        self.block.saturating_add(self.armor)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct PoolEntry {
    pools: MitigationPools,
    /// Latest owner turn whose end reset the block. Turn numbers only move forward.
    last_cleared_turn: Option<u32>,
}

/// Block and armor for every combatant in one fight.
#[derive(Clone, Debug, Default)]
pub struct MitigationState {
    entries: BTreeMap<CombatantId, PoolEntry>,
}

impl MitigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds block to `target`, including its flat block bonus (Dexterity).
    ///
    /// Returns the amount actually added.
    pub fn add_block(
        &mut self,
        ledger: &StatusLedger,
        catalog: &EffectCatalog,
        target: CombatantId,
        base: u32,
    ) -> u32 {
        let bonus = ledger.modifier_total(catalog, target, CombatModifier::FlatBlock);
        let added = base.saturating_add(bonus);

        let pools = self.pools_mut(target);
        pools.block = pools.block.saturating_add(added);

        tracing::debug!(
            "{} gains {} block ({} + {} bonus), now {}",
            target,
            added,
            base,
            bonus,
            pools.block
        );
        added
    }

    /// Adds armor to `target`.
    pub fn add_armor(&mut self, target: CombatantId, amount: u32) -> u32 {
        let pools = self.pools_mut(target);
        pools.armor = pools.armor.saturating_add(amount);
        pools.armor
    }

    /// Resets `target`'s block to zero. Returns the block that was discarded.
    ///
    /// Idempotent; armor is untouched.
    pub fn clear_block(&mut self, target: CombatantId) -> u32 {
        let Some(entry) = self.entries.get_mut(&target) else {
            return 0;
        };
        std::mem::take(&mut entry.pools.block)
    }

    /// Turn-end hook for the owner of the pools.
    ///
    /// Must be called by the orchestrator at the end of `owner`'s own turn.
    /// A second call for the same owner and turn, or a call for a turn older
    /// than the last one cleared, is rejected and changes nothing.
    pub fn end_turn(&mut self, owner: CombatantId, turn: u32) -> Result<u32, MitigationError> {
        let entry = self.entries.entry(owner).or_default();
        match entry.last_cleared_turn {
            Some(last) if last == turn => {
                return Err(MitigationError::BlockAlreadyCleared { owner, turn });
            }
            Some(last_cleared) if turn < last_cleared => {
                return Err(MitigationError::StaleTurn {
                    owner,
                    turn,
                    last_cleared,
                });
            }
            _ => {}
        }
        entry.last_cleared_turn = Some(turn);
        let cleared = std::mem::take(&mut entry.pools.block);

        if cleared > 0 {
            tracing::debug!("{} loses {} block at end of turn {}", owner, cleared, turn);
        }
        Ok(cleared)
    }

    pub fn pools(&self, target: CombatantId) -> MitigationPools {
        self.entries
            .get(&target)
            .map(|entry| entry.pools)
            .unwrap_or_default()
    }

    pub fn block(&self, target: CombatantId) -> u32 {
        self.pools(target).block
    }

    pub fn armor(&self, target: CombatantId) -> u32 {
        self.pools(target).armor
    }

    /// Forgets `target` entirely (combatant left the fight).
    pub fn remove(&mut self, target: CombatantId) {
        self.entries.remove(&target);
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn pools_mut(&mut self, target: CombatantId) -> &mut MitigationPools {
        &mut self.entries.entry(target).or_default().pools
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SourceId;
    use crate::status::EffectKind;

    const HERO: CombatantId = CombatantId(0);

    #[test]
    fn dexterity_adds_to_block_gain() {
        let catalog = EffectCatalog::standard();
        let mut ledger = StatusLedger::new();
        ledger
            .apply(&catalog, HERO, EffectKind::Dexterity, 4, 5, SourceId(1))
            .unwrap();
        let mut mitigation = MitigationState::new();

        let added = mitigation.add_block(&ledger, &catalog, HERO, 8);

        assert_eq!(added, 12);
        assert_eq!(mitigation.block(HERO), 12);
    }

    #[test]
    fn block_without_dexterity_is_base() {
        let catalog = EffectCatalog::standard();
        let ledger = StatusLedger::new();
        let mut mitigation = MitigationState::new();

        assert_eq!(mitigation.add_block(&ledger, &catalog, HERO, 5), 5);
        assert_eq!(mitigation.add_block(&ledger, &catalog, HERO, 3), 3);
        assert_eq!(mitigation.block(HERO), 8);
    }

    #[test]
    fn clear_block_keeps_armor() {
        let catalog = EffectCatalog::standard();
        let ledger = StatusLedger::new();
        let mut mitigation = MitigationState::new();
        mitigation.add_block(&ledger, &catalog, HERO, 9);
        mitigation.add_armor(HERO, 6);

        assert_eq!(mitigation.clear_block(HERO), 9);
        assert_eq!(mitigation.pools(HERO), MitigationPools::new(0, 6));
        assert_eq!(mitigation.clear_block(HERO), 0);
        assert_eq!(mitigation.clear_block(CombatantId(7)), 0);
    }

    #[test]
    fn end_turn_rejects_double_clear() {
        let catalog = EffectCatalog::standard();
        let ledger = StatusLedger::new();
        let mut mitigation = MitigationState::new();
        mitigation.add_block(&ledger, &catalog, HERO, 5);

        assert_eq!(mitigation.end_turn(HERO, 1), Ok(5));
        mitigation.add_block(&ledger, &catalog, HERO, 2);
        assert_eq!(
            mitigation.end_turn(HERO, 1),
            Err(MitigationError::BlockAlreadyCleared { owner: HERO, turn: 1 })
        );
        assert_eq!(mitigation.block(HERO), 2);
        assert_eq!(mitigation.end_turn(HERO, 2), Ok(2));
    }

    #[test]
    fn end_turn_rejects_replayed_earlier_turn() {
        let catalog = EffectCatalog::standard();
        let ledger = StatusLedger::new();
        let mut mitigation = MitigationState::new();
        mitigation.add_block(&ledger, &catalog, HERO, 5);

        assert_eq!(mitigation.end_turn(HERO, 1), Ok(5));
        assert_eq!(mitigation.end_turn(HERO, 2), Ok(0));
        mitigation.add_block(&ledger, &catalog, HERO, 5);

        assert_eq!(
            mitigation.end_turn(HERO, 1),
            Err(MitigationError::StaleTurn {
                owner: HERO,
                turn: 1,
                last_cleared: 2
            })
        );
        assert_eq!(mitigation.block(HERO), 5);
        assert_eq!(mitigation.end_turn(HERO, 3), Ok(5));
    }

    #[test]
    fn double_clear_is_internal() {
        let err = MitigationError::BlockAlreadyCleared { owner: HERO, turn: 3 };
        assert!(err.severity().is_internal());
        assert_eq!(err.error_code(), "MITIGATION_BLOCK_ALREADY_CLEARED");

        let stale = MitigationError::StaleTurn {
            owner: HERO,
            turn: 1,
            last_cleared: 2,
        };
        assert!(stale.severity().is_internal());
        assert_eq!(stale.error_code(), "MITIGATION_STALE_TURN");
    }
}
