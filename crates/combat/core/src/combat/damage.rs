//! Damage calculation and mitigation consumption.

use crate::combat::{MitigationPools, MitigationState};
use crate::state::CombatantId;
use crate::status::{CombatModifier, EffectCatalog, StatusLedger};

// ============================================================================
// Damage Floor
// ============================================================================

/// Lower bound applied to modified damage before mitigation.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageFloor {
    /// Scaling may round an attack down to nothing.
    #[default]
    Zero,
    /// An attack with positive pre-scaling damage deals at least 1.
    OneUnlessZero,
}

impl DamageFloor {
    fn apply(self, unscaled: u32, scaled: u32) -> u32 {
        match self {
            DamageFloor::Zero => scaled,
            DamageFloor::OneUnlessZero if unscaled > 0 => scaled.max(1),
            DamageFloor::OneUnlessZero => scaled,
        }
    }
}

// ============================================================================
// Damage Breakdown
// ============================================================================

/// Result of resolving one hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageBreakdown {
    /// Damage left for hit points after block and armor.
    pub hp_damage: u32,
    pub block_consumed: u32,
    pub armor_consumed: u32,
    /// Post-modifier, pre-mitigation damage (combat log value).
    pub total_damage: u32,
}

impl DamageBreakdown {
    /// Returns true if block and armor soaked the whole hit.
    pub const fn fully_absorbed(&self) -> bool {
        self.hp_damage == 0
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves attacks against the ledger and mitigation pools of one fight.
///
/// # Pipeline
///
/// ```text
/// damage = base + attacker flat damage (Strength)
/// for each incoming scale on the defender, in catalog order:
///     damage = floor(damage * ratio)        (Weak 3/4, then Vulnerable 3/2)
/// damage = floor_policy(damage)
///
/// block_consumed = min(damage, block)
/// armor_consumed = min(damage - block_consumed, armor)
/// hp_damage      = damage - block_consumed - armor_consumed
/// ```
///
/// The resolver never touches hit points; `hp_damage` is applied by the
/// caller.
#[derive(Clone, Copy, Debug)]
pub struct DamageResolver<'a> {
    catalog: &'a EffectCatalog,
    ledger: &'a StatusLedger,
    floor: DamageFloor,
}

impl<'a> DamageResolver<'a> {
    pub fn new(catalog: &'a EffectCatalog, ledger: &'a StatusLedger, floor: DamageFloor) -> Self {
        Self {
            catalog,
            ledger,
            floor,
        }
    }

    /// Resolves a hit and consumes the defender's block, then armor.
    pub fn compute_damage(
        &self,
        mitigation: &mut MitigationState,
        base: u32,
        attacker: CombatantId,
        defender: CombatantId,
    ) -> DamageBreakdown {
        let damage = self.modified_damage(base, attacker, defender);
        let pools = mitigation.pools_mut(defender);
        let (breakdown, after) = absorb(*pools, damage);
        *pools = after;

        tracing::debug!(
            "{} hits {} for {} (block {}, armor {}, hp {})",
            attacker,
            defender,
            breakdown.total_damage,
            breakdown.block_consumed,
            breakdown.armor_consumed,
            breakdown.hp_damage
        );
        breakdown
    }

    /// Same as [`compute_damage`](Self::compute_damage) without consuming anything.
    ///
    /// Used for intent previews.
    pub fn preview_damage(
        &self,
        mitigation: &MitigationState,
        base: u32,
        attacker: CombatantId,
        defender: CombatantId,
    ) -> DamageBreakdown {
        let damage = self.modified_damage(base, attacker, defender);
        absorb(mitigation.pools(defender), damage).0
    }

    /// Steps 1-4: flat bonus, incoming scales, floor.
    pub fn modified_damage(&self, base: u32, attacker: CombatantId, defender: CombatantId) -> u32 {
        let unscaled = base.saturating_add(self.ledger.modifier_total(
            self.catalog,
            attacker,
            CombatModifier::FlatDamage,
        ));

        let scaled = self
            .catalog
            .incoming_scales()
            .filter(|&(kind, _)| self.ledger.query(defender, kind) > 0)
            .fold(unscaled, |damage, (_, ratio)| ratio.scale_floor(damage));

        self.floor.apply(unscaled, scaled)
    }
}

/// Consumes `damage` from `pools`, block first.
fn absorb(pools: MitigationPools, damage: u32) -> (DamageBreakdown, MitigationPools) {
    let block_consumed = damage.min(pools.block);
    let remaining = damage - block_consumed;
    let armor_consumed = remaining.min(pools.armor);
    let hp_damage = remaining - armor_consumed;

    let breakdown = DamageBreakdown {
        hp_damage,
        block_consumed,
        armor_consumed,
        total_damage: damage,
    };
    let after = MitigationPools {
        block: pools.block - block_consumed,
        armor: pools.armor - armor_consumed,
    };
    (breakdown, after)
}
