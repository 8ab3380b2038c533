//! Effect kinds, classifications and the payloads they emit.

use std::fmt;

use crate::state::Ratio;

/// Identifies an effect kind.
///
/// The built-in kinds are what the damage and block pipelines know about.
/// Content can register further kinds as `Custom(n)`; those only need a
/// catalog entry to be applied, stacked and expired like any other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// Adds its magnitude to damage dealt by the holder.
    Strength,
    /// Scales down damage the holder receives.
    Weak,
    /// Scales up damage the holder receives.
    Vulnerable,
    /// Damage payload on expiry.
    Poison,
    /// Heal payload on expiry.
    Regen,
    /// Adds its magnitude to block gained by the holder.
    Dexterity,
    /// Data-defined kind.
    Custom(u16),
}

impl EffectKind {
    /// Kinds registered by [`EffectCatalog::standard`](super::EffectCatalog::standard), in order.
    pub const BUILTIN: [EffectKind; 6] = [
        EffectKind::Strength,
        EffectKind::Weak,
        EffectKind::Vulnerable,
        EffectKind::Poison,
        EffectKind::Regen,
        EffectKind::Dexterity,
    ];

    pub const fn is_custom(self) -> bool {
        matches!(self, EffectKind::Custom(_))
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectKind::Strength => f.write_str("strength"),
            EffectKind::Weak => f.write_str("weak"),
            EffectKind::Vulnerable => f.write_str("vulnerable"),
            EffectKind::Poison => f.write_str("poison"),
            EffectKind::Regen => f.write_str("regen"),
            EffectKind::Dexterity => f.write_str("dexterity"),
            EffectKind::Custom(id) => write!(f, "custom:{id}"),
        }
    }
}

/// Broad classification of an effect kind.
///
/// The class decides what an instance emits when it expires; see
/// [`EffectClass::payload`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectClass {
    Buff,
    Debuff,
    /// Damage over time.
    Dot,
    /// Heal over time.
    Hot,
}

impl EffectClass {
    /// Terminal payload emitted when an instance of this class expires.
    ///
    /// This is the single dispatch point for expiry behavior: a new class
    /// must be handled here before the crate compiles.
    pub const fn payload(self, magnitude: u32) -> Option<EffectPayload> {
        match self {
            EffectClass::Dot => Some(EffectPayload::Damage(magnitude)),
            EffectClass::Hot => Some(EffectPayload::Heal(magnitude)),
            EffectClass::Buff | EffectClass::Debuff => None,
        }
    }

    /// Returns true for classes that benefit their holder.
    pub const fn is_positive(self) -> bool {
        matches!(self, EffectClass::Buff | EffectClass::Hot)
    }
}

/// Structured description of what an expiring effect does to its holder.
///
/// The ledger never touches combatants; the orchestrator applies these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectPayload {
    Damage(u32),
    Heal(u32),
}

impl EffectPayload {
    pub const fn value(self) -> u32 {
        match self {
            EffectPayload::Damage(value) | EffectPayload::Heal(value) => value,
        }
    }
}

/// How an effect kind participates in the damage and block pipelines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatModifier {
    /// Holder's magnitude is added to the damage it deals.
    FlatDamage,
    /// Holder's magnitude is added to the block it gains.
    FlatBlock,
    /// Damage received by the holder is scaled by the ratio (floored).
    IncomingScale(Ratio),
}

/// Selects effect classes for bulk removal.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ClassFilter {
    /// Buffs and heal-over-time effects.
    Positive,
    /// Debuffs and damage-over-time effects.
    Negative,
    All,
}

impl ClassFilter {
    pub const fn matches(self, class: EffectClass) -> bool {
        match self {
            ClassFilter::Positive => class.is_positive(),
            ClassFilter::Negative => !class.is_positive(),
            ClassFilter::All => true,
        }
    }
}
