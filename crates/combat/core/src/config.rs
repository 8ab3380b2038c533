use crate::combat::DamageFloor;

/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Lower bound applied to modified damage before mitigation.
    pub damage_floor: DamageFloor,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of distinct effect kinds a single combatant can carry.
    pub const MAX_EFFECTS_PER_TARGET: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DAMAGE_FLOOR: DamageFloor = DamageFloor::Zero;

    pub fn new() -> Self {
        Self {
            damage_floor: Self::DEFAULT_DAMAGE_FLOOR,
        }
    }

    pub fn with_damage_floor(damage_floor: DamageFloor) -> Self {
        Self { damage_floor }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
