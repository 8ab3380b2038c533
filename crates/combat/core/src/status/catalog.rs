//! Static effect-kind metadata.
//!
//! The catalog is assembled once through [`EffectCatalogBuilder`] and is
//! read-only afterwards. Ledger, turn processing and the damage pipeline all
//! borrow it; none of them can change a definition mid-fight.

use crate::state::{CombatantId, Ratio};
use crate::status::{CombatModifier, EffectClass, EffectKind, StatusError};

/// Stack cap used by the standard accumulating kinds.
pub const STANDARD_MAX_STACK: u32 = 999;

/// Rules for one effect kind.
///
/// # Stacking
///
/// - Stackable kinds accumulate magnitude up to `max_stack`; each application
///   refreshes the duration to the latest value.
/// - Non-stackable kinds replace both magnitude and duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDefinition {
    pub kind: EffectKind,
    pub class: EffectClass,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stackable: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_max_stack"))]
    pub max_stack: u32,
    /// Duration used when a caller does not supply one.
    #[cfg_attr(feature = "serde", serde(default = "default_duration"))]
    pub default_duration: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifier: Option<CombatModifier>,
}

#[cfg(feature = "serde")]
fn default_max_stack() -> u32 {
    1
}

#[cfg(feature = "serde")]
fn default_duration() -> u32 {
    1
}

impl EffectDefinition {
    /// Non-stackable definition with a cap and duration of one.
    pub const fn new(kind: EffectKind, class: EffectClass) -> Self {
        Self {
            kind,
            class,
            stackable: false,
            max_stack: 1,
            default_duration: 1,
            modifier: None,
        }
    }

    #[must_use]
    pub const fn stacking(mut self, max_stack: u32) -> Self {
        self.stackable = true;
        self.max_stack = max_stack;
        self
    }

    #[must_use]
    pub const fn with_duration(mut self, default_duration: u32) -> Self {
        self.default_duration = default_duration;
        self
    }

    #[must_use]
    pub const fn with_modifier(mut self, modifier: CombatModifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    /// Clamps a requested magnitude to this kind's cap.
    pub fn cap(&self, magnitude: u32) -> u32 {
        magnitude.min(self.max_stack)
    }

    fn validate(&self) -> Result<(), StatusError> {
        let reason = if self.max_stack == 0 {
            Some("max_stack must be positive")
        } else if self.default_duration == 0 {
            Some("default_duration must be positive")
        } else if matches!(self.modifier, Some(CombatModifier::IncomingScale(r)) if !r.is_valid()) {
            Some("incoming scale has a zero denominator")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(StatusError::InvalidDefinition {
                kind: self.kind,
                reason,
            }),
            None => Ok(()),
        }
    }
}

/// Read-only table of effect definitions, in registration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectCatalog {
    definitions: Vec<EffectDefinition>,
}

impl EffectCatalog {
    /// Catalog containing exactly the built-in kinds.
    pub fn standard() -> Self {
        Self {
            definitions: standard_definitions().to_vec(),
        }
    }

    pub fn builder() -> EffectCatalogBuilder {
        EffectCatalogBuilder::new()
    }

    /// Returns the definition for `kind`.
    pub fn lookup(&self, kind: EffectKind) -> Result<&EffectDefinition, StatusError> {
        self.definitions
            .iter()
            .find(|def| def.kind == kind)
            .ok_or(StatusError::UnknownEffectKind { kind })
    }

    pub fn contains(&self, kind: EffectKind) -> bool {
        self.definitions.iter().any(|def| def.kind == kind)
    }

    /// Iterates definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &EffectDefinition> {
        self.definitions.iter()
    }

    /// Incoming damage scales in pipeline order.
    pub fn incoming_scales(&self) -> impl Iterator<Item = (EffectKind, Ratio)> + '_ {
        self.definitions.iter().filter_map(|def| match def.modifier {
            Some(CombatModifier::IncomingScale(ratio)) => Some((def.kind, ratio)),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Convenience for diagnostics: which target/kind pair failed lookup.
    pub(crate) fn lookup_for(
        &self,
        target: CombatantId,
        kind: EffectKind,
    ) -> Result<&EffectDefinition, StatusError> {
        self.lookup(kind).inspect_err(|_| {
            tracing::debug!("Effect {} on {} has no catalog entry", kind, target);
        })
    }
}

impl Default for EffectCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for [`EffectCatalog`].
#[derive(Clone, Debug, Default)]
pub struct EffectCatalogBuilder {
    definitions: Vec<EffectDefinition>,
}

impl EffectCatalogBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the built-in kinds.
    #[must_use]
    pub fn with_standard(mut self) -> Self {
        for def in standard_definitions() {
            if !self.definitions.iter().any(|d| d.kind == def.kind) {
                self.definitions.push(def);
            }
        }
        self
    }

    /// Adds a definition. Fails on a repeated kind or an unusable definition.
    pub fn register(mut self, definition: EffectDefinition) -> Result<Self, StatusError> {
        definition.validate()?;
        if self.definitions.iter().any(|d| d.kind == definition.kind) {
            return Err(StatusError::DuplicateEffectKind {
                kind: definition.kind,
            });
        }
        self.definitions.push(definition);
        Ok(self)
    }

    /// Replaces an existing definition in place, or appends a new one.
    ///
    /// Used by content overrides that rebalance a built-in kind.
    pub fn register_or_replace(mut self, definition: EffectDefinition) -> Result<Self, StatusError> {
        definition.validate()?;
        match self.definitions.iter_mut().find(|d| d.kind == definition.kind) {
            Some(existing) => *existing = definition,
            None => self.definitions.push(definition),
        }
        Ok(self)
    }

    pub fn build(self) -> EffectCatalog {
        EffectCatalog {
            definitions: self.definitions,
        }
    }
}

/// Built-in definitions. Weak is registered before Vulnerable, which fixes
/// the order the two scales apply in.
const fn standard_definitions() -> [EffectDefinition; 6] {
    [
        EffectDefinition::new(EffectKind::Strength, EffectClass::Buff)
            .stacking(STANDARD_MAX_STACK)
            .with_duration(99)
            .with_modifier(CombatModifier::FlatDamage),
        EffectDefinition::new(EffectKind::Weak, EffectClass::Debuff)
            .with_duration(2)
            .with_modifier(CombatModifier::IncomingScale(Ratio::new(3, 4))),
        EffectDefinition::new(EffectKind::Vulnerable, EffectClass::Debuff)
            .with_duration(2)
            .with_modifier(CombatModifier::IncomingScale(Ratio::new(3, 2))),
        EffectDefinition::new(EffectKind::Poison, EffectClass::Dot)
            .stacking(STANDARD_MAX_STACK)
            .with_duration(3),
        EffectDefinition::new(EffectKind::Regen, EffectClass::Hot)
            .stacking(STANDARD_MAX_STACK)
            .with_duration(3),
        EffectDefinition::new(EffectKind::Dexterity, EffectClass::Buff)
            .stacking(STANDARD_MAX_STACK)
            .with_duration(99)
            .with_modifier(CombatModifier::FlatBlock),
    ]
}
