//! Per-combatant collection of active effect instances.
//!
//! # Invariants
//!
//! - At most one instance exists per (target, kind); reapplication merges.
//! - A target with no instances has no entry, so `has(target)` is exactly
//!   "carries at least one effect".
//! - Instances keep the position of their first application. Merges update
//!   in place and never reorder.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::state::{CombatantId, SourceId};
use crate::status::{ClassFilter, CombatModifier, EffectCatalog, EffectDefinition, EffectKind, StatusError};

type TargetEffects = ArrayVec<EffectInstance, { CombatConfig::MAX_EFFECTS_PER_TARGET }>;

/// A live effect on one combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectInstance {
    pub kind: EffectKind,
    pub magnitude: u32,
    /// Turn starts left before expiry. Always positive while stored.
    pub remaining: u32,
    /// Whatever applied the effect most recently.
    pub source: SourceId,
    /// Ledger-wide application counter at the most recent application.
    pub sequence: u64,
}

/// What an accepted application did to the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// First instance of this kind on the target.
    Created,
    /// Magnitude accumulated into an existing instance; duration refreshed.
    Stacked {
        /// True if the cap cut the accumulated magnitude.
        capped: bool,
    },
    /// Non-stackable kind: magnitude and duration overwritten.
    Replaced,
}

/// Plain record of one instance, for an external save/load collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectRecord {
    pub target: CombatantId,
    pub kind: EffectKind,
    pub magnitude: u32,
    pub remaining: u32,
    pub source: SourceId,
}

/// Active effects for every combatant in one fight.
#[derive(Clone, Debug, Default)]
pub struct StatusLedger {
    entries: BTreeMap<CombatantId, TargetEffects>,
    next_sequence: u64,
}

impl StatusLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an effect, merging with any existing instance of the same kind.
    ///
    /// Magnitude and duration arrive signed because card data may carry
    /// negative numbers; they are validated here. On any error the ledger is
    /// left exactly as it was.
    pub fn apply(
        &mut self,
        catalog: &EffectCatalog,
        target: CombatantId,
        kind: EffectKind,
        magnitude: i32,
        duration: i32,
        source: SourceId,
    ) -> Result<ApplyOutcome, StatusError> {
        let definition = catalog.lookup(kind)?;
        let magnitude = u32::try_from(magnitude)
            .map_err(|_| StatusError::InvalidMagnitude { kind, magnitude })?;
        let duration = match u32::try_from(duration) {
            Ok(turns) if turns > 0 => turns,
            _ => return Err(StatusError::InvalidDuration { kind, duration }),
        };

        self.place(definition, target, magnitude, duration, source)
    }

    /// Applies an effect for its catalog default duration.
    pub fn apply_default(
        &mut self,
        catalog: &EffectCatalog,
        target: CombatantId,
        kind: EffectKind,
        magnitude: i32,
        source: SourceId,
    ) -> Result<ApplyOutcome, StatusError> {
        let duration = catalog.lookup(kind)?.default_duration;
        self.apply(
            catalog,
            target,
            kind,
            magnitude,
            i32::try_from(duration).unwrap_or(i32::MAX),
            source,
        )
    }

    fn place(
        &mut self,
        definition: &EffectDefinition,
        target: CombatantId,
        magnitude: u32,
        duration: u32,
        source: SourceId,
    ) -> Result<ApplyOutcome, StatusError> {
        let kind = definition.kind;
        let sequence = self.next_sequence;

        let existing = self
            .entries
            .get_mut(&target)
            .and_then(|effects| effects.iter_mut().find(|e| e.kind == kind));

        let outcome = match existing {
            Some(instance) => {
                let outcome = if definition.stackable {
                    let total = instance.magnitude.saturating_add(magnitude);
                    instance.magnitude = definition.cap(total);
                    ApplyOutcome::Stacked {
                        capped: total > definition.max_stack,
                    }
                } else {
                    instance.magnitude = magnitude;
                    ApplyOutcome::Replaced
                };
                instance.remaining = duration;
                instance.source = source;
                instance.sequence = sequence;
                outcome
            }
            None => {
                let effects = self.entries.entry(target).or_default();
                // A full list is never empty, so no pruning is needed on this path.
                if effects.is_full() {
                    return Err(StatusError::CapacityExceeded {
                        target,
                        kind,
                        limit: CombatConfig::MAX_EFFECTS_PER_TARGET,
                    });
                }
                effects.push(EffectInstance {
                    kind,
                    magnitude,
                    remaining: duration,
                    source,
                    sequence,
                });
                ApplyOutcome::Created
            }
        };

        self.next_sequence += 1;
        tracing::debug!(
            "Applied {} x{} for {} turns to {} ({:?})",
            kind,
            magnitude,
            duration,
            target,
            outcome
        );
        Ok(outcome)
    }

    /// Removes the instance of `kind` from `target`. Returns whether one existed.
    pub fn remove(&mut self, target: CombatantId, kind: EffectKind) -> bool {
        let Some(effects) = self.entries.get_mut(&target) else {
            return false;
        };

        let before = effects.len();
        effects.retain(|e| e.kind != kind);
        let removed = effects.len() != before;

        if effects.is_empty() {
            self.entries.remove(&target);
        }
        if removed {
            tracing::debug!("Removed {} from {}", kind, target);
        }
        removed
    }

    /// Current magnitude of `kind` on `target`, or 0 if absent.
    pub fn query(&self, target: CombatantId, kind: EffectKind) -> u32 {
        self.get(target, kind).map_or(0, |e| e.magnitude)
    }

    pub fn get(&self, target: CombatantId, kind: EffectKind) -> Option<EffectInstance> {
        self.entries
            .get(&target)?
            .iter()
            .find(|e| e.kind == kind)
            .copied()
    }

    /// Snapshot of `target`'s instances in first-application order.
    pub fn list(&self, target: CombatantId) -> Vec<EffectInstance> {
        self.entries
            .get(&target)
            .map(|effects| effects.to_vec())
            .unwrap_or_default()
    }

    /// Returns true if `target` carries any effect.
    pub fn has(&self, target: CombatantId) -> bool {
        self.entries.contains_key(&target)
    }

    /// Targets with at least one effect, in id order.
    pub fn targets(&self) -> impl Iterator<Item = CombatantId> + '_ {
        self.entries.keys().copied()
    }

    /// Number of targets carrying effects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every effect on `target`.
    pub fn clear(&mut self, target: CombatantId) {
        if self.entries.remove(&target).is_some() {
            tracing::debug!("Cleared all effects from {}", target);
        }
    }

    /// Drops every effect in the fight.
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// Removes every instance on `target` whose class matches `filter`.
    ///
    /// Returns the removed kinds in ledger order. Instances whose kind is
    /// missing from `catalog` are left alone.
    pub fn clear_by_class(
        &mut self,
        catalog: &EffectCatalog,
        target: CombatantId,
        filter: ClassFilter,
    ) -> Vec<EffectKind> {
        let Some(effects) = self.entries.get_mut(&target) else {
            return Vec::new();
        };

        let mut removed = Vec::new();
        effects.retain(|e| match catalog.lookup(e.kind) {
            Ok(def) if filter.matches(def.class) => {
                removed.push(e.kind);
                false
            }
            _ => true,
        });

        if effects.is_empty() {
            self.entries.remove(&target);
        }
        if !removed.is_empty() {
            tracing::debug!("Cleared {} {} effect(s) from {}", removed.len(), filter, target);
        }
        removed
    }

    /// Sum of magnitudes on `target` for kinds carrying `modifier`.
    pub fn modifier_total(
        &self,
        catalog: &EffectCatalog,
        target: CombatantId,
        modifier: CombatModifier,
    ) -> u32 {
        let Some(effects) = self.entries.get(&target) else {
            return 0;
        };

        effects
            .iter()
            .filter(|e| {
                catalog
                    .lookup_for(target, e.kind)
                    .is_ok_and(|def| def.modifier == Some(modifier))
            })
            .fold(0u32, |total, e| total.saturating_add(e.magnitude))
    }

    /// Decrements every instance on `target` by one turn.
    ///
    /// Returns `(expired, surviving)` in ledger order. Expired instances are
    /// removed and report `remaining == 0`.
    pub(crate) fn advance(&mut self, target: CombatantId) -> (Vec<EffectInstance>, Vec<EffectInstance>) {
        let Some(effects) = self.entries.get_mut(&target) else {
            return (Vec::new(), Vec::new());
        };

        let mut expired = Vec::new();
        let mut surviving = Vec::new();
        effects.retain(|instance| {
            instance.remaining = instance.remaining.saturating_sub(1);
            if instance.remaining == 0 {
                expired.push(*instance);
                false
            } else {
                surviving.push(*instance);
                true
            }
        });

        if effects.is_empty() {
            self.entries.remove(&target);
        }
        (expired, surviving)
    }

    /// Exports every instance as a plain record, ordered by target then ledger order.
    pub fn records(&self) -> Vec<EffectRecord> {
        self.entries
            .iter()
            .flat_map(|(&target, effects)| {
                effects.iter().map(move |e| EffectRecord {
                    target,
                    kind: e.kind,
                    magnitude: e.magnitude,
                    remaining: e.remaining,
                    source: e.source,
                })
            })
            .collect()
    }

    /// Replaces the ledger contents with `records`.
    ///
    /// Every record is validated against `catalog` and merged with the usual
    /// stacking rules. The first invalid record aborts the restore and the
    /// ledger keeps its previous contents. Returns the number of records read.
    pub fn restore(
        &mut self,
        catalog: &EffectCatalog,
        records: impl IntoIterator<Item = EffectRecord>,
    ) -> Result<usize, StatusError> {
        let mut restored = StatusLedger::new();
        let mut count = 0;

        for record in records {
            let definition = catalog.lookup(record.kind)?;
            if record.remaining == 0 {
                return Err(StatusError::InvalidDuration {
                    kind: record.kind,
                    duration: 0,
                });
            }
            restored.place(
                definition,
                record.target,
                record.magnitude,
                record.remaining,
                record.source,
            )?;
            count += 1;
        }

        *self = restored;
        Ok(count)
    }
}
