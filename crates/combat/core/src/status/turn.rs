//! Turn-start processing of effect durations.
//!
//! Processing never mutates combatants. Expiring damage-over-time and
//! heal-over-time effects are reported as [`EffectPayload`]s for the
//! orchestrator to apply.

use crate::state::{CombatantId, SourceId};
use crate::status::{EffectCatalog, EffectKind, EffectPayload, StatusLedger};

/// An instance that reached zero remaining turns and was removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpiredEffect {
    pub kind: EffectKind,
    pub magnitude: u32,
    pub source: SourceId,
    /// Terminal payload, if the kind's class has one.
    pub payload: Option<EffectPayload>,
}

/// An instance still active after the decrement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub magnitude: u32,
    pub remaining: u32,
}

/// Result of [`TurnProcessor::process_turn_start`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnStartReport {
    pub expired: Vec<ExpiredEffect>,
    pub active: Vec<ActiveEffect>,
}

impl TurnStartReport {
    /// Payloads emitted this turn start, in ledger order.
    pub fn payloads(&self) -> impl Iterator<Item = EffectPayload> + '_ {
        self.expired.iter().filter_map(|e| e.payload)
    }

    pub fn total_damage(&self) -> u32 {
        self.payloads()
            .filter_map(|p| match p {
                EffectPayload::Damage(value) => Some(value),
                EffectPayload::Heal(_) => None,
            })
            .fold(0u32, u32::saturating_add)
    }

    pub fn total_heal(&self) -> u32 {
        self.payloads()
            .filter_map(|p| match p {
                EffectPayload::Heal(value) => Some(value),
                EffectPayload::Damage(_) => None,
            })
            .fold(0u32, u32::saturating_add)
    }

    pub fn is_empty(&self) -> bool {
        self.expired.is_empty() && self.active.is_empty()
    }
}

/// Advances effect durations at the start of a combatant's turn.
///
/// # Invariants
///
/// - Each call decrements every instance on the target exactly once.
/// - An instance applied with duration `d` expires on the `d`-th call.
/// - Reports follow ledger order (first application).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnProcessor;

impl TurnProcessor {
    pub fn process_turn_start(
        &self,
        ledger: &mut StatusLedger,
        catalog: &EffectCatalog,
        target: CombatantId,
    ) -> TurnStartReport {
        let (expired, surviving) = ledger.advance(target);

        let expired: Vec<ExpiredEffect> = expired
            .into_iter()
            .map(|instance| {
                // Kinds that left the catalog expire silently.
                let payload = catalog
                    .lookup(instance.kind)
                    .ok()
                    .and_then(|def| def.class.payload(instance.magnitude));
                ExpiredEffect {
                    kind: instance.kind,
                    magnitude: instance.magnitude,
                    source: instance.source,
                    payload,
                }
            })
            .collect();

        let active = surviving
            .into_iter()
            .map(|instance| ActiveEffect {
                kind: instance.kind,
                magnitude: instance.magnitude,
                remaining: instance.remaining,
            })
            .collect();

        for effect in &expired {
            tracing::debug!(
                "{} expired on {} with payload {:?}",
                effect.kind,
                target,
                effect.payload
            );
        }

        TurnStartReport { expired, active }
    }
}
