use crate::error::{CombatError, ErrorSeverity};
use crate::state::CombatantId;
use crate::status::EffectKind;

/// Errors produced by the effect catalog and the status ledger.
///
/// Every variant is recovered locally: the operation that produced it made no
/// change to the ledger.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    #[error("effect kind {kind} is not registered")]
    UnknownEffectKind { kind: EffectKind },

    #[error("invalid magnitude {magnitude} for {kind}: must be non-negative")]
    InvalidMagnitude { kind: EffectKind, magnitude: i32 },

    #[error("invalid duration {duration} for {kind}: must be positive")]
    InvalidDuration { kind: EffectKind, duration: i32 },

    #[error("{target} already carries {limit} effects, cannot add {kind}")]
    CapacityExceeded {
        target: CombatantId,
        kind: EffectKind,
        limit: usize,
    },

    #[error("effect kind {kind} is already registered")]
    DuplicateEffectKind { kind: EffectKind },

    #[error("invalid definition for {kind}: {reason}")]
    InvalidDefinition {
        kind: EffectKind,
        reason: &'static str,
    },
}

impl CombatError for StatusError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CapacityExceeded { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEffectKind { .. } => "STATUS_UNKNOWN_EFFECT_KIND",
            Self::InvalidMagnitude { .. } => "STATUS_INVALID_MAGNITUDE",
            Self::InvalidDuration { .. } => "STATUS_INVALID_DURATION",
            Self::CapacityExceeded { .. } => "STATUS_CAPACITY_EXCEEDED",
            Self::DuplicateEffectKind { .. } => "STATUS_DUPLICATE_EFFECT_KIND",
            Self::InvalidDefinition { .. } => "STATUS_INVALID_DEFINITION",
        }
    }
}
