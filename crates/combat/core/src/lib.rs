//! Deterministic combat rules for a turn-based card battler.
//!
//! `combat-core` owns the two tightly coupled rule systems of a fight:
//!
//! - the **status ledger** ([`status`]): timed effects applied to combatants,
//!   their stacking policy and their expiry at turn start;
//! - the **damage pipeline** ([`combat`]): modifier application followed by
//!   block-then-armor mitigation.
//!
//! All state for one fight lives in a [`CombatSession`]. The surrounding
//! orchestrator drives the session (turn boundaries, card resolution) and
//! applies the returned payloads and HP damage to its own combatants.
pub mod combat;
pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod status;

pub use combat::{
    DamageBreakdown, DamageFloor, DamageResolver, MitigationError, MitigationPools,
    MitigationState,
};
pub use config::CombatConfig;
pub use error::{CombatError, ErrorSeverity};
pub use session::CombatSession;
pub use state::{CombatantId, Ratio, SourceId};
pub use status::{
    ActiveEffect, ApplyOutcome, ClassFilter, CombatModifier, EffectCatalog, EffectCatalogBuilder,
    EffectClass, EffectDefinition, EffectInstance, EffectKind, EffectPayload, EffectRecord,
    ExpiredEffect, StatusError, StatusLedger, TurnProcessor, TurnStartReport,
};
