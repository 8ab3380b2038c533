//! Status ledger: timed effects on combatants.
//!
//! # Architecture
//!
//! - [`EffectCatalog`]: read-only rules per effect kind (stacking, cap, class)
//! - [`StatusLedger`]: live instances per combatant, at most one per kind
//! - [`TurnProcessor`]: turn-start countdown and expiry payloads
//!
//! The catalog is passed by reference into every ledger operation that needs
//! rules, so a ledger can never hold onto stale definitions.

mod catalog;
mod error;
mod kind;
mod ledger;
mod turn;

pub use catalog::{EffectCatalog, EffectCatalogBuilder, EffectDefinition, STANDARD_MAX_STACK};
pub use error::StatusError;
pub use kind::{ClassFilter, CombatModifier, EffectClass, EffectKind, EffectPayload};
pub use ledger::{ApplyOutcome, EffectInstance, EffectRecord, StatusLedger};
pub use turn::{ActiveEffect, ExpiredEffect, TurnProcessor, TurnStartReport};
