//! Identifiers and small value types shared by every combat subsystem.
//!
//! The core never inspects combatants. It addresses them through opaque
//! [`CombatantId`]s handed in by the orchestrator.

mod common;

pub use common::{CombatantId, Ratio, SourceId};
