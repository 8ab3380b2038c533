//! Damage resolution and defensive pools.
//!
//! # Core Types
//!
//! - `MitigationState`: per-combatant block (ephemeral) and armor (persistent)
//! - `DamageResolver`: modifier pipeline followed by block-then-armor consumption

pub mod damage;
pub mod mitigation;

pub use damage::{DamageBreakdown, DamageFloor, DamageResolver};
pub use mitigation::{MitigationError, MitigationPools, MitigationState};
