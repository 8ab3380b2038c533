//! Data-driven combat content and loaders.
//!
//! This crate reads content that tunes the rules engine without code changes:
//! - Custom effect kinds and rebalanced built-ins (data-driven via RON)
//! - Engine configuration (data-driven via TOML)
//!
//! Content feeds [`combat_core::CombatSession`] construction and never appears
//! in ledger state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, EffectLoader, EffectTable};
