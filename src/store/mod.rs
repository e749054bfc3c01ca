//! Generic document store: one actor per collection.
//!
//! This module provides the building blocks the ledger's collaborating
//! store is made of: a [`Document`] contract, a [`CollectionActor`] that
//! owns one collection and publishes full snapshots on every change, and a
//! [`CollectionClient`] handle.
//!
//! # Testing
//!
//! See [`mock`] for scripting a collection client without spawning a real
//! actor.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;

/// Namespace all collections of this application live under.
pub const APP_NAMESPACE: &str = "credit-ledger";
