//! Runtime orchestration and lifecycle management.
//!
//! This module contains the infrastructure for managing the application's
//! runtime environment, including:
//!
//! - **Collection lifecycle**: Starting, wiring, and shutting down the
//!   collection actors
//! - **Session bootstrap**: The anonymous sign-in the engine's write
//!   operations are gated on
//! - **Observability setup**: Initializing tracing and logging
//!
//! # Main Components
//!
//! - [`LedgerSystem`] - The orchestrator that spawns the collections and
//!   hands out the wired [`LedgerEngine`](crate::engine::LedgerEngine)
//! - [`Session`] - An anonymous authenticated session
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod ledger_system;
pub mod session;
pub mod tracing;

pub use ledger_system::*;
pub use session::*;
pub use tracing::*;
