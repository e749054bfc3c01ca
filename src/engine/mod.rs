//! The ledger workflow engine and its supporting types.
//!
//! This is the layer the presentation boundary talks to: the five workflow
//! operations, the derived views, and the transaction draft live here.

pub mod draft;
pub mod error;
pub mod ledger;

pub use draft::*;
pub use error::*;
pub use ledger::*;
