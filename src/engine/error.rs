//! Error types for the ledger workflow.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    /// No authenticated session is available; write operations are gated on
    /// one.
    #[error("No authenticated session")]
    NoSession,

    /// The input provided is invalid.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The purchase quantity exceeds the tracked stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The referenced customer or product is absent from the current
    /// snapshot.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An underlying document store error occurred.
    #[error("Document store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for LedgerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => LedgerError::NotFound(id),
            other => LedgerError::Store(other),
        }
    }
}
