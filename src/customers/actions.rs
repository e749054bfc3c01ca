//! Atomic actions for the customer document.
//!
//! Balance movements go through [`CustomerAction::AdjustBalance`] so the
//! read-add-write happens inside the owning collection actor. Two sessions
//! posting against the same customer serialize there instead of overwriting
//! each other's balance from stale snapshots.

use rust_decimal::Decimal;

/// Atomic operations on a customer.
#[derive(Debug, Clone)]
pub enum CustomerAction {
    /// Adds a signed delta to the running balance.
    ///
    /// Purchases pass `+amount`, payments `-amount`.
    AdjustBalance(Decimal),
}

/// Results from CustomerActions - variants match 1:1 with CustomerAction
#[derive(Debug, Clone)]
pub enum CustomerActionResult {
    /// The balance after the adjustment.
    AdjustBalance(Decimal),
}
