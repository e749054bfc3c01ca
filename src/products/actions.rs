//! Atomic actions for the product document.
//!
//! Stock is checked and decremented in one step inside the owning collection
//! actor, so a purchase can never observe stale stock and push it negative.

/// Atomic operations on a product.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Reserves a quantity of stock: decrements if enough is available,
    /// otherwise reports the shortfall without mutating.
    ReserveStock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    /// Result from CheckStock action - the current stock level.
    CheckStock(u32),
    /// Result from ReserveStock action.
    ReserveStock(ReserveOutcome),
}

/// What happened to a stock reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReserveOutcome {
    /// The stock was decremented by the requested quantity.
    Reserved { remaining: u32 },
    /// Not enough stock; nothing was changed.
    Insufficient { requested: u32, available: u32 },
}
