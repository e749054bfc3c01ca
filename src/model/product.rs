//! The inventory product document.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product tracked in the inventory.
///
/// `stock` only moves down through the atomic
/// [`ReserveStock`](crate::products::ProductAction::ReserveStock) action,
/// which refuses to go below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

/// Partial field update for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPatch {
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
}
