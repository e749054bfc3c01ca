//! The ledger transaction document.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a ledger movement.
///
/// The `amount` on a transaction is a magnitude; the sign of its effect on
/// the customer balance is carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Goods taken on credit; raises the balance.
    Purchase,
    /// Money received; lowers the balance.
    Payment,
}

/// One row of the append-only ledger.
///
/// Transactions are immutable once recorded: the document rejects patches
/// and no workflow operation deletes them. They survive the deletion of the
/// customer or product they reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub customer_id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    /// Calendar date chosen by the user, not the insert time.
    pub date: NaiveDate,
    /// Set when the purchase came from the inventory.
    pub product_id: Option<String>,
    /// Units purchased; 0 when not inventory-linked.
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
}

/// Payload for recording a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionFields {
    pub customer_id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    pub product_id: Option<String>,
    pub quantity: u32,
}
