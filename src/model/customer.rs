//! The customer profile document.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A credit holder.
///
/// `balance` is the running signed total the customer owes: purchases raise
/// it, payments lower it. It starts at zero and is only ever moved by the
/// transaction-posting workflow, through the atomic
/// [`AdjustBalance`](crate::customers::CustomerAction::AdjustBalance)
/// action. There is no field-edit path for customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting a new customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerFields {
    pub name: String,
    pub phone: String,
}
