//! Form state for composing a transaction before posting.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::ledger::TransactionRequest;
use crate::model::{Product, TransactionKind};

/// A pending transaction being composed.
///
/// Mirrors the posting form: choosing an inventory product or changing its
/// quantity recomputes the pending amount as `unit price × quantity`
/// rescaled to two decimals, overwriting anything typed by hand — a live
/// binding, not a one-time default. The amount is kept as display text so
/// that exactly what the form shows is what gets submitted.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    kind: TransactionKind,
    amount: String,
    description: String,
    date: NaiveDate,
    product: Option<SelectedProduct>,
    quantity: u32,
}

/// The inventory selection, with the unit price captured at selection time.
#[derive(Debug, Clone)]
struct SelectedProduct {
    id: String,
    unit_price: Decimal,
}

impl TransactionDraft {
    /// Starts an empty draft dated `date` (the form defaults this to the
    /// current day).
    pub fn new(kind: TransactionKind, date: NaiveDate) -> Self {
        Self {
            kind,
            amount: String::new(),
            description: String::new(),
            date,
            product: None,
            quantity: 1,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Switches between purchase and payment, re-deriving the amount when a
    /// product selection starts driving it again.
    pub fn set_kind(&mut self, kind: TransactionKind) {
        self.kind = kind;
        self.recompute_amount();
    }

    /// Manually typed amount text. A product selection will overwrite this
    /// on its next change.
    pub fn set_amount(&mut self, amount: &str) {
        self.amount = amount.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Selects (or clears) the inventory product backing this purchase.
    pub fn select_product(&mut self, product: Option<&Product>) {
        self.product = product.map(|p| SelectedProduct {
            id: p.id.clone(),
            unit_price: p.price,
        });
        self.recompute_amount();
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.recompute_amount();
    }

    fn recompute_amount(&mut self) {
        if self.kind != TransactionKind::Purchase {
            return;
        }
        let Some(product) = &self.product else {
            return;
        };
        let mut total = product.unit_price * Decimal::from(self.quantity);
        total.rescale(2);
        self.amount = total.to_string();
    }

    /// Finalizes the draft into a posting request against `customer_id`.
    pub fn into_request(self, customer_id: &str) -> TransactionRequest {
        TransactionRequest {
            customer_id: customer_id.to_string(),
            kind: self.kind,
            amount: self.amount,
            description: self.description,
            date: self.date,
            product_id: self.product.map(|p| p.id),
            quantity: self.quantity,
        }
    }
}
