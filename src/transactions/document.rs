//! Document trait implementation for the Transaction type.
//!
//! The ledger is append-only: a recorded transaction rejects every mutation
//! path. Correction happens by posting a compensating entry, not by editing
//! history.

use chrono::{DateTime, Utc};

use crate::model::{Transaction, TransactionFields};
use crate::store::Document;

impl Document for Transaction {
    type Id = String;
    type Fields = TransactionFields;
    type Patch = ();
    type Action = ();
    type ActionResult = ();

    /// Creates a new Transaction record from the insert payload.
    fn from_insert(
        id: String,
        fields: TransactionFields,
        created_at: DateTime<Utc>,
    ) -> Result<Self, String> {
        Ok(Self {
            id,
            customer_id: fields.customer_id,
            kind: fields.kind,
            amount: fields.amount,
            description: fields.description,
            date: fields.date,
            product_id: fields.product_id,
            quantity: fields.quantity,
            created_at,
        })
    }

    fn apply_patch(&mut self, _patch: ()) -> Result<(), String> {
        Err("transaction records are append-only".to_string())
    }

    fn apply_action(&mut self, _action: ()) -> Result<(), String> {
        Err("transaction records are append-only".to_string())
    }
}
