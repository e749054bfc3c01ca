//! Transaction-specific document logic and collection wiring.

pub mod document;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::clients::TransactionsClient;
use crate::model::Transaction;
use crate::store::CollectionActor;

/// Creates the `transactions` collection actor and its client.
pub fn new() -> (CollectionActor<Transaction>, TransactionsClient) {
    let transaction_id_counter = Arc::new(AtomicU64::new(1));
    let next_transaction_id = move || {
        let id = transaction_id_counter.fetch_add(1, Ordering::SeqCst);
        format!("txn_{}", id)
    };

    let (actor, generic_client) = CollectionActor::new("transactions", next_transaction_id);
    let client = TransactionsClient::new(generic_client);

    (actor, client)
}
