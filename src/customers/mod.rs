//! Customer-specific document logic and collection wiring.

mod actions;
pub mod document;

pub use actions::*;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::clients::CustomersClient;
use crate::model::Customer;
use crate::store::CollectionActor;

/// Creates the `customers` collection actor and its client.
pub fn new() -> (CollectionActor<Customer>, CustomersClient) {
    let customer_id_counter = Arc::new(AtomicU64::new(1));
    let next_customer_id = move || {
        let id = customer_id_counter.fetch_add(1, Ordering::SeqCst);
        format!("customer_{}", id)
    };

    let (actor, generic_client) = CollectionActor::new("customers", next_customer_id);
    let client = CustomersClient::new(generic_client);

    (actor, client)
}
