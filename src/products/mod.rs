//! Product-specific document logic, including stock management actions.

mod actions;
pub mod document;

pub use actions::*;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::clients::ProductsClient;
use crate::model::Product;
use crate::store::CollectionActor;

/// Creates the `products` collection actor and its client.
pub fn new() -> (CollectionActor<Product>, ProductsClient) {
    let product_id_counter = Arc::new(AtomicU64::new(1));
    let next_product_id = move || {
        let id = product_id_counter.fetch_add(1, Ordering::SeqCst);
        format!("product_{}", id)
    };

    let (actor, generic_client) = CollectionActor::new("products", next_product_id);
    let client = ProductsClient::new(generic_client);

    (actor, client)
}
