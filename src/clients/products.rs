//! # Products Client
//!
//! Provides a high-level API for the `products` collection. It wraps a
//! `CollectionClient<Product>` and exposes domain-specific methods for
//! stock management.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::clients::store_handle::StoreHandle;
use crate::model::{Product, ProductFields};
use crate::products::{ProductAction, ProductActionResult, ReserveOutcome};
use crate::store::{CollectionClient, StoreError};

/// Client for the `products` collection.
#[derive(Clone)]
pub struct ProductsClient {
    inner: CollectionClient<Product>,
}

impl ProductsClient {
    pub fn new(inner: CollectionClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StoreHandle<Product> for ProductsClient {
    fn inner(&self) -> &CollectionClient<Product> {
        &self.inner
    }
}

impl ProductsClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, fields: ProductFields) -> Result<String, StoreError> {
        debug!("Sending request");
        self.inner.insert(fields).await
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, StoreError> {
        debug!("Checking stock for product {}", id);
        match self.inner.apply(id, ProductAction::CheckStock).await? {
            ProductActionResult::CheckStock(level) => Ok(level),
            _ => unreachable!("CheckStock action must return CheckStock result"),
        }
    }

    /// Atomically reserve a quantity of stock.
    ///
    /// The check and the decrement happen inside the collection actor, so
    /// concurrent reservations cannot oversell.
    #[instrument(skip(self))]
    pub async fn reserve_stock(
        &self,
        id: String,
        quantity: u32,
    ) -> Result<ReserveOutcome, StoreError> {
        debug!("Reserving {} units of product {}", quantity, id);
        match self
            .inner
            .apply(id, ProductAction::ReserveStock(quantity))
            .await?
        {
            ProductActionResult::ReserveStock(outcome) => Ok(outcome),
            _ => unreachable!("ReserveStock action must return ReserveStock result"),
        }
    }
}
