use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::clients::store_handle::StoreHandle;
use crate::customers::{CustomerAction, CustomerActionResult};
use crate::model::{Customer, CustomerFields};
use crate::store::{CollectionClient, StoreError};

/// Client for the `customers` collection.
#[derive(Clone)]
pub struct CustomersClient {
    inner: CollectionClient<Customer>,
}

impl CustomersClient {
    pub fn new(inner: CollectionClient<Customer>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StoreHandle<Customer> for CustomersClient {
    fn inner(&self) -> &CollectionClient<Customer> {
        &self.inner
    }
}

impl CustomersClient {
    #[instrument(skip(self))]
    pub async fn create_customer(&self, fields: CustomerFields) -> Result<String, StoreError> {
        debug!("Sending request");
        self.inner.insert(fields).await
    }

    /// Atomically move the customer's balance by a signed delta.
    ///
    /// Returns the balance after the adjustment.
    #[instrument(skip(self))]
    pub async fn adjust_balance(&self, id: String, delta: Decimal) -> Result<Decimal, StoreError> {
        debug!("Adjusting balance of customer {} by {}", id, delta);
        match self
            .inner
            .apply(id, CustomerAction::AdjustBalance(delta))
            .await?
        {
            CustomerActionResult::AdjustBalance(balance) => Ok(balance),
        }
    }
}
