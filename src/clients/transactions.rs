use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::clients::store_handle::StoreHandle;
use crate::model::{Transaction, TransactionFields};
use crate::store::{CollectionClient, StoreError};

/// Client for the `transactions` collection.
///
/// The ledger is append-only, so this client only ever records.
#[derive(Clone)]
pub struct TransactionsClient {
    inner: CollectionClient<Transaction>,
}

impl TransactionsClient {
    pub fn new(inner: CollectionClient<Transaction>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, fields))]
    pub async fn record(&self, fields: TransactionFields) -> Result<String, StoreError> {
        debug!(customer = %fields.customer_id, "Sending request");
        self.inner.insert(fields).await
    }
}

#[async_trait]
impl StoreHandle<Transaction> for TransactionsClient {
    fn inner(&self) -> &CollectionClient<Transaction> {
        &self.inner
    }
}
