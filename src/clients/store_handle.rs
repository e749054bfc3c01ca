use async_trait::async_trait;
use tokio::sync::watch;

use crate::store::{CollectionClient, Document, StoreError};

/// Trait for collection-specific clients to inherit the standard document
/// operations.
///
/// This trait reduces boilerplate by providing default implementations for
/// the operations every collection supports: point reads, deletes, and the
/// snapshot subscription.
#[async_trait]
pub trait StoreHandle<T: Document>: Send + Sync {
    /// Access the inner generic CollectionClient.
    fn inner(&self) -> &CollectionClient<T>;

    /// Fetch a document by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        tracing::debug!("Sending request");
        self.inner().get(id).await
    }

    /// Delete a document by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await
    }

    /// Subscribe to the collection's full-snapshot stream.
    fn watch(&self) -> watch::Receiver<Vec<T>> {
        self.inner().subscribe()
    }
}
