//! # Core Collection Store
//!
//! This module defines the generic building blocks for the document store.
//!
//! ## Key Types
//!
//! - [`Document`]: The trait that all storable types must implement.
//! - [`CollectionActor`]: The generic actor that owns one collection.
//! - [`CollectionClient`]: The generic handle for talking to a collection.
//! - [`StoreError`]: Common errors (e.g., Unavailable, NotFound).

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Document contract)
// =============================================================================

/// Trait that any storable type must implement to live in a [`CollectionActor`].
///
/// # Architecture Note
/// By defining one contract (`Document`) that all collection members
/// (Customer, Product, Transaction) satisfy, the collection loop is written
/// *once* and reused for every collection.
///
/// Associated types keep the wiring type-safe: a `customers` collection only
/// accepts `CustomerFields`, and the compiler rejects a `ProductFields`
/// payload sent to it.
///
/// # Write paths
/// - [`Document::from_insert`] builds the full document from the
///   store-assigned id, the insert payload, and the server-stamped creation
///   time.
/// - [`Document::apply_patch`] merges a partial field update. Types that do
///   not support out-of-band edits return `Err` here.
/// - [`Document::apply_action`] runs a document-specific atomic operation
///   (e.g., reserving stock) inside the owning actor, so check-and-mutate
///   sequences cannot interleave with other writers.
pub trait Document: Clone + Send + Sync + 'static {
    /// The unique identifier for this document (assigned by the store).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The payload required to insert a new document.
    type Fields: Send + Sync + Debug;

    /// A partial field update merged into an existing document.
    type Patch: Send + Sync + Debug;

    /// Document-specific atomic operations (e.g., `ReserveStock`).
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// Construct the full document. `created_at` is stamped by the actor at
    /// insert time, never supplied by the caller.
    fn from_insert(
        id: Self::Id,
        fields: Self::Fields,
        created_at: DateTime<Utc>,
    ) -> Result<Self, String>;

    /// Merge a partial update into the document.
    fn apply_patch(&mut self, patch: Self::Patch) -> Result<(), String>;

    /// Execute an atomic in-place operation.
    fn apply_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors reported by the store itself.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    /// The collection's mailbox is closed (the network-failure analog).
    #[error("Store unavailable")]
    Unavailable,
    #[error("Store dropped response channel")]
    Dropped,
    #[error("Document not found: {0}")]
    NotFound(String),
    /// The document refused the write (validation or immutability).
    #[error("Write rejected: {0}")]
    Rejected(String),
}

/// Type alias for the one-shot response channel used by collection actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to a collection actor.
///
/// The variants map onto the document-store contract: create a document,
/// merge fields into one, delete one, or run an atomic action on one. Reads
/// normally flow through the snapshot subscription instead; `Get` exists for
/// point lookups that must reflect the actor's authoritative state.
#[derive(Debug)]
pub enum StoreRequest<T: Document> {
    Insert {
        fields: T::Fields,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    UpdateFields {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Apply {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

/// How many requests a collection can queue before senders wait.
pub const MAILBOX_CAPACITY: usize = 32;

// =============================================================================
// 3. THE GENERIC COLLECTION ACTOR
// =============================================================================

/// The actor that owns one collection of documents.
///
/// # Architecture Note
/// This struct is the "server" half of a collection. It owns the documents
/// and the receiver end of the mailbox.
///
/// **Concurrency model**: each collection processes its messages
/// *sequentially* in its own task, so no `Mutex` guards the documents.
/// Check-and-mutate actions ([`Document::apply_action`]) therefore run
/// atomically with respect to every other writer of the same collection.
///
/// **Snapshots**: after every successful write the actor publishes the full
/// member list, in insertion order, on a `watch` channel. Subscribers always
/// observe a complete snapshot, never an incremental patch.
pub struct CollectionActor<T: Document> {
    collection: &'static str,
    receiver: mpsc::Receiver<StoreRequest<T>>,
    documents: HashMap<T::Id, T>,
    /// Insertion order of live ids; snapshots are published in this order.
    order: Vec<T::Id>,
    snapshot: watch::Sender<Vec<T>>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Document> CollectionActor<T> {
    pub fn new(
        collection: &'static str,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(MAILBOX_CAPACITY);
        let (snapshot_tx, snapshot_rx) = watch::channel(Vec::new());
        let actor = Self {
            collection,
            receiver,
            documents: HashMap::new(),
            order: Vec::new(),
            snapshot: snapshot_tx,
            next_id_fn: Box::new(next_id_fn),
        };
        let client = CollectionClient::new(sender, snapshot_rx);
        (actor, client)
    }

    /// Push the full member list to all subscribers.
    fn publish(&self) {
        let members: Vec<T> = self
            .order
            .iter()
            .filter_map(|id| self.documents.get(id).cloned())
            .collect();
        self.snapshot.send_replace(members);
    }

    /// Runs the collection's event loop until the last client is dropped.
    pub async fn run(mut self) {
        let collection = self.collection;
        info!(collection, "Collection actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Insert { fields, respond_to } => {
                    debug!(collection, ?fields, "Insert");
                    let id = (self.next_id_fn)();

                    match T::from_insert(id.clone(), fields, Utc::now()) {
                        Ok(doc) => {
                            self.documents.insert(id.clone(), doc);
                            self.order.push(id.clone());
                            self.publish();
                            info!(collection, %id, size = self.documents.len(), "Inserted");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(collection, error = %e, "Insert rejected");
                            let _ = respond_to.send(Err(StoreError::Rejected(e)));
                        }
                    }
                }
                StoreRequest::Get { id, respond_to } => {
                    let doc = self.documents.get(&id).cloned();
                    let found = doc.is_some();
                    debug!(collection, %id, found, "Get");
                    let _ = respond_to.send(Ok(doc));
                }
                StoreRequest::UpdateFields { id, patch, respond_to } => {
                    debug!(collection, %id, ?patch, "UpdateFields");
                    if let Some(doc) = self.documents.get_mut(&id) {
                        if let Err(e) = doc.apply_patch(patch) {
                            warn!(collection, %id, error = %e, "Update rejected");
                            let _ = respond_to.send(Err(StoreError::Rejected(e)));
                            continue;
                        }
                        let updated = doc.clone();
                        self.publish();
                        info!(collection, %id, "Updated");
                        let _ = respond_to.send(Ok(updated));
                    } else {
                        warn!(collection, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(collection, %id, "Delete");
                    if self.documents.remove(&id).is_some() {
                        self.order.retain(|kept| kept != &id);
                        self.publish();
                        info!(collection, %id, size = self.documents.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(collection, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                StoreRequest::Apply { id, action, respond_to } => {
                    debug!(collection, %id, ?action, "Apply");
                    if let Some(doc) = self.documents.get_mut(&id) {
                        let result = doc.apply_action(action).map_err(StoreError::Rejected);
                        match &result {
                            Ok(_) => {
                                self.publish();
                                info!(collection, %id, "Action ok");
                            }
                            Err(e) => warn!(collection, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(collection, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(collection, size = self.documents.len(), "Shutdown");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe handle to one collection.
#[derive(Clone)]
pub struct CollectionClient<T: Document> {
    sender: mpsc::Sender<StoreRequest<T>>,
    snapshot: watch::Receiver<Vec<T>>,
}

impl<T: Document> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>, snapshot: watch::Receiver<Vec<T>>) -> Self {
        Self { sender, snapshot }
    }

    pub async fn insert(&self, fields: T::Fields) -> Result<T::Id, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Insert { fields, respond_to })
            .await
            .map_err(|_| StoreError::Unavailable)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get { id, respond_to })
            .await
            .map_err(|_| StoreError::Unavailable)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn update_fields(&self, id: T::Id, patch: T::Patch) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::UpdateFields { id, patch, respond_to })
            .await
            .map_err(|_| StoreError::Unavailable)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Delete { id, respond_to })
            .await
            .map_err(|_| StoreError::Unavailable)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn apply(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Apply { id, action, respond_to })
            .await
            .map_err(|_| StoreError::Unavailable)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    /// Subscribe to full-collection snapshots.
    ///
    /// The receiver always holds the latest member list; every successful
    /// write replaces it wholesale.
    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.snapshot.clone()
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- A minimal document, independent of the ledger model ---

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: String,
        label: String,
        value: i64,
        created_at: DateTime<Utc>,
    }

    #[derive(Debug)]
    struct CounterFields {
        label: String,
    }

    #[derive(Debug)]
    struct CounterPatch {
        label: Option<String>,
    }

    #[derive(Debug)]
    enum CounterAction {
        Add(i64),
    }

    impl Document for Counter {
        type Id = String;
        type Fields = CounterFields;
        type Patch = CounterPatch;
        type Action = CounterAction;
        type ActionResult = i64;

        fn from_insert(
            id: String,
            fields: CounterFields,
            created_at: DateTime<Utc>,
        ) -> Result<Self, String> {
            if fields.label.is_empty() {
                return Err("label is required".to_string());
            }
            Ok(Self {
                id,
                label: fields.label,
                value: 0,
                created_at,
            })
        }

        fn apply_patch(&mut self, patch: CounterPatch) -> Result<(), String> {
            if let Some(label) = patch.label {
                self.label = label;
            }
            Ok(())
        }

        fn apply_action(&mut self, action: CounterAction) -> Result<i64, String> {
            match action {
                CounterAction::Add(delta) => {
                    self.value += delta;
                    Ok(self.value)
                }
            }
        }
    }

    fn spawn_counters() -> CollectionClient<Counter> {
        let seq = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("counter_{}", seq.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = CollectionActor::new("counters", next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn insert_get_update_delete_roundtrip() {
        let client = spawn_counters();

        let id = client
            .insert(CounterFields { label: "hits".into() })
            .await
            .unwrap();
        assert_eq!(id, "counter_1");

        let doc = client.get(id.clone()).await.unwrap().unwrap();
        assert_eq!(doc.label, "hits");
        assert_eq!(doc.value, 0);

        let updated = client
            .update_fields(id.clone(), CounterPatch { label: Some("misses".into()) })
            .await
            .unwrap();
        assert_eq!(updated.label, "misses");

        client.delete(id.clone()).await.unwrap();
        assert!(client.get(id.clone()).await.unwrap().is_none());
        assert_eq!(
            client.delete(id).await,
            Err(StoreError::NotFound("counter_1".to_string()))
        );
    }

    #[tokio::test]
    async fn rejected_insert_stores_nothing() {
        let client = spawn_counters();

        let err = client
            .insert(CounterFields { label: String::new() })
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Rejected("label is required".to_string()));
        assert!(client.subscribe().borrow().is_empty());
    }

    #[tokio::test]
    async fn snapshots_track_every_change_in_insertion_order() {
        let client = spawn_counters();
        let snapshot = client.subscribe();

        let a = client.insert(CounterFields { label: "a".into() }).await.unwrap();
        let b = client.insert(CounterFields { label: "b".into() }).await.unwrap();
        let c = client.insert(CounterFields { label: "c".into() }).await.unwrap();

        let labels: Vec<String> = snapshot.borrow().iter().map(|d| d.label.clone()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);

        client.delete(b).await.unwrap();
        let ids: Vec<String> = snapshot.borrow().iter().map(|d| d.id.clone()).collect();
        assert_eq!(ids, vec![a.clone(), c.clone()]);

        // Actions publish too.
        client.apply(c.clone(), CounterAction::Add(5)).await.unwrap();
        let values: Vec<i64> = snapshot.borrow().iter().map(|d| d.value).collect();
        assert_eq!(values, vec![0, 5]);
    }

    #[tokio::test]
    async fn actions_serialize_through_the_actor() {
        let client = spawn_counters();
        let id = client.insert(CounterFields { label: "n".into() }).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..25 {
            let client = client.clone();
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                client.apply(id, CounterAction::Add(1)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let doc = client.get(id).await.unwrap().unwrap();
        assert_eq!(doc.value, 25);
    }

    #[tokio::test]
    async fn server_stamps_creation_time() {
        let client = spawn_counters();
        let before = Utc::now();
        let id = client.insert(CounterFields { label: "t".into() }).await.unwrap();
        let after = Utc::now();

        let doc = client.get(id).await.unwrap().unwrap();
        assert!(doc.created_at >= before && doc.created_at <= after);
    }
}
