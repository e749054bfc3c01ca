//! # Mock Store
//!
//! Utilities for testing ledger logic without spawning real collection
//! actors.
//!
//! Use [`MockCollection`] to get a scripted [`CollectionClient`]: queue
//! expectations with [`MockCollection::expect_insert`] and friends, feed the
//! read path with [`MockCollection::push_snapshot`], and assert completeness
//! with [`MockCollection::verify`]. For tests that need to inspect request
//! payloads, [`raw_client`] hands back the receiving end of the mailbox.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot, watch};

use crate::store::{CollectionClient, Document, StoreError, StoreRequest};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the scripted response for it.
enum Expectation<T: Document> {
    Insert {
        response: Result<T::Id, StoreError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), StoreError>,
    },
    Apply {
        id: T::Id,
        response: Result<T::ActionResult, StoreError>,
    },
}

/// A scripted collection client with expectation tracking.
///
/// # Example
/// ```ignore
/// let mut mock = MockCollection::<Product>::new();
/// mock.push_snapshot(vec![widget.clone()]);
/// mock.expect_apply("product_1".to_string()).return_ok(outcome);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were consumed
/// ```
pub struct MockCollection<T: Document> {
    client: CollectionClient<T>,
    snapshot: watch::Sender<Vec<T>>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Document> MockCollection<T>
where
    T::Id: Send,
    T::Fields: Send,
    T::Patch: Send,
    T::Action: Send,
    T::ActionResult: Send,
{
    /// Creates a new mock collection with an empty snapshot and no
    /// expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(Vec::new());
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Background task answering requests from the expectation queue.
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Insert { fields: _, respond_to },
                        Some(Expectation::Insert { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Get { id: _, respond_to },
                        Some(Expectation::Get { id: _, response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Delete { id: _, respond_to },
                        Some(Expectation::Delete { id: _, response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Apply { id: _, action: _, respond_to },
                        Some(Expectation::Apply { id: _, response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: CollectionClient::new(sender, snapshot_rx),
            snapshot: snapshot_tx,
            expectations,
            _handle: handle,
        }
    }

    /// Returns the scripted client for use in tests.
    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    /// Replaces the snapshot all subscribers of this collection observe.
    pub fn push_snapshot(&self, members: Vec<T>) {
        self.snapshot.send_replace(members);
    }

    /// Expects an `insert` operation.
    pub fn expect_insert(&mut self) -> InsertExpectationBuilder<T> {
        InsertExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `apply` (atomic action) operation.
    pub fn expect_apply(&mut self, id: T::Id) -> ApplyExpectationBuilder<T> {
        ApplyExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<T: Document> Default for MockCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `insert` expectations.
pub struct InsertExpectationBuilder<T: Document> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: Document> InsertExpectationBuilder<T> {
    pub fn return_ok(self, id: T::Id) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Insert { response: Ok(id) });
    }

    pub fn return_err(self, error: StoreError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Insert { response: Err(error) });
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: Document> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: Document> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    pub fn return_err(self, error: StoreError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectationBuilder<T: Document> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: Document> DeleteExpectationBuilder<T> {
    pub fn return_ok(self) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Delete {
            id: self.id,
            response: Ok(()),
        });
    }

    pub fn return_err(self, error: StoreError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Delete {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `apply` expectations.
pub struct ApplyExpectationBuilder<T: Document> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: Document> ApplyExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Apply {
            id: self.id,
            response: Ok(result),
        });
    }

    pub fn return_err(self, error: StoreError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Apply {
            id: self.id,
            response: Err(error),
        });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client plus the raw mailbox receiver, for tests that must
/// inspect the request payloads themselves (the builder API only scripts
/// responses).
pub fn raw_client<T: Document>(
    buffer_size: usize,
) -> (
    CollectionClient<T>,
    mpsc::Receiver<StoreRequest<T>>,
    watch::Sender<Vec<T>>,
) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (snapshot_tx, snapshot_rx) = watch::channel(Vec::new());
    (
        CollectionClient::new(sender, snapshot_rx),
        receiver,
        snapshot_tx,
    )
}

/// Helper to verify that the next message is an Insert request.
pub async fn expect_insert<T: Document>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Fields, oneshot::Sender<Result<T::Id, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Insert { fields, respond_to }) => Some((fields, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Apply request.
pub async fn expect_apply<T: Document>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, StoreError>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Apply { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}
