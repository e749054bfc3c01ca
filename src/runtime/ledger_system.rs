use tracing::{error, info};

use crate::engine::LedgerEngine;
use crate::runtime::Session;
use crate::store::APP_NAMESPACE;

/// The main runtime orchestrator for the credit ledger.
///
/// `LedgerSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the collection actors
/// - **Session Bootstrap**: Signing in anonymously before any write happens
/// - **Wiring**: Handing the engine one client per collection
///
/// # Architecture
///
/// The system runs three collection actors:
/// - **customers**: profiles with their running balances
/// - **products**: the inventory with stock tracking
/// - **transactions**: the append-only ledger
///
/// The [`LedgerEngine`] in front of them owns the workflow rules; it is the
/// only surface a presentation layer needs.
///
/// # Example
///
/// ```ignore
/// let system = LedgerSystem::new();
///
/// let customer_id = system.engine.create_customer("Alice", "555-0001").await?;
/// let product_id = system.engine.create_product("Widget", "9.99", "5").await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct LedgerSystem {
    /// The wired workflow engine; clone it freely.
    pub engine: LedgerEngine,

    /// Task handles for the collection actors (used for graceful shutdown).
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl LedgerSystem {
    /// Creates and initializes a new `LedgerSystem` with all collections
    /// running.
    ///
    /// This method:
    /// 1. Signs in an anonymous session
    /// 2. Spawns one collection actor each for customers, products, and
    ///    transactions
    /// 3. Wires the engine to the three typed clients
    pub fn new() -> Self {
        let session = Session::anonymous();
        info!(uid = %session.uid(), namespace = APP_NAMESPACE, "Signed in anonymously");

        // 1. Create the collections (no dependencies between them)
        let (customer_actor, customers) = crate::customers::new();
        let (product_actor, products) = crate::products::new();
        let (transaction_actor, transactions) = crate::transactions::new();

        // 2. Spawn each collection in its own task
        let customer_handle = tokio::spawn(customer_actor.run());
        let product_handle = tokio::spawn(product_actor.run());
        let transaction_handle = tokio::spawn(transaction_actor.run());

        // 3. The engine coordinates across the three collections
        let engine = LedgerEngine::new(customers, products, transactions, Some(session));

        Self {
            engine,
            handles: vec![customer_handle, product_handle, transaction_handle],
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the engine closes the collection mailboxes; each actor
    /// drains its queue and exits its event loop. Clones of the engine keep
    /// the collections alive until they are dropped too.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all collection actors shut down cleanly
    /// - `Err(String)` if any actor task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Closing the channels signals shutdown to every actor.
        drop(self.engine);

        for handle in self.handles {
            // If the task panicked, this will return an Err
            if let Err(e) = handle.await {
                error!("Collection actor task failed: {:?}", e);
                return Err(format!("Collection actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for LedgerSystem {
    fn default() -> Self {
        Self::new()
    }
}
