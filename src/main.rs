//! # Credit Ledger demo
//!
//! Drives one end-to-end flow through the ledger:
//! 1. Boot the [`LedgerSystem`] (collections + anonymous session).
//! 2. Create a customer and an inventory product.
//! 3. Post an inventory purchase (stock down, balance up) and a payment.
//! 4. Report the derived views and shut down.

use chrono::Utc;
use credit_ledger::engine::TransactionDraft;
use credit_ledger::model::TransactionKind;
use credit_ledger::runtime::{setup_tracing, LedgerSystem};
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting credit ledger");

    let system = LedgerSystem::new();
    let engine = system.engine.clone();
    let today = Utc::now().date_naive();

    let customer_id = engine
        .create_customer("Alice", "555-0001")
        .await
        .map_err(|e| e.to_string())?;
    info!(%customer_id, "Customer created");

    let product_id = engine
        .create_product("Widget", "9.99", "5")
        .await
        .map_err(|e| e.to_string())?;
    info!(%product_id, "Product created");

    // An inventory purchase: the draft derives the amount from the
    // selection, the engine moves stock and balance together.
    let span = tracing::info_span!("purchase_flow");
    async {
        let widget = engine
            .product(&product_id)
            .ok_or_else(|| format!("product {} missing from snapshot", product_id))?;
        let mut draft = TransactionDraft::new(TransactionKind::Purchase, today);
        draft.select_product(Some(&widget));
        draft.set_quantity(2);
        info!(amount = draft.amount(), "Posting purchase");

        engine
            .post_transaction(draft.into_request(&customer_id))
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    // A payment against the new balance.
    let mut payment = TransactionDraft::new(TransactionKind::Payment, today);
    payment.set_amount("10.00");
    payment.set_description("cash payment");
    engine
        .post_transaction(payment.into_request(&customer_id))
        .await
        .map_err(|e| e.to_string())?;

    let alice = engine
        .customer(&customer_id)
        .ok_or_else(|| format!("customer {} missing from snapshot", customer_id))?;
    info!(
        balance = %alice.balance,
        outstanding = %engine.total_outstanding(),
        history = engine.transactions_for_customer(&customer_id).len(),
        low_stock = engine.low_stock_products().len(),
        "Ledger state"
    );

    drop(engine);
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
