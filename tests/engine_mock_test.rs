//! Engine tests against a scripted store.
//!
//! These pin down the write sequence of an inventory purchase (stock →
//! ledger record → balance) and what happens when a step in the middle
//! fails: earlier writes stay committed, nothing is rolled back, and the
//! error of the failed step surfaces.

use chrono::{NaiveDate, Utc};
use credit_ledger::clients::{CustomersClient, ProductsClient, TransactionsClient};
use credit_ledger::customers::{CustomerAction, CustomerActionResult};
use credit_ledger::engine::{LedgerEngine, LedgerError, TransactionRequest};
use credit_ledger::model::{Customer, Product, Transaction, TransactionKind};
use credit_ledger::products::{ProductAction, ProductActionResult, ReserveOutcome};
use credit_ledger::runtime::Session;
use credit_ledger::store::mock::{expect_apply, expect_insert, raw_client, MockCollection};
use credit_ledger::store::StoreError;
use rust_decimal::Decimal;

fn dec(text: &str) -> Decimal {
    text.parse().unwrap()
}

fn date(text: &str) -> NaiveDate {
    text.parse().unwrap()
}

fn alice() -> Customer {
    Customer {
        id: "customer_1".to_string(),
        name: "Alice".to_string(),
        phone: "555-0001".to_string(),
        balance: Decimal::ZERO,
        created_at: Utc::now(),
    }
}

fn widget(stock: u32) -> Product {
    Product {
        id: "product_1".to_string(),
        name: "Widget".to_string(),
        price: dec("9.99"),
        stock,
        created_at: Utc::now(),
    }
}

fn purchase_of_two() -> TransactionRequest {
    TransactionRequest {
        customer_id: "customer_1".to_string(),
        kind: TransactionKind::Purchase,
        amount: "19.98".to_string(),
        description: "hand-typed note".to_string(),
        date: date("2024-03-01"),
        product_id: Some("product_1".to_string()),
        quantity: 2,
    }
}

fn engine_with(
    customers: &MockCollection<Customer>,
    products: &MockCollection<Product>,
    transactions: &MockCollection<Transaction>,
) -> LedgerEngine {
    LedgerEngine::new(
        CustomersClient::new(customers.client()),
        ProductsClient::new(products.client()),
        TransactionsClient::new(transactions.client()),
        Some(Session::anonymous()),
    )
}

/// The ledger insert fails after the stock was already reserved: the error
/// surfaces and no balance adjustment is ever attempted.
#[tokio::test]
async fn failed_ledger_insert_is_not_rolled_back() {
    let customer_mock = MockCollection::<Customer>::new();
    let mut product_mock = MockCollection::<Product>::new();
    let mut transaction_mock = MockCollection::<Transaction>::new();

    customer_mock.push_snapshot(vec![alice()]);
    product_mock.push_snapshot(vec![widget(5)]);

    product_mock
        .expect_apply("product_1".to_string())
        .return_ok(ProductActionResult::ReserveStock(ReserveOutcome::Reserved {
            remaining: 3,
        }));
    transaction_mock
        .expect_insert()
        .return_err(StoreError::Unavailable);

    let engine = engine_with(&customer_mock, &product_mock, &transaction_mock);
    let err = engine.post_transaction(purchase_of_two()).await.unwrap_err();
    assert_eq!(err, LedgerError::Store(StoreError::Unavailable));

    // The reservation and the failed insert were consumed; the customers
    // collection was never touched.
    customer_mock.verify();
    product_mock.verify();
    transaction_mock.verify();
}

/// The customer vanishes between the snapshot check and the balance write:
/// the record is already in the ledger and stays there.
#[tokio::test]
async fn failed_balance_write_leaves_the_record() {
    let mut customer_mock = MockCollection::<Customer>::new();
    let mut product_mock = MockCollection::<Product>::new();
    let mut transaction_mock = MockCollection::<Transaction>::new();

    customer_mock.push_snapshot(vec![alice()]);
    product_mock.push_snapshot(vec![widget(5)]);

    product_mock
        .expect_apply("product_1".to_string())
        .return_ok(ProductActionResult::ReserveStock(ReserveOutcome::Reserved {
            remaining: 3,
        }));
    transaction_mock.expect_insert().return_ok("txn_1".to_string());
    customer_mock
        .expect_apply("customer_1".to_string())
        .return_err(StoreError::NotFound("customer_1".to_string()));

    let engine = engine_with(&customer_mock, &product_mock, &transaction_mock);
    let err = engine.post_transaction(purchase_of_two()).await.unwrap_err();
    assert_eq!(err, LedgerError::NotFound("customer_1".to_string()));

    customer_mock.verify();
    product_mock.verify();
    transaction_mock.verify();
}

/// Insufficient stock is caught against the snapshot before any write.
#[tokio::test]
async fn insufficient_stock_writes_nothing() {
    let customer_mock = MockCollection::<Customer>::new();
    let product_mock = MockCollection::<Product>::new();
    let transaction_mock = MockCollection::<Transaction>::new();

    customer_mock.push_snapshot(vec![alice()]);
    product_mock.push_snapshot(vec![widget(1)]);

    let engine = engine_with(&customer_mock, &product_mock, &transaction_mock);
    let err = engine.post_transaction(purchase_of_two()).await.unwrap_err();
    assert_eq!(err, LedgerError::InsufficientStock { requested: 2, available: 1 });

    // No expectations were queued, so any store call would have panicked
    // the responder; verify for symmetry.
    customer_mock.verify();
    product_mock.verify();
    transaction_mock.verify();
}

#[tokio::test]
async fn unknown_customer_writes_nothing() {
    let customer_mock = MockCollection::<Customer>::new();
    let product_mock = MockCollection::<Product>::new();
    let transaction_mock = MockCollection::<Transaction>::new();

    product_mock.push_snapshot(vec![widget(5)]);

    let engine = engine_with(&customer_mock, &product_mock, &transaction_mock);
    let err = engine.post_transaction(purchase_of_two()).await.unwrap_err();
    assert_eq!(err, LedgerError::NotFound("customer_1".to_string()));
}

#[tokio::test]
async fn unknown_product_writes_nothing() {
    let customer_mock = MockCollection::<Customer>::new();
    let product_mock = MockCollection::<Product>::new();
    let transaction_mock = MockCollection::<Transaction>::new();

    customer_mock.push_snapshot(vec![alice()]);

    let engine = engine_with(&customer_mock, &product_mock, &transaction_mock);
    let err = engine.post_transaction(purchase_of_two()).await.unwrap_err();
    assert_eq!(err, LedgerError::NotFound("product_1".to_string()));
}

/// The three writes of an inventory purchase go out in order — stock, then
/// the ledger record (with the derived description), then the balance.
#[tokio::test]
async fn purchase_writes_in_order_with_derived_description() {
    let (customer_client, mut customer_rx, customer_snapshot) = raw_client::<Customer>(10);
    let (product_client, mut product_rx, product_snapshot) = raw_client::<Product>(10);
    let (transaction_client, mut transaction_rx, _transaction_snapshot) =
        raw_client::<Transaction>(10);

    customer_snapshot.send_replace(vec![alice()]);
    product_snapshot.send_replace(vec![widget(5)]);

    let engine = LedgerEngine::new(
        CustomersClient::new(customer_client),
        ProductsClient::new(product_client),
        TransactionsClient::new(transaction_client),
        Some(Session::anonymous()),
    );

    let post = tokio::spawn({
        let engine = engine.clone();
        async move { engine.post_transaction(purchase_of_two()).await }
    });

    // 1) Stock reservation.
    let (id, action, responder) = expect_apply(&mut product_rx)
        .await
        .expect("Expected stock reservation first");
    assert_eq!(id, "product_1");
    match action {
        ProductAction::ReserveStock(quantity) => assert_eq!(quantity, 2),
        other => panic!("Expected ReserveStock, got {other:?}"),
    }
    responder
        .send(Ok(ProductActionResult::ReserveStock(ReserveOutcome::Reserved {
            remaining: 3,
        })))
        .unwrap();

    // 2) The ledger record, with the derivation overriding the typed text.
    let (fields, responder) = expect_insert(&mut transaction_rx)
        .await
        .expect("Expected the ledger record second");
    assert_eq!(fields.customer_id, "customer_1");
    assert_eq!(fields.description, "Widget (x2)");
    assert_eq!(fields.amount, dec("19.98"));
    assert_eq!(fields.product_id.as_deref(), Some("product_1"));
    assert_eq!(fields.quantity, 2);
    responder.send(Ok("txn_1".to_string())).unwrap();

    // 3) The balance adjustment, positive for a purchase.
    let (id, action, responder) = expect_apply(&mut customer_rx)
        .await
        .expect("Expected the balance adjustment last");
    assert_eq!(id, "customer_1");
    match action {
        CustomerAction::AdjustBalance(delta) => assert_eq!(delta, dec("19.98")),
    }
    responder
        .send(Ok(CustomerActionResult::AdjustBalance(dec("19.98"))))
        .unwrap();

    assert_eq!(post.await.unwrap().unwrap(), "txn_1");
}

/// A payment sends a negative delta and never touches the products
/// collection.
#[tokio::test]
async fn payment_adjusts_the_balance_down() {
    let (customer_client, mut customer_rx, customer_snapshot) = raw_client::<Customer>(10);
    let (product_client, _product_rx, _product_snapshot) = raw_client::<Product>(10);
    let (transaction_client, mut transaction_rx, _transaction_snapshot) =
        raw_client::<Transaction>(10);

    customer_snapshot.send_replace(vec![alice()]);

    let engine = LedgerEngine::new(
        CustomersClient::new(customer_client),
        ProductsClient::new(product_client),
        TransactionsClient::new(transaction_client),
        Some(Session::anonymous()),
    );

    let request = TransactionRequest {
        customer_id: "customer_1".to_string(),
        kind: TransactionKind::Payment,
        amount: "10.00".to_string(),
        description: "cash".to_string(),
        date: date("2024-03-02"),
        product_id: None,
        quantity: 0,
    };
    let post = tokio::spawn({
        let engine = engine.clone();
        async move { engine.post_transaction(request).await }
    });

    let (fields, responder) = expect_insert(&mut transaction_rx)
        .await
        .expect("Expected the ledger record");
    assert_eq!(fields.kind, TransactionKind::Payment);
    assert_eq!(fields.description, "cash");
    assert_eq!(fields.product_id, None);
    responder.send(Ok("txn_1".to_string())).unwrap();

    let (_, action, responder) = expect_apply(&mut customer_rx)
        .await
        .expect("Expected the balance adjustment");
    match action {
        CustomerAction::AdjustBalance(delta) => assert_eq!(delta, dec("-10.00")),
    }
    responder
        .send(Ok(CustomerActionResult::AdjustBalance(dec("-10.00"))))
        .unwrap();

    assert_eq!(post.await.unwrap().unwrap(), "txn_1");
}
