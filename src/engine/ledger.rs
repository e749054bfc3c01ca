//! The ledger workflow engine.
//!
//! Owns the rules for creating customers and products, and for posting
//! transactions that must move a ledger record, a customer balance, and
//! (for inventory purchases) a product stock level together.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::clients::{CustomersClient, ProductsClient, StoreHandle, TransactionsClient};
use crate::engine::LedgerError;
use crate::model::{
    Customer, CustomerFields, Product, ProductFields, Transaction, TransactionFields,
    TransactionKind,
};
use crate::products::ReserveOutcome;
use crate::runtime::Session;

/// Stock level below which a product shows up in
/// [`LedgerEngine::low_stock_products`].
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// A transaction posting request, as assembled by the presentation layer.
///
/// `amount` carries the raw form text; parsing it is part of the posting
/// workflow. `product_id` and `quantity` are only meaningful for purchases.
#[derive(Debug, Clone)]
pub struct TransactionRequest {
    pub customer_id: String,
    pub kind: TransactionKind,
    pub amount: String,
    pub description: String,
    pub date: NaiveDate,
    pub product_id: Option<String>,
    pub quantity: u32,
}

/// The workflow engine in front of the three ledger collections.
///
/// Reads come from the collections' snapshot subscriptions (the engine's
/// view of each collection is replaced wholesale on every push); writes go
/// through the typed clients. Cloning is cheap: clones share the underlying
/// collections, so concurrent callers race exactly like separate client
/// sessions do.
#[derive(Clone)]
pub struct LedgerEngine {
    customers: CustomersClient,
    products: ProductsClient,
    transactions: TransactionsClient,
    customer_view: watch::Receiver<Vec<Customer>>,
    product_view: watch::Receiver<Vec<Product>>,
    transaction_view: watch::Receiver<Vec<Transaction>>,
    session: Option<Session>,
}

impl LedgerEngine {
    /// Wires the engine to the three collections.
    ///
    /// Write operations are rejected with [`LedgerError::NoSession`] until a
    /// session is supplied; delete primitives stay unconditional either way
    /// (the presentation layer gates those with its own confirmation).
    pub fn new(
        customers: CustomersClient,
        products: ProductsClient,
        transactions: TransactionsClient,
        session: Option<Session>,
    ) -> Self {
        let customer_view = customers.watch();
        let product_view = products.watch();
        let transaction_view = transactions.watch();
        Self {
            customers,
            products,
            transactions,
            customer_view,
            product_view,
            transaction_view,
            session,
        }
    }

    fn require_session(&self) -> Result<&Session, LedgerError> {
        self.session.as_ref().ok_or(LedgerError::NoSession)
    }

    // ------------------------------------------------------------------
    // Write operations
    // ------------------------------------------------------------------

    /// Creates a customer profile with a zero opening balance.
    #[instrument(skip(self))]
    pub async fn create_customer(&self, name: &str, phone: &str) -> Result<String, LedgerError> {
        self.require_session()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation("customer name is required".to_string()));
        }

        let id = self
            .customers
            .create_customer(CustomerFields {
                name: name.to_string(),
                phone: phone.trim().to_string(),
            })
            .await?;
        info!(%id, "Customer created");
        Ok(id)
    }

    /// Creates an inventory product.
    ///
    /// `price` and `stock` arrive as raw form text. Unparseable input is
    /// coerced to 0 rather than rejected; the coercion is logged.
    #[instrument(skip(self))]
    pub async fn create_product(
        &self,
        name: &str,
        price: &str,
        stock: &str,
    ) -> Result<String, LedgerError> {
        self.require_session()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation("product name is required".to_string()));
        }

        let id = self
            .products
            .create_product(ProductFields {
                name: name.to_string(),
                price: lenient_price(price),
                stock: lenient_stock(stock),
            })
            .await?;
        info!(%id, "Product created");
        Ok(id)
    }

    /// Posts a transaction against a customer.
    ///
    /// For an inventory purchase the operation issues three independent
    /// writes in a fixed order: reserve stock, record the transaction,
    /// adjust the balance. Insufficient stock aborts before any write; a
    /// later write failing leaves the earlier writes committed (the error
    /// names the step that failed, nothing is rolled back).
    #[instrument(skip(self))]
    pub async fn post_transaction(&self, request: TransactionRequest) -> Result<String, LedgerError> {
        self.require_session()?;

        let amount: Decimal = request
            .amount
            .trim()
            .parse()
            .map_err(|_| LedgerError::Validation(format!("amount is not a number: {:?}", request.amount)))?;

        let customer_known = self
            .customer_view
            .borrow()
            .iter()
            .any(|c| c.id == request.customer_id);
        if !customer_known {
            return Err(LedgerError::NotFound(request.customer_id.clone()));
        }

        let mut description = request.description.trim().to_string();
        let mut product_link = None;
        let mut quantity = 0;

        if request.kind == TransactionKind::Purchase {
            if let Some(product_id) = &request.product_id {
                let product = {
                    let view = self.product_view.borrow();
                    view.iter().find(|p| &p.id == product_id).cloned()
                }
                .ok_or_else(|| LedgerError::NotFound(product_id.clone()))?;

                // Cheap pre-check against the snapshot, then the
                // authoritative check-and-decrement inside the actor.
                if product.stock < request.quantity {
                    return Err(LedgerError::InsufficientStock {
                        requested: request.quantity,
                        available: product.stock,
                    });
                }
                match self
                    .products
                    .reserve_stock(product_id.clone(), request.quantity)
                    .await?
                {
                    ReserveOutcome::Reserved { remaining } => {
                        debug!(%product_id, remaining, "Stock reserved");
                    }
                    ReserveOutcome::Insufficient { requested, available } => {
                        return Err(LedgerError::InsufficientStock { requested, available });
                    }
                }

                // Inventory purchases always carry the derived description.
                description = format!("{} (x{})", product.name, request.quantity);
                product_link = Some(product_id.clone());
                quantity = request.quantity;
            }
        }

        let transaction_id = self
            .transactions
            .record(TransactionFields {
                customer_id: request.customer_id.clone(),
                kind: request.kind,
                amount,
                description,
                date: request.date,
                product_id: product_link,
                quantity,
            })
            .await?;

        let delta = match request.kind {
            TransactionKind::Purchase => amount,
            TransactionKind::Payment => -amount,
        };
        let balance = self
            .customers
            .adjust_balance(request.customer_id.clone(), delta)
            .await?;

        info!(%transaction_id, customer = %request.customer_id, %balance, "Transaction posted");
        Ok(transaction_id)
    }

    /// Removes a customer profile.
    ///
    /// Transactions referencing the customer are left untouched.
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: &str) -> Result<(), LedgerError> {
        self.customers.delete(id.to_string()).await?;
        info!(%id, "Customer deleted");
        Ok(())
    }

    /// Removes a product from the inventory.
    ///
    /// Transactions referencing the product keep their (now dangling)
    /// product id.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<(), LedgerError> {
        self.products.delete(id.to_string()).await?;
        info!(%id, "Product deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Derived views (pure reads of the live snapshots)
    // ------------------------------------------------------------------

    /// Sum of all customer balances.
    pub fn total_outstanding(&self) -> Decimal {
        self.customer_view.borrow().iter().map(|c| c.balance).sum()
    }

    /// All customer profiles, in insertion order.
    pub fn customers(&self) -> Vec<Customer> {
        self.customer_view.borrow().clone()
    }

    /// One customer profile, if it is still present.
    pub fn customer(&self, id: &str) -> Option<Customer> {
        self.customer_view.borrow().iter().find(|c| c.id == id).cloned()
    }

    /// All inventory products, in insertion order.
    pub fn products(&self) -> Vec<Product> {
        self.product_view.borrow().clone()
    }

    /// One product, if it is still present.
    pub fn product(&self, id: &str) -> Option<Product> {
        self.product_view.borrow().iter().find(|p| p.id == id).cloned()
    }

    /// Products running low on stock.
    pub fn low_stock_products(&self) -> Vec<Product> {
        self.product_view
            .borrow()
            .iter()
            .filter(|p| p.stock < LOW_STOCK_THRESHOLD)
            .cloned()
            .collect()
    }

    /// A customer's transaction history, newest date first.
    ///
    /// Rows sharing a date stay in store-assigned order. History survives
    /// the deletion of the customer itself.
    pub fn transactions_for_customer(&self, customer_id: &str) -> Vec<Transaction> {
        let mut history: Vec<Transaction> = self
            .transaction_view
            .borrow()
            .iter()
            .filter(|t| t.customer_id == customer_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.date.cmp(&a.date));
        history
    }
}

/// Lenient price parse: unparseable or negative input becomes 0.
fn lenient_price(raw: &str) -> Decimal {
    match raw.trim().parse::<Decimal>() {
        Ok(price) if price >= Decimal::ZERO => price,
        Ok(price) => {
            warn!(raw, %price, "Negative price coerced to 0");
            Decimal::ZERO
        }
        Err(_) => {
            warn!(raw, "Unparseable price coerced to 0");
            Decimal::ZERO
        }
    }
}

/// Lenient stock parse: unparseable input becomes 0.
fn lenient_stock(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(raw, "Unparseable stock coerced to 0");
        0
    })
}
