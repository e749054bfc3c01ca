#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Credit Ledger
//!
//! > **A small-business credit ledger on a realtime document store.**
//!
//! This crate tracks customers and what they owe, a product inventory, and
//! an append-only log of purchases (balance up) and payments (balance
//! down). Each collection lives in its own actor task and pushes full
//! snapshots to subscribers on every change; a workflow engine in front of
//! the collections owns the rules that keep balances, stock, and the ledger
//! moving together.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why collections as actors?
//!
//! A document store gives you per-document atomic updates and change
//! notifications, nothing more. Modeling each collection as an actor buys
//! both cheaply:
//! - **Atomic in-place actions**: check-and-decrement stock or move a
//!   balance inside the owning task, so concurrent writers serialize
//!   instead of overwriting each other from stale snapshots.
//! - **Snapshot pushes**: the actor publishes the full member list after
//!   every write; views are replaced wholesale, never patched.
//!
//! What the store does *not* give you is multi-document transactions. An
//! inventory purchase is three independent writes in a fixed order (stock,
//! ledger record, balance), and a failure partway leaves the earlier writes
//! committed. The engine documents and tests that behavior rather than
//! hiding it.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! The store reports [`StoreError`](store::StoreError); the engine folds it
//! into [`LedgerError`](engine::LedgerError) alongside the workflow's own
//! failures (validation, insufficient stock, missing documents). Both are
//! `thiserror` enums you can match on.
//!
//! ### 2. Concurrency Model
//! Each collection actor processes its mailbox sequentially (no locks
//! around the documents), and the actors run in parallel. Engine clones
//! share the underlying collections, so concurrent callers behave exactly
//! like separate client sessions.
//!
//! ### 3. Observability
//! `tracing` everywhere with structured fields; operations are
//! instrumented and the collection actors log every write. See
//! [`runtime::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Store ([`store`])
//! The generic document-store plumbing: the [`Document`](store::Document)
//! contract, the [`CollectionActor`](store::CollectionActor), the
//! [`CollectionClient`](store::CollectionClient), and a scripted
//! [`mock`](store::mock) for tests.
//!
//! ### 2. The Documents ([`model`], [`customers`], [`products`], [`transactions`])
//! Pure data in [`model`]; per-collection behavior (document hooks, atomic
//! actions, wiring factories) in the three collection modules.
//!
//! ### 3. The Interface ([`clients`])
//! Typed wrappers that hide message passing and the action enums:
//! [`CustomersClient`](clients::CustomersClient),
//! [`ProductsClient`](clients::ProductsClient),
//! [`TransactionsClient`](clients::TransactionsClient).
//!
//! ### 4. The Workflow ([`engine`])
//! [`LedgerEngine`](engine::LedgerEngine) — create customers and products,
//! post transactions, delete profiles and products, and the derived views
//! (total outstanding, per-customer history, low stock). The
//! [`TransactionDraft`](engine::TransactionDraft) models the posting form
//! with its live `price × quantity` amount binding.
//!
//! ### 5. The Runtime ([`runtime`])
//! [`LedgerSystem`](runtime::LedgerSystem) spawns the collections, signs in
//! an anonymous [`Session`](runtime::Session), and wires the engine.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo flow with info logs
//! RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod customers;
pub mod engine;
pub mod model;
pub mod products;
pub mod runtime;
pub mod store;
pub mod transactions;
