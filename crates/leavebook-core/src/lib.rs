//! Core types and trait definitions for the Leavebook attendance ledger.
//!
//! This crate holds the accounting rules (scheduled hours, leave budget,
//! recalculation) and is free of HTTP and database dependencies. Storage
//! backends implement [`store::LedgerStore`]; the API depends on that trait.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod event;
pub mod export;
pub mod ledger;
pub mod number;
pub mod store;
pub mod subject;
pub mod summary;
pub mod user;

pub use error::{DomainError, Error, Result};
