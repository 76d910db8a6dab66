//! Transactions API client
//!
//! Talks to the backend that owns the transaction data:
//! - types: wire types (`Transaction`, `Category`, `ListQuery`)
//! - client: reqwest implementation of the consumed endpoints
//! - probe: contract checks run by `finboard probe`

use async_trait::async_trait;
use std::sync::Arc;

pub mod client;
pub mod error;
pub mod probe;
pub mod types;

pub use client::ApiClient;
pub use error::{ClientError, ClientResult, FailureKind};
pub use probe::{run_probe, CheckOutcome, ProbeExpectations, ProbeReport};
pub use types::{Category, ListQuery, Transaction, TransactionType};

/// Source reference type
pub type SourceRef = Arc<dyn TransactionSource>;

/// Where a view loads its transactions from
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch up to `limit` transactions in backend order
    async fn load_transactions(&self, limit: u32) -> ClientResult<Vec<Transaction>>;
}
