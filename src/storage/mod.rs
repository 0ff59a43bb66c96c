//! Data access for the externally hosted F1 dataset.
//!
//! The dataset lives in a managed Postgres instance fronted by PostgREST;
//! this module owns the query description type and the store trait the
//! route handlers talk to. Handlers never see a concrete client.

pub mod postgrest;
pub mod query;

pub use postgrest::PostgrestStore;
pub use query::Query;

use async_trait::async_trait;
use serde_json::Value;

/// Failures reported by the store. Every variant collapses to an opaque
/// 500 at the route boundary; the detail is only ever logged.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("database responded with status {status}: {body}")]
    Database { status: u16, body: String },
}

/// Read-only access to the race dataset.
#[async_trait]
pub trait RaceStore: Send + Sync {
    /// Execute a query and return the matching rows as opaque JSON objects.
    async fn fetch(&self, query: &Query) -> Result<Vec<Value>, StoreError>;
}
