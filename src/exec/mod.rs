//! SQL batch execution against the query server.
//!
//! Provides a trait-based interface so the console can run against the real
//! HTTP client or a scripted mock interchangeably.

mod client;
mod decode;
mod mock;
mod types;

pub use client::ExecutionClient;
pub use decode::decode_response;
pub use mock::MockExecutor;
pub use types::{ExecutionRequest, ExecutionResponse, ExecutionResult, Row, StatementOutcome};

use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the interface for SQL batch executors.
///
/// An implementation submits the whole text as one batch; statement
/// segmentation belongs to the server.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Executes a SQL batch and returns one result per statement.
    async fn execute(&self, sql: &str) -> Result<ExecutionResponse>;
}
