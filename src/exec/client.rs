//! HTTP execution client.
//!
//! Submits SQL batches to the query server with a single `POST /api/exec`
//! and decodes the reply. No retries: every failure goes straight back to
//! the caller.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, warn};
use url::Url;

use super::decode::decode_response;
use super::types::{ExecutionRequest, ExecutionResponse};
use super::SqlExecutor;
use crate::config::ServerConfig;
use crate::error::{OrangeError, Result};

/// Maximum number of characters of SQL or body text echoed into logs and errors.
const PREVIEW_CHARS: usize = 80;

/// Client for the query server's execution endpoint.
///
/// Cloning is cheap and clones share the underlying connection pool. The
/// client holds no per-call state, so concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct ExecutionClient {
    endpoint: Url,
    http: Client,
}

impl ExecutionClient {
    /// Creates a client for the server described by `config`.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let endpoint = config.exec_endpoint()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| OrangeError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { endpoint, http })
    }

    /// Returns the full URL requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submits `sql` as one batch and returns the decoded response.
    ///
    /// Statement failures are reported inside the response. `Err` means the
    /// request itself failed ([`OrangeError::Transport`]) or the server replied
    /// with something that is not an execution response
    /// ([`OrangeError::InvalidResponseShape`]).
    pub async fn execute(&self, sql: &str) -> Result<ExecutionResponse> {
        debug!(
            "Executing batch: \"{}\" (len={})",
            preview(sql).replace('\n', " "),
            sql.len()
        );
        let start = Instant::now();

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&ExecutionRequest { sql })
            .send()
            .await
            .map_err(|e| {
                warn!(
                    "Request to {} failed after {}ms: {}",
                    self.endpoint,
                    start.elapsed().as_millis(),
                    e
                );
                self.transport_error(e)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OrangeError::transport(format!("Failed to read response: {e}")))?;

        debug!(
            "Response received: status={} duration_ms={}",
            status,
            start.elapsed().as_millis()
        );

        if !status.is_success() {
            warn!("Server error: status={} body=\"{}\"", status, preview(&body));
            return Err(OrangeError::transport(format!(
                "Server returned {status}: {}",
                preview(&body)
            )));
        }

        match decode_response(&body) {
            Ok(decoded) => {
                debug!(
                    "Decoded {} statement result(s), {} failed, server time {}",
                    decoded.results.len(),
                    decoded.error_count(),
                    decoded.time
                );
                Ok(decoded)
            }
            Err(e) => {
                warn!("Rejected response from {}: {}", self.endpoint, e);
                Err(e)
            }
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> OrangeError {
        if err.is_timeout() {
            OrangeError::transport(format!("Request to {} timed out", self.endpoint))
        } else if err.is_connect() {
            OrangeError::transport(format!(
                "Failed to connect to {}. Is the orange server running?",
                self.endpoint
            ))
        } else {
            OrangeError::transport(format!("Request failed: {err}"))
        }
    }
}

#[async_trait]
impl SqlExecutor for ExecutionClient {
    async fn execute(&self, sql: &str) -> Result<ExecutionResponse> {
        ExecutionClient::execute(self, sql).await
    }
}

/// Truncates text to [`PREVIEW_CHARS`] characters, respecting char boundaries.
fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
