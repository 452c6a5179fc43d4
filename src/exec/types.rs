//! Execution result types.
//!
//! Defines the structures exchanged with the query server's `/api/exec`
//! endpoint, after the wire quirks have been decoded away.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A row of loosely-typed cell values (numbers, strings, nulls, booleans).
pub type Row = Vec<Value>;

/// Request body for `POST /api/exec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecutionRequest<'a> {
    /// SQL text, sent verbatim.
    pub sql: &'a str,
}

/// Outcome of a single statement in a submitted batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Error message; when present the statement failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Column names, when the statement produced tabular output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,

    /// Result rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Row>>,
}

/// Borrowed view of an [`ExecutionResult`] that makes the error/data split explicit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatementOutcome<'a> {
    /// The statement failed on the server.
    Failed {
        /// Server-provided error message.
        message: &'a str,
    },

    /// The statement succeeded; both slices are empty for statements that
    /// produce no rows.
    Rows {
        /// Column names.
        headers: &'a [String],
        /// Row data.
        data: &'a [Row],
    },
}

impl ExecutionResult {
    /// Creates a failed statement result.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            headers: None,
            data: None,
        }
    }

    /// Creates a successful statement result with the given columns and rows.
    pub fn rows(headers: Vec<String>, data: Vec<Row>) -> Self {
        Self {
            error: None,
            headers: Some(headers),
            data: Some(data),
        }
    }

    /// Returns the statement outcome. An `error` wins over any data fields.
    pub fn outcome(&self) -> StatementOutcome<'_> {
        match &self.error {
            Some(message) => StatementOutcome::Failed { message },
            None => StatementOutcome::Rows {
                headers: self.headers.as_deref().unwrap_or_default(),
                data: self.data.as_deref().unwrap_or_default(),
            },
        }
    }

    /// Returns true if the statement failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Number of rows returned; zero for failed statements.
    pub fn row_count(&self) -> usize {
        match self.outcome() {
            StatementOutcome::Failed { .. } => 0,
            StatementOutcome::Rows { data, .. } => data.len(),
        }
    }
}

/// Decoded response for one submitted SQL batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResponse {
    /// Server-reported execution time, in whatever unit the server uses.
    pub time: f64,

    /// One entry per statement, in submission order.
    pub results: Vec<ExecutionResult>,
}

impl ExecutionResponse {
    /// Number of statements that failed.
    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_error()).count()
    }

    /// Returns true if any statement in the batch failed.
    pub fn has_errors(&self) -> bool {
        self.results.iter().any(ExecutionResult::is_error)
    }
}
