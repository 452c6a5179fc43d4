//! Mock executor for testing.
//!
//! Replays queued server bodies through the real decoder, so session and
//! formatting code can be exercised without a running server.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::decode::decode_response;
use super::types::ExecutionResponse;
use super::SqlExecutor;
use crate::error::{OrangeError, Result};

enum Reply {
    Body(String),
    TransportFailure(String),
}

/// An executor that answers from a queue of canned replies.
#[derive(Default)]
pub struct MockExecutor {
    replies: Mutex<VecDeque<Reply>>,
    submitted: Mutex<Vec<String>>,
}

impl MockExecutor {
    /// Creates a mock with no queued replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that answers with the given raw bodies, in order.
    pub fn with_bodies<I, S>(bodies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mock = Self::new();
        for body in bodies {
            mock.push_body(body);
        }
        mock
    }

    /// Queues a raw response body, exactly as the server would send it.
    pub fn push_body(&self, body: impl Into<String>) {
        self.lock_replies().push_back(Reply::Body(body.into()));
    }

    /// Queues a transport failure.
    pub fn push_transport_failure(&self, message: impl Into<String>) {
        self.lock_replies()
            .push_back(Reply::TransportFailure(message.into()));
    }

    /// Returns every SQL text submitted so far.
    pub fn submitted(&self) -> Vec<String> {
        self.submitted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Reply>> {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SqlExecutor for MockExecutor {
    async fn execute(&self, sql: &str) -> Result<ExecutionResponse> {
        self.submitted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(sql.to_string());

        let reply = self.lock_replies().pop_front();
        match reply {
            Some(Reply::Body(body)) => decode_response(&body),
            Some(Reply::TransportFailure(message)) => Err(OrangeError::transport(message)),
            None => Err(OrangeError::transport("mock executor has no queued reply")),
        }
    }
}
