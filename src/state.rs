//! Application state for the console.
//!
//! Holds the last SQL text the user submitted and the current view. The state
//! is owned by whoever drives the session and passed in explicitly.

use crate::router::View;

/// Mutable state shared by the console views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    sql: String,
    view: View,
}

impl AppState {
    /// Creates an empty state on the main view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `sql` as the most recently entered text.
    pub fn save(&mut self, sql: impl Into<String>) {
        self.sql = sql.into();
    }

    /// Returns the most recently saved SQL text (empty if none).
    pub fn last_sql(&self) -> &str {
        &self.sql
    }

    /// Returns the active view.
    pub fn current_view(&self) -> View {
        self.view
    }

    /// Switches to `view`.
    pub fn navigate(&mut self, view: View) {
        self.view = view;
    }
}
