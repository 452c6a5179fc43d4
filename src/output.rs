//! Output formatting for execution responses.
//!
//! Provides plain text tables and JSON. Statement errors are printed inline
//! next to the statements that succeeded.

use serde_json::Value;

use crate::exec::{ExecutionResponse, ExecutionResult, Row, StatementOutcome};

/// Output format for execution results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned text tables.
    #[default]
    Text,
    /// Pretty-printed JSON with `results` as a native array.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}. Expected: text or json")),
        }
    }
}

/// Formats execution responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultFormatter {
    format: OutputFormat,
}

impl ResultFormatter {
    /// Creates a new output formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the response according to the configured format.
    pub fn format(&self, response: &ExecutionResponse) -> String {
        match self.format {
            OutputFormat::Text => format_text(response),
            OutputFormat::Json => format_json(response),
        }
    }
}

/// Formats a response as text: one block per statement, then a summary line.
pub fn format_text(response: &ExecutionResponse) -> String {
    let mut out = String::new();

    for (i, result) in response.results.iter().enumerate() {
        out.push_str(&format_statement(i + 1, result));
        out.push('\n');
    }

    let count = response.results.len();
    out.push_str(&format!(
        "{} {}, {} failed, time {}\n",
        count,
        if count == 1 { "statement" } else { "statements" },
        response.error_count(),
        response.time
    ));
    out
}

/// Formats a response as pretty JSON.
pub fn format_json(response: &ExecutionResponse) -> String {
    serde_json::to_string_pretty(response)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {}\"}}", e))
}

fn format_statement(number: usize, result: &ExecutionResult) -> String {
    match result.outcome() {
        StatementOutcome::Failed { message } => {
            format!("Statement {number}: ERROR {message}\n")
        }
        StatementOutcome::Rows { headers, data } if headers.is_empty() && data.is_empty() => {
            format!("Statement {number}: OK (0 rows)\n")
        }
        StatementOutcome::Rows { headers, data } => {
            format!("Statement {number}:\n{}", render_table(headers, data))
        }
    }
}

/// Renders an aligned table. Rows shorter than the header are padded and
/// extra cells get unnamed columns.
fn render_table(headers: &[String], data: &[Row]) -> String {
    let columns = data
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);

    let header_cells: Vec<String> = (0..columns)
        .map(|i| headers.get(i).cloned().unwrap_or_default())
        .collect();
    let body: Vec<Vec<String>> = data
        .iter()
        .map(|row| {
            (0..columns)
                .map(|i| row.get(i).map(display_cell).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            body.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header_cells[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&render_line(&header_cells, &widths));
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in &body {
        out.push_str(&render_line(row, &widths));
    }

    let rows = data.len();
    out.push_str(&format!(
        "({} {})\n",
        rows,
        if rows == 1 { "row" } else { "rows" }
    ));
    out
}

/// Renders one table line. Trailing empty cells are dropped so short rows and
/// unnamed columns do not leave dangling separators.
fn render_line(cells: &[String], widths: &[usize]) -> String {
    let used = cells
        .iter()
        .rposition(|cell| !cell.is_empty())
        .map_or(0, |last| last + 1);
    let line = cells[..used]
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{}\n", line.trim_end())
}

/// Renders a single cell value for display.
pub fn display_cell(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
