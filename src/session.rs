//! Interactive console session.
//!
//! Reads SQL and slash commands line by line, submits batches through a
//! [`SqlExecutor`] and writes formatted results. Input accumulates until a line
//! ends with `;` or a blank line is entered; the accumulated text is sent as one
//! batch and the server decides where statements begin and end.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::error::{OrangeError, Result};
use crate::exec::SqlExecutor;
use crate::output::ResultFormatter;
use crate::router::View;
use crate::state::AppState;

/// Help text displayed for the /help command.
const HELP_TEXT: &str = r#"Enter SQL and finish with ';' or a blank line to run it.

Commands:
  /main            - Show the SQL console
  /about           - About this client
  /last            - Print the last submitted SQL
  /help            - Show this help message
  /quit, /exit     - Exit
"#;

/// Result of handling one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Keep reading; print the contained text (may be empty).
    Continue(String),
    /// Stop the session.
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Navigate(View),
    Last,
    Help,
    Quit,
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        if let Some(view) = input.strip_prefix('/').and_then(View::from_name) {
            return Some(Self::Navigate(view));
        }
        match input.to_lowercase().as_str() {
            "/last" => Some(Self::Last),
            "/help" | "/?" => Some(Self::Help),
            "/quit" | "/exit" | "/q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// A console session bound to one executor.
pub struct Session<'a> {
    executor: &'a dyn SqlExecutor,
    formatter: ResultFormatter,
    state: AppState,
    buffer: Vec<String>,
}

impl<'a> Session<'a> {
    /// Creates a session starting from `state`.
    pub fn new(executor: &'a dyn SqlExecutor, formatter: ResultFormatter, state: AppState) -> Self {
        Self {
            executor,
            formatter,
            state,
            buffer: Vec::new(),
        }
    }

    /// Returns the current application state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Consumes the session and hands back its state.
    pub fn into_state(self) -> AppState {
        self.state
    }

    /// Returns the prompt for the next line.
    pub fn prompt(&self) -> String {
        if self.buffer.is_empty() {
            format!("{}> ", self.state.current_view().name())
        } else {
            "   ...> ".to_string()
        }
    }

    /// Handles one input line (without its trailing newline).
    pub async fn handle_line(&mut self, line: &str) -> Step {
        let trimmed = line.trim();

        if self.buffer.is_empty() && trimmed.starts_with('/') {
            return self.handle_command(trimmed);
        }

        if trimmed.is_empty() {
            if self.buffer.is_empty() {
                return Step::Continue(String::new());
            }
            return Step::Continue(self.submit().await);
        }

        if self.state.current_view() != View::Main {
            return Step::Continue(
                "SQL can only be run from the main view. Type /main to switch.\n".to_string(),
            );
        }

        self.buffer.push(line.to_string());
        if trimmed.ends_with(';') {
            Step::Continue(self.submit().await)
        } else {
            Step::Continue(String::new())
        }
    }

    /// Submits any pending input, e.g. at end of input.
    pub async fn flush_pending(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.submit().await)
        }
    }

    /// Runs the session until `/quit` or end of input.
    pub async fn run<R, W>(&mut self, mut input: R, output: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        write_out(output, "orange console. Type /help for commands.\n").await?;

        loop {
            write_out(output, &self.prompt()).await?;

            let mut line = String::new();
            let read = input
                .read_line(&mut line)
                .await
                .map_err(|e| OrangeError::io(format!("Failed to read input: {e}")))?;

            if read == 0 {
                if let Some(text) = self.flush_pending().await {
                    write_out(output, &text).await?;
                }
                write_out(output, "\n").await?;
                break;
            }

            let line = line.trim_end_matches(['\n', '\r']);
            match self.handle_line(line).await {
                Step::Continue(text) => write_out(output, &text).await?,
                Step::Quit => break,
            }
        }

        info!("Session ended");
        Ok(())
    }

    fn handle_command(&mut self, input: &str) -> Step {
        let Some(command) = Command::parse(input) else {
            return Step::Continue(format!(
                "Unknown command: {input}. Type /help for available commands.\n"
            ));
        };

        debug!("Command: {:?}", command);
        match command {
            Command::Navigate(view) => {
                self.state.navigate(view);
                match view {
                    View::Main => Step::Continue(String::new()),
                    View::About => Step::Continue(about_text()),
                }
            }
            Command::Last => {
                let last = self.state.last_sql();
                if last.is_empty() {
                    Step::Continue("No SQL has been submitted yet.\n".to_string())
                } else {
                    Step::Continue(format!("{last}\n"))
                }
            }
            Command::Help => Step::Continue(HELP_TEXT.to_string()),
            Command::Quit => Step::Quit,
        }
    }

    async fn submit(&mut self) -> String {
        let sql = std::mem::take(&mut self.buffer).join("\n");
        self.state.save(sql.as_str());

        match self.executor.execute(&sql).await {
            Ok(response) => self.formatter.format(&response),
            Err(e) => format!("{}: {}\n", e.category(), e),
        }
    }
}

fn about_text() -> String {
    format!(
        "orange console v{}\nA client for the orange database server. SQL is executed server-side;\nthis console only submits text and shows what comes back.\n",
        env!("CARGO_PKG_VERSION")
    )
}

async fn write_out<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    output
        .write_all(text.as_bytes())
        .await
        .map_err(|e| OrangeError::io(format!("Failed to write output: {e}")))?;
    output
        .flush()
        .await
        .map_err(|e| OrangeError::io(format!("Failed to write output: {e}")))
}
