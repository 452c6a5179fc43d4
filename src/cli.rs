//! Command-line argument parsing for the orange console.

use crate::config::{Config, ServerConfig, SERVER_URL_ENV};
use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Submit SQL to an orange query server and print the results.
#[derive(Parser, Debug)]
#[command(name = "orange")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Execute the given SQL text and exit
    #[arg(short = 'e', long, value_name = "SQL", conflicts_with = "file")]
    pub execute: Option<String>,

    /// Execute the contents of a file and exit (use "-" for stdin)
    #[arg(short = 'f', long, value_name = "PATH")]
    pub file: Option<String>,

    /// Query server base URL (e.g., http://localhost:8080)
    #[arg(short = 's', long, value_name = "URL", env = SERVER_URL_ENV)]
    pub server: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format: text or json
    #[arg(short = 'o', long, value_name = "FORMAT", default_value = "text")]
    pub output: String,
}

/// Where the SQL for a one-shot run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlSource {
    /// Inline text from `--execute`.
    Inline(String),
    /// A file path from `--file`.
    File(PathBuf),
    /// Standard input (`--file -`).
    Stdin,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Returns the one-shot SQL source, or `None` for an interactive session.
    pub fn sql_source(&self) -> Option<SqlSource> {
        if let Some(sql) = &self.execute {
            return Some(SqlSource::Inline(sql.clone()));
        }
        match self.file.as_deref() {
            Some("-") => Some(SqlSource::Stdin),
            Some(path) => Some(SqlSource::File(PathBuf::from(path))),
            None => None,
        }
    }

    /// Parses the output format from the --output argument.
    pub fn parse_output_format(&self) -> std::result::Result<OutputFormat, String> {
        self.output.parse()
    }

    /// Resolves the server settings.
    ///
    /// Precedence: CLI flag (or `ORANGE_SERVER_URL`), then config file, then
    /// the built-in default.
    pub fn resolve_server(&self, config: &Config) -> ServerConfig {
        let mut server = config.server.clone();
        if let Some(url) = &self.server {
            server.url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            server.timeout_secs = Some(timeout);
        }
        server
    }
}
