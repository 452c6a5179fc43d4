//! orange console - submit SQL batches to an orange query server.

use orange_console::cli::{Cli, SqlSource};
use orange_console::config::Config;
use orange_console::error::{OrangeError, Result};
use orange_console::exec::ExecutionClient;
use orange_console::logging::{self, LogSink};
use orange_console::output::ResultFormatter;
use orange_console::session::Session;
use orange_console::state::AppState;
use tokio::io::{AsyncReadExt, BufReader};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();

    let sink = LogSink::for_run(cli.sql_source().is_some());
    if let Err(e) = logging::init(&sink) {
        eprintln!("Warning: logging disabled: {e}");
    }

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let format = cli.parse_output_format().map_err(OrangeError::config)?;

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let server = cli.resolve_server(&config);
    let client = ExecutionClient::new(&server)?;
    info!("Query endpoint: {}", client.endpoint());

    let formatter = ResultFormatter::new(format);

    match cli.sql_source() {
        Some(source) => {
            let sql = read_sql(&source).await?;
            let response = client.execute(&sql).await?;
            if response.has_errors() {
                warn!(
                    "{} of {} statements failed",
                    response.error_count(),
                    response.results.len()
                );
            }
            println!("{}", formatter.format(&response).trim_end());
            Ok(())
        }
        None => {
            let mut session = Session::new(&client, formatter, AppState::new());
            let mut stdout = tokio::io::stdout();
            session
                .run(BufReader::new(tokio::io::stdin()), &mut stdout)
                .await
        }
    }
}

/// Loads the SQL text for a one-shot run, untouched.
async fn read_sql(source: &SqlSource) -> Result<String> {
    match source {
        SqlSource::Inline(sql) => Ok(sql.clone()),
        SqlSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| OrangeError::io(format!("{}: {e}", path.display()))),
        SqlSource::Stdin => {
            let mut sql = String::new();
            tokio::io::stdin()
                .read_to_string(&mut sql)
                .await
                .map_err(|e| OrangeError::io(format!("Failed to read stdin: {e}")))?;
            Ok(sql)
        }
    }
}
