//! `pipetrack`: command-line client for the interview pipeline tracker.
//!
//! ```bash
//! pipetrack --api-url http://localhost:8080 login --email me@example.com
//! pipetrack tasks list --status in-progress
//! pipetrack tasks show 12
//! ```
//!
//! Configuration via CLI flags, environment variables, or config file
//! (`<config_dir>/pipetrack/config.toml`).

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use pipetrack::api::ApiClient;
use pipetrack::cli::{self, Cli, Context};
use pipetrack::config::ClientConfig;
use pipetrack::session::{FileStore, SessionStore};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ClientConfig::load(&cli.global) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    let _log_guard = init_logging(&cli.global.log_level, cli.global.log_file.as_deref());

    let session = match config.session_path.as_deref().map(FileStore::open) {
        Some(Ok(store)) => SessionStore::new(store),
        Some(Err(e)) => {
            eprintln!("Warning: {e}; the session will not persist");
            SessionStore::in_memory()
        }
        None => {
            tracing::warn!("no data directory; session will not persist");
            SessionStore::in_memory()
        }
    };

    let client = match ApiClient::new(&config.api_url, session) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!(api_url = %config.api_url, "pipetrack starting");

    let ctx = Context::new(&client, config);
    let mut stdout = io::stdout().lock();
    let result = cli::run(&ctx, cli.command, &mut stdout).await;
    let _ = stdout.flush();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the global subscriber.
///
/// Logs go to stderr unless `file_path` is given, in which case they are
/// written through a non-blocking appender. The returned [`WorkerGuard`]
/// must be held until shutdown so buffered entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let Some((log_dir, file_name)) = file_path.and_then(log_target) else {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(env_filter)
            .init();
        if let Some(path) = file_path {
            tracing::warn!(
                path = %path.display(),
                "log file path has no file name; logging to stderr"
            );
        }
        return None;
    };

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Splits a log file path into the directory and file name the appender needs.
fn log_target(path: &Path) -> Option<(PathBuf, String)> {
    let file_name = path.file_name()?.to_str()?.to_string();
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Some((dir.to_path_buf(), file_name))
}
