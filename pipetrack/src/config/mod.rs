//! Configuration for the `pipetrack` binary.
//!
//! Layered, highest priority first:
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`<config_dir>/pipetrack/config.toml`)
//! 4. Compiled defaults
//!
//! A missing default config file is not an error. An explicit `--config`
//! path that doesn't exist is.

use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};

use pipetrack_proto::DEFAULT_PAGE_SIZE;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    api: ApiFileConfig,
    session: SessionFileConfig,
    ui: UiFileConfig,
}

/// `[api]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ApiFileConfig {
    base_url: Option<String>,
}

/// `[session]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct SessionFileConfig {
    path: Option<PathBuf>,
}

/// `[ui]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    page_size: Option<u32>,
    timestamp_format: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Fully resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin; API paths are joined onto it.
    pub api_url: String,
    /// Session file. `None` keeps the session in memory only.
    pub session_path: Option<PathBuf>,
    /// Default `limit` for list commands.
    pub page_size: u32,
    /// Timestamp display format string (chrono).
    pub timestamp_format: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_path: default_session_path(),
            page_size: DEFAULT_PAGE_SIZE,
            timestamp_format: "%Y-%m-%d %H:%M".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read,
    /// or if any config file present cannot be parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Priority: CLI > file > default.
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            api_url: cli
                .api_url
                .clone()
                .or_else(|| file.api.base_url.clone())
                .unwrap_or(defaults.api_url),
            session_path: cli
                .session_file
                .clone()
                .or_else(|| file.session.path.clone())
                .or(defaults.session_path),
            page_size: file
                .ui
                .page_size
                .filter(|&size| size > 0)
                .unwrap_or(defaults.page_size),
            timestamp_format: cli
                .timestamp_format
                .clone()
                .or_else(|| file.ui.timestamp_format.clone())
                .filter(|format| {
                    let valid = is_valid_timestamp_format(format);
                    if !valid {
                        tracing::warn!(%format, "invalid timestamp format; using default");
                    }
                    valid
                })
                .unwrap_or(defaults.timestamp_format),
        }
    }
}

/// Global options, shared by every subcommand.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct CliArgs {
    /// Backend origin, e.g. `http://localhost:8080`.
    #[arg(long, global = true, env = "PIPETRACK_API_URL")]
    pub api_url: Option<String>,

    /// Path to config file (default: `<config_dir>/pipetrack/config.toml`).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Where the session token is kept between runs.
    #[arg(long, global = true, env = "PIPETRACK_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Timestamp display format (chrono format string).
    #[arg(long, global = true)]
    pub timestamp_format: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn", env = "PIPETRACK_LOG")]
    pub log_level: String,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// `true` if chrono understands every specifier in `format`.
#[must_use]
pub fn is_valid_timestamp_format(format: &str) -> bool {
    StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

fn default_session_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("pipetrack").join("session.json"))
}

/// If `explicit_path` is `Some`, the file must exist. Otherwise the default
/// path is tried and a missing file yields an empty config.
fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("pipetrack").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
