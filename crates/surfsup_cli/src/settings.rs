//! Layered runtime configuration.
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults.
//! 2. A TOML file (`--config <path>`, or `surfsup.toml` when present).
//! 3. `SURFSUP__<SECTION>__<KEY>` environment variables.

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use surfsup_core::default_log_level;

const DEFAULT_CONFIG_FILE: &str = "surfsup";
const ENV_PREFIX: &str = "SURFSUP";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
    pub api: ApiSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    /// Absolute directory for rolling log files; stderr when unset.
    #[serde(default)]
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub expose_error_details: bool,
}

/// Loads settings from defaults, an optional file, and the environment.
///
/// # Errors
/// - Returns an error when an explicit `config_path` does not exist.
/// - Returns an error when a value cannot be deserialized into its field.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match config_path {
        Some(path) => File::from(path.to_path_buf()).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };
    build_settings(Some(file), Some(environment()))
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5000_i64)?
        .set_default("database.path", "Resources/hawaii.sqlite")?
        .set_default("logging.level", default_log_level())?
        .set_default("api.expose_error_details", false)
}

fn build_settings<F>(
    file: Option<F>,
    environment: Option<Environment>,
) -> Result<Settings, ConfigError>
where
    F: config::Source + Send + Sync + 'static,
{
    let mut builder = defaults()?;
    if let Some(file) = file {
        builder = builder.add_source(file);
    }
    if let Some(environment) = environment {
        builder = builder.add_source(environment);
    }
    builder.build()?.try_deserialize()
}
