//! Configuration loading and resolution
//!
//! Every setting resolves through the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`SYNTHDB_*`)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default bind host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port
pub const DEFAULT_PORT: u16 = 5730;

/// Default sender address for API key mails
pub const DEFAULT_MAIL_FROM: &str = "catalog@synthdb.local";

/// Raw TOML configuration file contents
///
/// All fields optional; missing fields fall through to the next tier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub mail_endpoint: Option<String>,
    pub mail_from: Option<String>,
}

/// Command-line overrides passed down from the service binary
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// HTTP endpoint of the transactional mail sender (None disables dispatch)
    pub mail_endpoint: Option<String>,
    pub mail_from: String,
}

impl ServiceConfig {
    /// Resolve the full configuration from CLI overrides, environment,
    /// TOML file, and compiled defaults (in that order).
    pub fn resolve(overrides: &Overrides) -> Self {
        let toml_config = overrides
            .config_file
            .as_deref()
            .map(load_toml_config)
            .or_else(|| find_config_file().map(|p| load_toml_config(&p)))
            .transpose()
            .unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config file: {}", e);
                None
            })
            .unwrap_or_default();

        Self::from_tiers(overrides, &toml_config, |name| std::env::var(name).ok())
    }

    /// Tier merge, parameterized over the environment lookup for testability
    fn from_tiers(
        overrides: &Overrides,
        toml_config: &TomlConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let host = overrides
            .host
            .clone()
            .or_else(|| env("SYNTHDB_HOST"))
            .or_else(|| toml_config.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = overrides
            .port
            .or_else(|| env("SYNTHDB_PORT").and_then(|v| v.parse().ok()))
            .or(toml_config.port)
            .unwrap_or(DEFAULT_PORT);

        let database_path = overrides
            .database
            .clone()
            .or_else(|| env("SYNTHDB_DATABASE").map(PathBuf::from))
            .or_else(|| toml_config.database_path.clone())
            .unwrap_or_else(default_database_path);

        let mail_endpoint = env("SYNTHDB_MAIL_ENDPOINT")
            .or_else(|| toml_config.mail_endpoint.clone());

        let mail_from = env("SYNTHDB_MAIL_FROM")
            .or_else(|| toml_config.mail_from.clone())
            .unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string());

        Self {
            host,
            port,
            database_path,
            mail_endpoint,
            mail_from,
        }
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Locate the config file for the platform
///
/// Linux: `~/.config/synthdb/config.toml`, then `/etc/synthdb/config.toml`.
/// Other platforms: the user config directory only.
pub fn find_config_file() -> Option<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("synthdb").join("config.toml")) {
        if path.exists() {
            return Some(path);
        }
    }
    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/synthdb/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }
    None
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("synthdb"))
        .unwrap_or_else(|| PathBuf::from("./synthdb_data"))
        .join("synthdb.db")
}
