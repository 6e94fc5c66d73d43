//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the local (working directory) config
pub const LOCAL_CONFIG_FILE: &str = "mtrack.yaml";

/// Default database file name inside the platform data directory
pub const DEFAULT_DATABASE_FILE: &str = "mtrack.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("could not determine a data directory; set MTRACK_DATABASE or pass --database")]
    NoDataDir,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("unknown log format '{}', use text or json", s)),
        }
    }
}

/// Where workflow notifications go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatcherKind {
    /// Durable SQLite outbox next to the records
    #[default]
    Outbox,
    /// Log each task and drop it
    Log,
}

impl std::str::FromStr for DispatcherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "outbox" => Ok(DispatcherKind::Outbox),
            "log" => Ok(DispatcherKind::Log),
            _ => Err(format!("unknown dispatcher '{}', use outbox or log", s)),
        }
    }
}

/// mtrack configuration with layered hierarchy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// SQLite database holding records and the outbox
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Default tracing filter (e.g. "warn", "mtrack=debug")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<LogFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatcher: Option<DispatcherKind>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Result<Self, ConfigError> {
        let global = Self::global_config_path();
        Self::load_from(
            global.as_deref(),
            Some(Path::new(LOCAL_CONFIG_FILE)),
            |key| std::env::var(key).ok(),
        )
    }

    /// Load from explicit file locations and an environment lookup
    pub fn load_from<F>(
        global: Option<&Path>,
        local: Option<&Path>,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 1. Built-in defaults (resolved lazily by the accessors)
        let mut config = Config::default();

        // 2. Global user config (~/.config/mtrack/config.yaml)
        if let Some(path) = global {
            if let Some(global) = Self::read_file(path)? {
                config.merge(global);
            }
        }

        // 3. Local config (./mtrack.yaml)
        if let Some(path) = local {
            if let Some(local) = Self::read_file(path)? {
                config.merge(local);
            }
        }

        // 4. Environment variables
        if let Some(database) = env("MTRACK_DATABASE").filter(|v| !v.trim().is_empty()) {
            config.database = Some(PathBuf::from(database));
        }
        if let Some(level) = env("MTRACK_LOG_LEVEL").filter(|v| !v.trim().is_empty()) {
            config.log_level = Some(level);
        }
        if let Some(format) = env("MTRACK_LOG_FORMAT").filter(|v| !v.trim().is_empty()) {
            config.log_format = Some(format.parse().map_err(|message| {
                ConfigError::InvalidValue {
                    key: "MTRACK_LOG_FORMAT",
                    message,
                }
            })?);
        }

        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Option<Config>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(None);
        }
        serde_yml::from_str::<Config>(&contents)
            .map(Some)
            .map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mtrack")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        if other.log_format.is_some() {
            self.log_format = other.log_format;
        }
        if other.dispatcher.is_some() {
            self.dispatcher = other.dispatcher;
        }
    }

    /// The database path, falling back to the platform data directory
    pub fn database(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref path) = self.database {
            return Ok(path.clone());
        }
        directories::ProjectDirs::from("", "", "mtrack")
            .map(|dirs| dirs.data_dir().join(DEFAULT_DATABASE_FILE))
            .ok_or(ConfigError::NoDataDir)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_default()
    }

    pub fn dispatcher(&self) -> DispatcherKind {
        self.dispatcher.unwrap_or_default()
    }
}
