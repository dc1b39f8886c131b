//! Configuration management.
//!
//! Configuration comes from an optional TOML file, then environment
//! overrides. Logging and metrics sections are kept as raw settings and
//! resolved by [`crate::observability`], which applies its own env overrides.

use crate::services::SeedHttpConfig;
use crate::storage::{DEFAULT_STORAGE_KEY, default_data_dir};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location of the bootstrap document.
pub const DEFAULT_SEED_LOCATION: &str = "data/links.json";

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "LINKDECK_CONFIG_PATH";

/// Main configuration for linkdeck.
#[derive(Debug, Clone)]
pub struct LinkdeckConfig {
    /// Directory holding the filesystem durable store.
    pub data_dir: PathBuf,
    /// Durable key the collection is stored under.
    pub storage_key: String,
    /// Seed document settings.
    pub seed: SeedSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Metrics settings.
    pub metrics: MetricsSettings,
}

/// Where and how to fetch the bootstrap document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSettings {
    /// URL (`http://`, `https://`) or file path.
    pub location: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
}

impl Default for SeedSettings {
    fn default() -> Self {
        let http = SeedHttpConfig::default();
        Self {
            location: DEFAULT_SEED_LOCATION.to_string(),
            timeout_ms: http.timeout_ms,
            connect_timeout_ms: http.connect_timeout_ms,
        }
    }
}

impl SeedSettings {
    /// Returns the HTTP timeouts for the seed client.
    #[must_use]
    pub const fn http_config(&self) -> SeedHttpConfig {
        SeedHttpConfig {
            timeout_ms: self.timeout_ms,
            connect_timeout_ms: self.connect_timeout_ms,
        }
    }
}

/// Logging section of the config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `linkdeck=debug`.
    pub level: Option<String>,
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

/// Metrics section of the config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct MetricsSettings {
    /// Whether to install the Prometheus recorder.
    pub enabled: Option<bool>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Data directory.
    pub data_dir: Option<String>,
    /// Storage key.
    pub storage_key: Option<String>,
    /// Seed section.
    pub seed: Option<ConfigFileSeed>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
    /// Metrics section.
    pub metrics: Option<MetricsSettings>,
}

/// Seed section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileSeed {
    /// URL or path.
    pub location: Option<String>,
    /// Request timeout.
    pub timeout_ms: Option<u64>,
    /// Connect timeout.
    pub connect_timeout_ms: Option<u64>,
}

impl Default for LinkdeckConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed: SeedSettings::default(),
            logging: LoggingSettings::default(),
            metrics: MetricsSettings::default(),
        }
    }
}

impl LinkdeckConfig {
    /// Resolves configuration for a process.
    ///
    /// Uses `explicit` if given, else the file named by
    /// `LINKDECK_CONFIG_PATH`, else [`LinkdeckConfig::load_default`].
    /// Environment overrides are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let mut config = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::load_default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid config TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/linkdeck/` on macOS)
    /// 2. XDG config dir (`~/.config/linkdeck/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join("linkdeck").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("linkdeck")
                .join("config.toml"),
        ];

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
                },
            }
        }

        Self::default()
    }

    /// Applies `LINKDECK_*` environment overrides for storage and seed.
    pub fn apply_env_overrides(&mut self) {
        if let Some(dir) = non_empty_env("LINKDECK_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(key) = non_empty_env("LINKDECK_STORAGE_KEY") {
            self.storage_key = key;
        }
        if let Some(location) = non_empty_env("LINKDECK_SEED") {
            self.seed.location = location;
        }
        if let Some(timeout) =
            non_empty_env("LINKDECK_SEED_TIMEOUT_MS").and_then(|v| v.parse::<u64>().ok())
        {
            self.seed.timeout_ms = timeout;
        }
    }

    /// Converts a `ConfigFile` to `LinkdeckConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(key) = file.storage_key {
            config.storage_key = key;
        }
        if let Some(seed) = file.seed {
            if let Some(location) = seed.location {
                config.seed.location = location;
            }
            if let Some(v) = seed.timeout_ms {
                config.seed.timeout_ms = v;
            }
            if let Some(v) = seed.connect_timeout_ms {
                config.seed.connect_timeout_ms = v;
            }
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }
        if let Some(metrics) = file.metrics {
            config.metrics = metrics;
        }

        config
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Sets the seed location.
    #[must_use]
    pub fn with_seed_location(mut self, location: impl Into<String>) -> Self {
        self.seed.location = location.into();
        self
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
