use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::{League, PriceDomain};
use crate::infra::{cache::DEFAULT_TTL, poe_ninja::DEFAULT_BASE_URL, source::DataSourceMode};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "DustValueScanner";
const APP_NAME: &str = "DustValueScanner";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// An environment override that could not be parsed and was skipped.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("ignoring invalid {key}={value:?}")]
pub struct RejectedOverride {
    pub key: &'static str,
    pub value: String,
}

/// Result of [`AppConfig::load`]. Problems are collected rather than logged
/// because the subscriber is only installed once the config is known.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub file_error: Option<ConfigError>,
    pub rejected: Vec<RejectedOverride>,
}

impl LoadedConfig {
    /// Logs every collected problem; call after [`LoggingConfig::init`].
    pub fn report(&self) {
        if let Some(err) = &self.file_error {
            tracing::warn!(%err, "ignoring settings file, using defaults");
        }
        for rejected in &self.rejected {
            tracing::warn!(key = rejected.key, value = %rejected.value, "{rejected}");
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl LoggingConfig {
    /// Installs the global subscriber. `RUST_LOG` wins over `level`.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        fmt().with_env_filter(filter).init();
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

/// Read-only application settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_source: DataSourceMode,
    pub default_league: League,
    pub cache_ttl_secs: u64,
    pub price_domain: PriceDomain,
    pub poe_ninja_base_url: String,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_source: DataSourceMode::default(),
            default_league: League::default(),
            cache_ttl_secs: DEFAULT_TTL.as_secs(),
            price_domain: PriceDomain::default(),
            poe_ninja_base_url: DEFAULT_BASE_URL.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Settings file, then `DUST_*` environment overrides. A broken file is
    /// replaced by the defaults.
    pub fn load() -> LoadedConfig {
        let (mut config, file_error) = match settings_path() {
            Some(path) if path.exists() => match Self::from_file(&path) {
                Ok(config) => (config, None),
                Err(err) => (Self::default(), Some(err)),
            },
            _ => (Self::default(), None),
        };
        let rejected = config.apply_overrides(|key| std::env::var(key).ok());
        LoadedConfig {
            config,
            file_error,
            rejected,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Price domain bounds are validated while deserializing.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(SETTINGS_FILE),
            source,
        })
    }

    /// Applies parseable overrides and returns the ones that were skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Vec<RejectedOverride>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rejected = Vec::new();
        let mut reject = |key: &'static str, value: String| {
            rejected.push(RejectedOverride { key, value });
        };

        if let Some(raw) = lookup("DUST_DATA_SOURCE") {
            match raw.parse() {
                Ok(mode) => self.data_source = mode,
                Err(_) => reject("DUST_DATA_SOURCE", raw),
            }
        }
        if let Some(raw) = lookup("DUST_LEAGUE") {
            match raw.parse() {
                Ok(league) => self.default_league = league,
                Err(_) => reject("DUST_LEAGUE", raw),
            }
        }
        if let Some(raw) = lookup("DUST_CACHE_TTL_SECS") {
            match raw.trim().parse() {
                Ok(secs) => self.cache_ttl_secs = secs,
                Err(_) => reject("DUST_CACHE_TTL_SECS", raw),
            }
        }
        if let Some(raw) = lookup("DUST_POE_NINJA_URL") {
            self.poe_ninja_base_url = raw;
        }

        rejected
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}
