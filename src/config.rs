//! Runtime configuration
//!
//! Read from the environment at startup.

use std::path::PathBuf;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const DATABASE_PATH_VAR: &str = "TRIFIT_DATABASE_PATH";
pub const LOG_VAR: &str = "TRIFIT_LOG";

/// Log directive used when neither `TRIFIT_LOG` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "trifit=info";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is set but empty")]
    Empty(&'static str),

    #[error("Invalid log filter {filter:?}: {reason}")]
    InvalidLogFilter { filter: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Read settings through `get` so tests never touch the process environment
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let database_path = match get(DATABASE_PATH_VAR) {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::Empty(DATABASE_PATH_VAR))
            }
            Some(path) => PathBuf::from(path),
            None => default_database_path(),
        };

        let log_filter = get(LOG_VAR)
            .or_else(|| get("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        EnvFilter::try_new(&log_filter).map_err(|e| ConfigError::InvalidLogFilter {
            filter: log_filter.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            database_path,
            log_filter,
        })
    }

    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    }
}

/// `<project>/data/trifit.db`, where the project root is found by walking up
/// from `target/{debug,release}` when running from a cargo build
pub fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("trifit.db");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::from_env_with(|_| None).unwrap();
        assert!(cfg.database_path.ends_with("data/trifit.db"));
        assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_reads_values() {
        let get = |k: &str| match k {
            DATABASE_PATH_VAR => Some("/tmp/t.db".into()),
            LOG_VAR => Some("trifit=debug".into()),
            "RUST_LOG" => Some("warn".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).unwrap();
        assert_eq!(cfg.database_path, PathBuf::from("/tmp/t.db"));
        assert_eq!(cfg.log_filter, "trifit=debug");
    }

    #[test]
    fn test_falls_back_to_rust_log() {
        let get = |k: &str| (k == "RUST_LOG").then(|| "trifit=trace".to_string());
        let cfg = Config::from_env_with(get).unwrap();
        assert_eq!(cfg.log_filter, "trifit=trace");
    }

    #[test]
    fn test_empty_database_path() {
        let get = |k: &str| (k == DATABASE_PATH_VAR).then(|| "  ".to_string());
        assert_eq!(
            Config::from_env_with(get),
            Err(ConfigError::Empty(DATABASE_PATH_VAR))
        );
    }

    #[test]
    fn test_invalid_log_filter() {
        let get = |k: &str| (k == LOG_VAR).then(|| "trifit=loud".to_string());
        assert!(matches!(
            Config::from_env_with(get),
            Err(ConfigError::InvalidLogFilter { .. })
        ));
    }
}
