//! Environment-driven configuration.
//!
//! | Variable | Default |
//! |---|---|
//! | `ANES_BLOCKLIST_PATH` | none (built-in list only) |
//! | `ANES_API_BASE_URL` | `http://localhost:8080` |
//! | `ANES_BREACH_TIMEOUT_MS` | `3000` |
//! | `ANES_SESSION_PATH` | `./.anes/session.json` |

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::blocklist::{get_blocklist_path, Blocklist, BlocklistError};

pub const API_BASE_URL_ENV: &str = "ANES_API_BASE_URL";
pub const BREACH_TIMEOUT_ENV: &str = "ANES_BREACH_TIMEOUT_MS";
pub const SESSION_PATH_ENV: &str = "ANES_SESSION_PATH";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_BREACH_TIMEOUT: Duration = Duration::from_millis(3000);
pub const DEFAULT_SESSION_PATH: &str = "./.anes/session.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error(transparent)]
    Blocklist(#[from] BlocklistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub blocklist_path: Option<PathBuf>,
    pub breach_timeout: Duration,
    pub session_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            blocklist_path: None,
            breach_timeout: DEFAULT_BREACH_TIMEOUT,
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
        }
    }
}

impl Config {
    /// Reads every setting from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let breach_timeout = match std::env::var(BREACH_TIMEOUT_ENV) {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidNumber {
                    var: BREACH_TIMEOUT_ENV,
                    value,
                })?,
            Err(_) => defaults.breach_timeout,
        };

        Ok(Self {
            api_base_url: std::env::var(API_BASE_URL_ENV).unwrap_or(defaults.api_base_url),
            blocklist_path: get_blocklist_path(),
            breach_timeout,
            session_path: std::env::var(SESSION_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.session_path),
        })
    }

    /// Built-in blocklist, extended with the configured file.
    pub fn load_blocklist(&self) -> Result<Blocklist, ConfigError> {
        let mut list = Blocklist::builtin();
        if let Some(path) = &self.blocklist_path {
            list.extend_from_path(path)?;
        }
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocklist::BLOCKLIST_PATH_ENV;
    use crate::test_env::{remove_env, set_env};
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn clear_all() {
        for key in [API_BASE_URL_ENV, BREACH_TIMEOUT_ENV, SESSION_PATH_ENV, BLOCKLIST_PATH_ENV] {
            remove_env(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        clear_all();
        assert_eq!(Config::from_env().unwrap(), Config::default());
    }

    #[test]
    #[serial]
    fn test_reads_overrides() {
        clear_all();
        set_env(API_BASE_URL_ENV, "https://api.anes.app");
        set_env(BREACH_TIMEOUT_ENV, " 750 ");
        set_env(SESSION_PATH_ENV, "/tmp/anes/session.json");

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_base_url, "https://api.anes.app");
        assert_eq!(config.breach_timeout, Duration::from_millis(750));
        assert_eq!(config.session_path, PathBuf::from("/tmp/anes/session.json"));

        clear_all();
    }

    #[test]
    #[serial]
    fn test_invalid_timeout() {
        clear_all();
        set_env(BREACH_TIMEOUT_ENV, "soon");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidNumber { var: BREACH_TIMEOUT_ENV, .. })
        ));
        clear_all();
    }

    #[test]
    fn test_load_blocklist_with_extra_file() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(temp_file, "fitfam").expect("Failed to write");

        let config = Config {
            blocklist_path: Some(temp_file.path().to_path_buf()),
            ..Config::default()
        };
        let list = config.load_blocklist().unwrap();
        assert!(list.contains("FitFam"));
        assert!(list.contains("password"));
    }

    #[test]
    #[serial]
    fn test_blocklist_path_from_env() {
        clear_all();
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(temp_file, "anes-secret").expect("Failed to write");
        set_env(BLOCKLIST_PATH_ENV, temp_file.path().to_str().unwrap());

        let list = Config::from_env().unwrap().load_blocklist().unwrap();
        assert!(list.contains("anes-secret"));
        assert!(list.contains("letmein"));

        clear_all();
    }

    #[test]
    fn test_load_blocklist_without_file_is_builtin() {
        assert_eq!(Config::default().load_blocklist().unwrap(), Blocklist::builtin());
    }

    #[test]
    fn test_load_blocklist_missing_file() {
        let config = Config {
            blocklist_path: Some(PathBuf::from("/nonexistent/anes.txt")),
            ..Config::default()
        };
        assert!(matches!(config.load_blocklist(), Err(ConfigError::Blocklist(_))));
    }
}
