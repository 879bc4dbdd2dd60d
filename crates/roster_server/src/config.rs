//! Process configuration read from the environment.
//!
//! | Variable              | Default                 |
//! |-----------------------|-------------------------|
//! | `ROSTER_BIND_ADDR`    | `127.0.0.1:8000`        |
//! | `ROSTER_STORE_PATH`   | `participants.txt`      |
//! | `ROSTER_LOG_LEVEL`    | build-mode default      |
//! | `ROSTER_LOG_DIR`      | unset (log to stderr)   |
//! | `ROSTER_HTTP_WORKERS` | `2`                     |
//!
//! Blank values count as unset; unparsable numbers fall back to the default.

use roster_core::default_log_level;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_STORE_PATH: &str = "participants.txt";
pub const DEFAULT_HTTP_WORKERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub store_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub http_workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            log_level: default_log_level().to_string(),
            log_dir: None,
            http_workers: DEFAULT_HTTP_WORKERS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            bind_addr: read("ROSTER_BIND_ADDR").unwrap_or(defaults.bind_addr),
            store_path: read("ROSTER_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            log_level: read("ROSTER_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: read("ROSTER_LOG_DIR"),
            http_workers: read("ROSTER_HTTP_WORKERS")
                .and_then(|value| value.parse::<usize>().ok())
                .map(|value| value.max(1))
                .unwrap_or(defaults.http_workers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ServerConfig, DEFAULT_BIND_ADDR, DEFAULT_HTTP_WORKERS};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]), ServerConfig::default());
    }

    #[test]
    fn overrides_are_trimmed_and_applied() {
        let config = config_from(&[
            ("ROSTER_BIND_ADDR", " 0.0.0.0:9000 "),
            ("ROSTER_STORE_PATH", "/var/lib/roster/participants.txt"),
            ("ROSTER_LOG_LEVEL", "warn"),
            ("ROSTER_LOG_DIR", "/var/log/roster"),
            ("ROSTER_HTTP_WORKERS", "8"),
        ]);

        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(
            config.store_path,
            PathBuf::from("/var/lib/roster/participants.txt")
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/roster"));
        assert_eq!(config.http_workers, 8);
    }

    #[test]
    fn blank_and_invalid_values_fall_back() {
        let config = config_from(&[
            ("ROSTER_BIND_ADDR", "   "),
            ("ROSTER_LOG_DIR", ""),
            ("ROSTER_HTTP_WORKERS", "many"),
        ]);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.log_dir, None);
        assert_eq!(config.http_workers, DEFAULT_HTTP_WORKERS);

        let zero = config_from(&[("ROSTER_HTTP_WORKERS", "0")]);
        assert_eq!(zero.http_workers, 1);
    }
}
