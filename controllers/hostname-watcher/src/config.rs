//! Process configuration from environment variables.
//!
//! Everything is resolved once at startup. [`Config::from_lookup`] takes the
//! variable lookup as a function so tests do not touch the process
//! environment.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::Level;

use crate::error::ControllerError;
use crate::logging;

/// Server-side watch timeouts must stay below this many seconds.
const MAX_WATCH_TIMEOUT_SECS: u32 = 295;

const DEFAULT_BACKOFF_MIN_MS: u64 = 500;
const DEFAULT_BACKOFF_MAX_MS: u64 = 30_000;

/// What to do once an established watch stops delivering events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconnectPolicy {
    /// Resume from the last seen version, re-listing when that is no longer possible
    Relist,
    /// Stop with an error
    Terminate,
}

impl FromStr for ReconnectPolicy {
    type Err = ControllerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relist" => Ok(ReconnectPolicy::Relist),
            "terminate" => Ok(ReconnectPolicy::Terminate),
            other => Err(ControllerError::InvalidConfig(format!(
                "WATCH_RECONNECT must be 'relist' or 'terminate', got '{other}'"
            ))),
        }
    }
}

/// Hostname Watcher configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: Level,
    /// Explicit kubeconfig; in-cluster identity when `None`
    pub kubeconfig: Option<PathBuf>,
    /// Namespace filter; all namespaces when `None`
    pub namespace: Option<String>,
    pub reconnect: ReconnectPolicy,
    pub watch_timeout_secs: Option<u32>,
    pub backoff_min_ms: u64,
    pub backoff_max_ms: u64,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ControllerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = logging::parse_log_level(lookup("LOG_LEVEL").as_deref());

        let kubeconfig = lookup("KUBECONFIG")
            .and_then(|paths| std::env::split_paths(&paths).next())
            .filter(|path| !path.as_os_str().is_empty());

        let namespace = lookup("WATCH_NAMESPACE")
            .map(|ns| ns.trim().to_string())
            .filter(|ns| !ns.is_empty());

        let reconnect = match lookup("WATCH_RECONNECT") {
            Some(value) => value.parse()?,
            None => ReconnectPolicy::Relist,
        };

        let watch_timeout_secs = parse_optional::<u32>(&lookup, "WATCH_TIMEOUT_SECONDS")?;
        if let Some(timeout) = watch_timeout_secs {
            if timeout == 0 || timeout >= MAX_WATCH_TIMEOUT_SECS {
                return Err(ControllerError::InvalidConfig(format!(
                    "WATCH_TIMEOUT_SECONDS must be between 1 and {}, got {timeout}",
                    MAX_WATCH_TIMEOUT_SECS - 1
                )));
            }
        }

        let backoff_min_ms =
            parse_optional::<u64>(&lookup, "RETRY_BACKOFF_MIN_MS")?.unwrap_or(DEFAULT_BACKOFF_MIN_MS);
        let backoff_max_ms =
            parse_optional::<u64>(&lookup, "RETRY_BACKOFF_MAX_MS")?.unwrap_or(DEFAULT_BACKOFF_MAX_MS);
        if backoff_max_ms < backoff_min_ms {
            return Err(ControllerError::InvalidConfig(format!(
                "RETRY_BACKOFF_MAX_MS ({backoff_max_ms}) is below RETRY_BACKOFF_MIN_MS ({backoff_min_ms})"
            )));
        }

        Ok(Self {
            log_level,
            kubeconfig,
            namespace,
            reconnect,
            watch_timeout_secs,
            backoff_min_ms,
            backoff_max_ms,
        })
    }
}

fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ControllerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|value| {
            value.trim().parse::<T>().map_err(|e| {
                ControllerError::InvalidConfig(format!("{key} has invalid value '{value}': {e}"))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ControllerError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.kubeconfig, None);
        assert_eq!(config.namespace, None);
        assert_eq!(config.reconnect, ReconnectPolicy::Relist);
        assert_eq!(config.watch_timeout_secs, None);
        assert_eq!(config.backoff_min_ms, 500);
        assert_eq!(config.backoff_max_ms, 30_000);
    }

    #[test]
    fn test_explicit_values() {
        let config = load(&[
            ("LOG_LEVEL", "warn"),
            ("KUBECONFIG", "/home/ops/.kube/config"),
            ("WATCH_NAMESPACE", "edge"),
            ("WATCH_RECONNECT", "Terminate"),
            ("WATCH_TIMEOUT_SECONDS", "120"),
            ("RETRY_BACKOFF_MIN_MS", "100"),
            ("RETRY_BACKOFF_MAX_MS", "1000"),
        ])
        .unwrap();

        assert_eq!(config.log_level, Level::WARN);
        assert_eq!(config.kubeconfig, Some(PathBuf::from("/home/ops/.kube/config")));
        assert_eq!(config.namespace.as_deref(), Some("edge"));
        assert_eq!(config.reconnect, ReconnectPolicy::Terminate);
        assert_eq!(config.watch_timeout_secs, Some(120));
        assert_eq!(config.backoff_min_ms, 100);
        assert_eq!(config.backoff_max_ms, 1000);
    }

    #[test]
    fn test_unrecognized_log_level_falls_back_to_debug() {
        let config = load(&[("LOG_LEVEL", "chatty")]).unwrap();
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[cfg(unix)]
    #[test]
    fn test_kubeconfig_path_list_uses_first_entry() {
        let config = load(&[("KUBECONFIG", "/a/config:/b/config")]).unwrap();
        assert_eq!(config.kubeconfig, Some(PathBuf::from("/a/config")));
    }

    #[test]
    fn test_empty_values_mean_unset() {
        let config = load(&[("KUBECONFIG", ""), ("WATCH_NAMESPACE", "  ")]).unwrap();
        assert_eq!(config.kubeconfig, None);
        assert_eq!(config.namespace, None);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            load(&[("WATCH_RECONNECT", "sometimes")]),
            Err(ControllerError::InvalidConfig(_))
        ));
        assert!(matches!(
            load(&[("WATCH_TIMEOUT_SECONDS", "soon")]),
            Err(ControllerError::InvalidConfig(_))
        ));
        assert!(matches!(
            load(&[("WATCH_TIMEOUT_SECONDS", "300")]),
            Err(ControllerError::InvalidConfig(_))
        ));
        assert!(matches!(
            load(&[("WATCH_TIMEOUT_SECONDS", "0")]),
            Err(ControllerError::InvalidConfig(_))
        ));
        assert!(matches!(
            load(&[("RETRY_BACKOFF_MIN_MS", "-1")]),
            Err(ControllerError::InvalidConfig(_))
        ));
        assert!(matches!(
            load(&[("RETRY_BACKOFF_MIN_MS", "5000"), ("RETRY_BACKOFF_MAX_MS", "10")]),
            Err(ControllerError::InvalidConfig(_))
        ));
    }
}
