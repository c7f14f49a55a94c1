//! Client configuration from the environment.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// How often the server is asked for new notifications.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);

/// Settings shared by the client and the terminal front-end.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the StaffSync server.
    pub url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    pub poll_interval: Duration,
    /// How long notifications stay on screen.
    pub toast_duration: Duration,
    /// `log` level name (`error` .. `trace`).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_URL).expect("default URL is valid"),
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            toast_duration: DEFAULT_TOAST_DURATION,
            log_level: "debug".to_string(),
        }
    }
}

impl Config {
    /// Load from process environment variables.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable lookup. Missing variables use defaults.
    ///
    /// | variable                       | default                 |
    /// |--------------------------------|-------------------------|
    /// | `STAFFSYNC_URL`                | `http://127.0.0.1:5000` |
    /// | `STAFFSYNC_TIMEOUT_SECS`       | `30`                    |
    /// | `STAFFSYNC_POLL_INTERVAL_SECS` | `30`                    |
    /// | `STAFFSYNC_TOAST_MS`           | `5000`                  |
    /// | `STAFFSYNC_LOG_LEVEL`          | `debug`                 |
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("STAFFSYNC_URL") {
            config.url = Url::parse(raw.trim()).map_err(|_| ConfigError::InvalidUrl(raw.clone()))?;
        }
        if let Some(secs) = parse_positive(&lookup, "STAFFSYNC_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_positive(&lookup, "STAFFSYNC_POLL_INTERVAL_SECS")? {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_positive(&lookup, "STAFFSYNC_TOAST_MS")? {
            config.toast_duration = Duration::from_millis(ms);
        }
        if let Some(level) = lookup("STAFFSYNC_LOG_LEVEL") {
            let level = level.trim().to_ascii_lowercase();
            if !matches!(
                level.as_str(),
                "off" | "error" | "warn" | "info" | "debug" | "trace"
            ) {
                return Err(ConfigError::invalid_value(
                    "STAFFSYNC_LOG_LEVEL",
                    level,
                    "expected off, error, warn, info, debug or trace",
                ));
            }
            config.log_level = level;
        }

        Ok(config)
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::invalid_value(var, raw, "must be greater than zero")),
        Ok(n) => Ok(Some(n)),
        Err(e) => Err(ConfigError::invalid_value(var, raw, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.url.as_str(), "http://127.0.0.1:5000/");
        assert_eq!(config.poll_interval, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STAFFSYNC_URL", "https://staff.example.com/app/"),
            ("STAFFSYNC_TIMEOUT_SECS", "5"),
            ("STAFFSYNC_POLL_INTERVAL_SECS", " 10 "),
            ("STAFFSYNC_TOAST_MS", "2500"),
            ("STAFFSYNC_LOG_LEVEL", "INFO"),
        ])
        .unwrap();
        assert_eq!(config.url.as_str(), "https://staff.example.com/app/");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.toast_duration, Duration::from_millis(2500));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("STAFFSYNC_URL", "not a url")]),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            load(&[("STAFFSYNC_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            load(&[("STAFFSYNC_TOAST_MS", "soon")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            load(&[("STAFFSYNC_LOG_LEVEL", "loud")]),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
