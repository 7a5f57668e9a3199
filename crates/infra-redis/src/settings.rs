// Redis Settings (read once at startup)

use std::time::Duration;

use config::{Config, ConfigError, Environment};
use listq_core::domain::ConnectionConfig;
use listq_core::error::{QueueError, Result};

/// Key holding the connection URL (env: REDIS_URL)
pub const REDIS_URL_KEY: &str = "redis_url";

/// Key holding the optional timeout in seconds (env: QUEUE_REDIS_TIMEOUT)
pub const TIMEOUT_KEY: &str = "queue_redis_timeout";

/// Raw settings before URL decomposition
#[derive(Debug, Clone, PartialEq)]
pub struct RedisSettings {
    pub url: String,
    /// Applied to connect and to every command response, blocking reads
    /// included
    pub timeout: Option<Duration>,
}

impl RedisSettings {
    /// Load from process environment
    ///
    /// # Errors
    /// `QueueError::InvalidBackend` when REDIS_URL is missing or the timeout
    /// is not a number of seconds.
    pub fn from_env() -> Result<Self> {
        let config = Config::builder()
            .add_source(Environment::default())
            .build()
            .map_err(|e| QueueError::InvalidBackend(format!("Failed to read environment: {}", e)))?;

        Self::from_config(&config)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let url = match config.get_string(REDIS_URL_KEY) {
            Ok(url) if !url.trim().is_empty() => url,
            Ok(_) | Err(ConfigError::NotFound(_)) => {
                return Err(QueueError::InvalidBackend("REDIS_URL not set.".to_string()))
            }
            Err(e) => return Err(QueueError::InvalidBackend(e.to_string())),
        };

        let timeout = match config.get_string(TIMEOUT_KEY) {
            Ok(raw) => parse_timeout(&raw)?,
            Err(ConfigError::NotFound(_)) => None,
            Err(e) => return Err(QueueError::InvalidBackend(e.to_string())),
        };

        Ok(Self { url, timeout })
    }

    /// Decompose the URL into connection parameters
    pub fn connection_config(&self) -> Result<ConnectionConfig> {
        Ok(ConnectionConfig::parse(&self.url)?.with_timeout(self.timeout))
    }
}

/// Empty or zero means "no timeout"
fn parse_timeout(raw: &str) -> Result<Option<Duration>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let invalid = || {
        QueueError::InvalidBackend(format!(
            "QUEUE_REDIS_TIMEOUT should be a positive number of seconds, got '{}'",
            raw
        ))
    };

    match raw.parse::<f64>() {
        Ok(secs) if secs == 0.0 => Ok(None),
        // Rejects negative, NaN and values too large for a Duration
        Ok(secs) => Duration::try_from_secs_f64(secs)
            .map(Some)
            .map_err(|_| invalid()),
        Err(_) => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(pairs: &[(&str, &str)]) -> Config {
        let mut builder = Config::builder();
        for (key, value) in pairs {
            builder = builder.set_override(*key, *value).unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_missing_url_is_fatal() {
        let err = RedisSettings::from_config(&config_with(&[])).unwrap_err();
        assert_eq!(err, QueueError::InvalidBackend("REDIS_URL not set.".into()));

        let err = RedisSettings::from_config(&config_with(&[(REDIS_URL_KEY, "  ")])).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_url_and_timeout() {
        let settings = RedisSettings::from_config(&config_with(&[
            (REDIS_URL_KEY, "redis://cache:6380/3"),
            (TIMEOUT_KEY, "2.5"),
        ]))
        .unwrap();

        assert_eq!(settings.timeout, Some(Duration::from_millis(2500)));

        let config = settings.connection_config().unwrap();
        assert_eq!(config.host, "cache");
        assert_eq!(config.port, 6380);
        assert_eq!(config.database_index, 3);
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_timeout_is_optional() {
        let settings =
            RedisSettings::from_config(&config_with(&[(REDIS_URL_KEY, "redis://localhost:6379")]))
                .unwrap();
        assert_eq!(settings.timeout, None);
    }

    #[test]
    fn test_bad_timeout_is_fatal() {
        let err = RedisSettings::from_config(&config_with(&[
            (REDIS_URL_KEY, "redis://localhost:6379"),
            (TIMEOUT_KEY, "soon"),
        ]))
        .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("").unwrap(), None);
        assert_eq!(parse_timeout("0").unwrap(), None);
        assert_eq!(parse_timeout("0.25").unwrap(), Some(Duration::from_millis(250)));
        assert!(parse_timeout("-1").is_err());
        assert!(parse_timeout("NaN").is_err());
        assert!(parse_timeout("inf").is_err());
        assert!(parse_timeout("1e30").unwrap_err().is_fatal());
    }

    #[test]
    fn test_invalid_url_surfaces_on_decomposition() {
        let settings =
            RedisSettings::from_config(&config_with(&[(REDIS_URL_KEY, "redis://localhost:port/0")]))
                .unwrap();
        assert!(settings.connection_config().unwrap_err().is_fatal());
    }
}
