//! Application configuration management.

use std::time::Duration;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Data-entry wizard configuration.
    #[serde(default)]
    pub wizard: WizardConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Data-entry wizard configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WizardConfig {
    /// How long a final submit may wait on the record gateway.
    /// Zero disables the timeout.
    #[serde(default = "default_submit_timeout")]
    pub submit_timeout_secs: u64,
}

fn default_submit_timeout() -> u64 {
    30
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            submit_timeout_secs: default_submit_timeout(),
        }
    }
}

impl WizardConfig {
    /// Returns the submit timeout, or `None` when disabled.
    #[must_use]
    pub const fn submit_timeout(&self) -> Option<Duration> {
        if self.submit_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.submit_timeout_secs))
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Fallback filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "indicata=info,sea_orm=warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("INDICATA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("INDICATA__DATABASE__URL", Some("postgres://localhost/indicata_test")),
                ("INDICATA__WIZARD__SUBMIT_TIMEOUT_SECS", Some("5")),
                ("RUN_MODE", Some("test-none")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://localhost/indicata_test");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.wizard.submit_timeout(), Some(Duration::from_secs(5)));
                assert_eq!(config.logging.filter, "indicata=info,sea_orm=warn");
            },
        );
    }

    #[test]
    fn test_missing_database_url_fails() {
        temp_env::with_vars(
            [
                ("INDICATA__DATABASE__URL", None::<&str>),
                ("RUN_MODE", Some("test-none")),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }

    #[test]
    fn test_zero_timeout_disables_timeout() {
        let wizard = WizardConfig {
            submit_timeout_secs: 0,
        };
        assert_eq!(wizard.submit_timeout(), None);
        assert_eq!(
            WizardConfig::default().submit_timeout(),
            Some(Duration::from_secs(30))
        );
    }
}
