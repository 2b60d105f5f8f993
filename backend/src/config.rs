//! Server configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `EVENTS_*` environment variables and an
//! optional config file, in increasing order of precedence from file to CLI.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;

/// Deployment environment the server runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "development" => Some(Self::Development),
            "production" => Some(Self::Production),
            "test" => Some(Self::Test),
            _ => None,
        }
    }

    /// Lower-case name, as accepted in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

/// Startup configuration failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {message}")]
    Load { message: String },
    #[error("EVENTS_ENVIRONMENT is required (development, production or test)")]
    MissingEnvironment,
    #[error("invalid environment '{value}': expected development, production or test")]
    InvalidEnvironment { value: String },
    #[error("invalid host '{value}'")]
    InvalidHost { value: String },
    #[error("invalid frontend URL '{value}': {message}")]
    InvalidFrontendUrl { value: String, message: String },
}

/// Raw configuration values for the events server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EVENTS")]
pub struct AppConfig {
    /// One of `development`, `production` or `test`.
    pub environment: Option<String>,
    /// Interface to bind. Defaults to all interfaces.
    pub host: Option<String>,
    /// TCP port to bind.
    #[ortho_config(default = 3001)]
    pub port: u16,
    /// PostgreSQL URL. Without one the server keeps events in memory.
    pub database_url: Option<String>,
    /// Origin the web client is served from.
    pub frontend_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
}

/// Configuration after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub environment: Environment,
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub frontend_url: Option<Url>,
    pub db_max_connections: u32,
}

impl AppConfig {
    /// Load from the process arguments and environment, then validate.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when loading fails or a value is invalid.
    pub fn load_settings() -> Result<Settings, ConfigError> {
        Self::load()
            .map_err(|err| ConfigError::Load {
                message: err.to_string(),
            })?
            .validate()
    }

    /// Check every value and resolve defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError`] for a missing or unknown environment, an
    /// unparsable host or an invalid frontend URL.
    pub fn validate(self) -> Result<Settings, ConfigError> {
        let raw_env = self
            .environment
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingEnvironment)?;
        let environment =
            Environment::parse(raw_env).ok_or_else(|| ConfigError::InvalidEnvironment {
                value: raw_env.to_owned(),
            })?;

        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|_| ConfigError::InvalidHost {
            value: host.to_owned(),
        })?;

        let frontend_url = self
            .frontend_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|err| ConfigError::InvalidFrontendUrl {
                    value: raw.to_owned(),
                    message: err.to_string(),
                })
            })
            .transpose()?;

        Ok(Settings {
            environment,
            bind_addr: SocketAddr::new(ip, self.port),
            database_url: self.database_url.filter(|url| !url.trim().is_empty()),
            frontend_url,
            db_max_connections: self.db_max_connections,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: None,
            host: None,
            port: DEFAULT_PORT,
            database_url: None,
            frontend_url: None,
            db_max_connections: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration loading and validation.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "EVENTS_ENVIRONMENT",
        "EVENTS_HOST",
        "EVENTS_PORT",
        "EVENTS_DATABASE_URL",
        "EVENTS_FRONTEND_URL",
        "EVENTS_DB_MAX_CONNECTIONS",
    ];

    fn load_from_empty_args() -> AppConfig {
        AppConfig::load_from_iter([OsString::from("events-backend")]).expect("config should load")
    }

    fn development() -> AppConfig {
        AppConfig {
            environment: Some("development".into()),
            ..AppConfig::default()
        }
    }

    #[rstest]
    fn defaults_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let config = load_from_empty_args();
        assert_eq!(config.port, 3001);
        assert_eq!(config.db_max_connections, 10);
        assert!(config.environment.is_none());
        assert!(config.database_url.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("EVENTS_ENVIRONMENT", Some("test".to_owned())),
            ("EVENTS_HOST", Some("127.0.0.1".to_owned())),
            ("EVENTS_PORT", Some("4000".to_owned())),
            (
                "EVENTS_DATABASE_URL",
                Some("postgres://localhost/events".to_owned()),
            ),
            (
                "EVENTS_FRONTEND_URL",
                Some("http://localhost:3000".to_owned()),
            ),
            ("EVENTS_DB_MAX_CONNECTIONS", Some("3".to_owned())),
        ]);

        let settings = load_from_empty_args().validate().expect("valid settings");
        assert_eq!(settings.environment, Environment::Test);
        assert_eq!(settings.bind_addr, "127.0.0.1:4000".parse().expect("addr"));
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/events")
        );
        assert_eq!(
            settings.frontend_url.as_ref().map(Url::as_str),
            Some("http://localhost:3000/")
        );
        assert_eq!(settings.db_max_connections, 3);
    }

    #[rstest]
    fn missing_environment_is_rejected() {
        assert_eq!(
            AppConfig::default().validate(),
            Err(ConfigError::MissingEnvironment)
        );
    }

    #[rstest]
    #[case("staging")]
    #[case("Production")]
    fn unknown_environments_are_rejected(#[case] value: &str) {
        let config = AppConfig {
            environment: Some(value.into()),
            ..AppConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidEnvironment {
                value: value.into()
            })
        );
    }

    #[rstest]
    fn defaults_bind_all_interfaces() {
        let settings = development().validate().expect("valid settings");
        assert_eq!(settings.bind_addr, "0.0.0.0:3001".parse().expect("addr"));
        assert!(settings.database_url.is_none());
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let config = AppConfig {
            database_url: Some("  ".into()),
            ..development()
        };
        assert!(config.validate().expect("valid").database_url.is_none());
    }

    #[rstest]
    fn invalid_frontend_url_is_rejected() {
        let config = AppConfig {
            frontend_url: Some("not a url".into()),
            ..development()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFrontendUrl { .. })
        ));
    }
}
