//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use quill_infra::database::DatabaseConfig;

/// Minimum session secret length accepted in production.
pub const MIN_SESSION_SECRET_LEN: usize = 32;

/// Default upload cap: 10 MiB.
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(()),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("SESSION_SECRET must be at least {MIN_SESSION_SECRET_LEN} bytes in production")]
    MissingSessionSecret,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// Store connection target. `None` runs on the in-memory store.
    pub database: Option<DatabaseConfig>,
    /// Static asset root, also the parent of the upload directory.
    pub public_dir: PathBuf,
    pub upload_subdir: String,
    pub upload_max_bytes: usize,
    pub session_secret: Option<String>,
    pub shutdown_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "APP_ENV",
                expected: "development or production",
                value: raw,
            })?,
            None => Environment::Development,
        };

        let database = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                let mut database = DatabaseConfig::new(url);
                database.max_connections = parse_or(
                    &lookup,
                    "DB_MAX_CONNECTIONS",
                    database.max_connections,
                    "a positive integer",
                )?;
                database.min_connections = parse_or(
                    &lookup,
                    "DB_MIN_CONNECTIONS",
                    database.min_connections,
                    "a positive integer",
                )?;
                Some(database)
            }
            None => None,
        };

        let session_secret = lookup("SESSION_SECRET").filter(|s| !s.is_empty());
        if environment == Environment::Production
            && session_secret
                .as_ref()
                .is_none_or(|s| s.len() < MIN_SESSION_SECRET_LEN)
        {
            return Err(ConfigError::MissingSessionSecret);
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080, "a port number")?,
            environment,
            database,
            public_dir: lookup("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            upload_subdir: lookup("UPLOAD_SUBDIR").unwrap_or_else(|| "uploads".to_string()),
            upload_max_bytes: parse_or(
                &lookup,
                "UPLOAD_MAX_BYTES",
                DEFAULT_UPLOAD_MAX_BYTES,
                "a byte count",
            )?,
            session_secret,
            shutdown_timeout: Duration::from_secs(parse_or(
                &lookup,
                "SHUTDOWN_TIMEOUT_SECS",
                30,
                "a number of seconds",
            )?),
        })
    }
}

fn parse_or<F, T>(
    lookup: &F,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name,
                expected,
                value,
            }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_run_in_memory() {
        let config = load(&[]).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, Environment::Development);
        assert!(config.database.is_none());
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.upload_subdir, "uploads");
        assert_eq!(config.upload_max_bytes, DEFAULT_UPLOAD_MAX_BYTES);
        assert_eq!(config.shutdown_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_database_url_enables_store() {
        let config = load(&[
            ("DATABASE_URL", "postgres://quill@localhost/quill"),
            ("DB_MAX_CONNECTIONS", "25"),
        ])
        .unwrap();

        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://quill@localhost/quill");
        assert_eq!(database.max_connections, 25);
        assert_eq!(database.min_connections, 1);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }

    #[test]
    fn test_production_requires_session_secret() {
        assert!(matches!(
            load(&[("APP_ENV", "production")]),
            Err(ConfigError::MissingSessionSecret)
        ));
        assert!(matches!(
            load(&[("APP_ENV", "production"), ("SESSION_SECRET", "short")]),
            Err(ConfigError::MissingSessionSecret)
        ));

        let secret = "s".repeat(MIN_SESSION_SECRET_LEN);
        let config = load(&[("APP_ENV", "prod"), ("SESSION_SECRET", &secret)]).unwrap();
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_unknown_environment_is_rejected() {
        let err = load(&[("APP_ENV", "staging")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "APP_ENV", .. }));
    }
}
