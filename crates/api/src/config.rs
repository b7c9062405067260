use std::net::IpAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;
use watchlist_core::validation::ValidationRules;
use watchlist_db::StoreBackend;

/// Configuration problems detected at startup. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Origins allowed by the CORS layer. Credentials are never allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

/// Server configuration loaded from environment variables.
///
/// All fields except `DATABASE_URL` (for the postgres backend) have defaults
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins; `*` or unset means any origin.
    pub cors_origins: CorsOrigins,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Which record store adapter to open.
    pub store: StoreBackend,
    /// Switches for the record payload rules.
    pub validation: ValidationRules,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default              |
    /// |------------------------|----------------------|
    /// | `HOST`                 | `0.0.0.0`            |
    /// | `PORT`                 | `3000`               |
    /// | `CORS_ORIGINS`         | `*`                  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                 |
    /// | `STORE_BACKEND`        | `postgres`           |
    /// | `DATABASE_URL`         | required (postgres)  |
    /// | `DB_MAX_CONNECTIONS`   | `10`                 |
    /// | `DATA_FILE`            | `data/records.json`  |
    /// | `REQUIRE_IMAGE_URL`    | `false`              |
    /// | `LOG_FORMAT`           | `text`               |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = parse_or(var("HOST"), "HOST", "an IP address", "0.0.0.0".parse().ok())?;
        let port = parse_or(var("PORT"), "PORT", "a valid u16", Some(3000))?;
        let request_timeout_secs = parse_or(
            var("REQUEST_TIMEOUT_SECS"),
            "REQUEST_TIMEOUT_SECS",
            "a valid u64",
            Some(30),
        )?;

        let cors_origins = match var("CORS_ORIGINS").as_deref() {
            None => CorsOrigins::Any,
            Some(list) if list.split(',').any(|o| o.trim() == "*") => CorsOrigins::Any,
            Some(list) => CorsOrigins::List(
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|origin| {
                        origin.parse::<HeaderValue>().map_err(|_| ConfigError::Invalid {
                            name: "CORS_ORIGINS",
                            expected: "a comma-separated list of origins",
                            value: origin.to_string(),
                        })
                    })
                    .collect::<Result<_, _>>()?,
            ),
        };

        let store = match var("STORE_BACKEND").as_deref().unwrap_or("postgres") {
            "postgres" => StoreBackend::Postgres {
                database_url: var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
                max_connections: parse_or(
                    var("DB_MAX_CONNECTIONS"),
                    "DB_MAX_CONNECTIONS",
                    "a valid u32",
                    Some(10),
                )?,
            },
            "file" => StoreBackend::File {
                path: var("DATA_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("data/records.json")),
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    name: "STORE_BACKEND",
                    expected: "one of postgres, file, memory",
                    value: other.to_string(),
                })
            }
        };

        let require_image_url = parse_bool(var("REQUIRE_IMAGE_URL"), "REQUIRE_IMAGE_URL")?;

        let log_format = match var("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    expected: "text or json",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store,
            validation: ValidationRules { require_image_url },
            log_format,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    name: &'static str,
    expected: &'static str,
    default: Option<T>,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
        None => default.ok_or(ConfigError::Missing(name)),
    }
}

fn parse_bool(raw: Option<String>, name: &'static str) -> Result<bool, ConfigError> {
    let Some(value) = raw else {
        return Ok(false);
    };
    match value.to_ascii_lowercase().as_str() {
        "false" | "0" | "no" => Ok(false),
        "true" | "1" | "yes" => Ok(true),
        _ => Err(ConfigError::Invalid {
            name,
            expected: "a boolean",
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        assert_matches!(load(&[]), Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/watchlist")]).unwrap();
        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.cors_origins, CorsOrigins::Any);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(!config.validation.require_image_url);
        assert_eq!(
            config.store,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/watchlist".into(),
                max_connections: 10,
            }
        );
    }

    #[test]
    fn file_backend_with_default_path() {
        let config = load(&[("STORE_BACKEND", "file")]).unwrap();
        assert_eq!(
            config.store,
            StoreBackend::File {
                path: PathBuf::from("data/records.json")
            }
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_matches!(
            load(&[("STORE_BACKEND", "memory"), ("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        );
        assert_matches!(
            load(&[("STORE_BACKEND", "redis")]),
            Err(ConfigError::Invalid { name: "STORE_BACKEND", .. })
        );
        assert_matches!(
            load(&[("STORE_BACKEND", "memory"), ("REQUIRE_IMAGE_URL", "maybe")]),
            Err(ConfigError::Invalid { name: "REQUIRE_IMAGE_URL", .. })
        );
    }

    #[test]
    fn explicit_origin_list() {
        let config = load(&[
            ("STORE_BACKEND", "memory"),
            ("CORS_ORIGINS", "http://localhost:5173, https://watch.example"),
            ("REQUIRE_IMAGE_URL", "true"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_matches!(config.cors_origins, CorsOrigins::List(ref o) if o.len() == 2);
        assert!(config.validation.require_image_url);
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
