//! Runtime settings read from the environment (optionally seeded from `.env`).

use crate::error::ConfigError;
use std::net::SocketAddr;
use url::Url;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_SCHEMA: &str = "public";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub store: StoreSettings,
}

/// Which backend serves the tables. `DATABASE_URL` wins over the REST endpoint when both are set.
#[derive(Clone, Debug)]
pub enum StoreSettings {
    Rest(RestSettings),
    Postgres(PgSettings),
}

#[derive(Clone)]
pub struct RestSettings {
    pub url: Url,
    pub service_key: String,
    pub schema: String,
}

#[derive(Clone)]
pub struct PgSettings {
    pub database_url: String,
    pub schema: String,
    pub max_connections: u32,
    /// Create the tables if missing at startup.
    pub apply_schema: bool,
}

impl std::fmt::Debug for RestSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestSettings")
            .field("url", &self.url.as_str())
            .field("service_key", &"<redacted>")
            .field("schema", &self.schema)
            .finish()
    }
}

impl std::fmt::Debug for PgSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgSettings")
            .field("database_url", &"<redacted>")
            .field("schema", &self.schema)
            .field("max_connections", &self.max_connections)
            .field("apply_schema", &self.apply_schema)
            .finish()
    }
}

impl Settings {
    /// Load `.env` if present, then read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr: SocketAddr = bind_raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            var: "BIND_ADDR",
            reason: e.to_string(),
        })?;

        let schema = get("SUPABASE_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        if !is_identifier(&schema) {
            return Err(ConfigError::Invalid {
                var: "SUPABASE_SCHEMA",
                reason: format!("'{}' is not a plain identifier", schema),
            });
        }

        let store = if let Some(database_url) = get("DATABASE_URL") {
            let max_connections = match get("DB_MAX_CONNECTIONS") {
                Some(s) => s.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                    var: "DB_MAX_CONNECTIONS",
                    reason: e.to_string(),
                })?,
                None => DEFAULT_MAX_CONNECTIONS,
            };
            let apply_schema = match get("APPLY_SCHEMA") {
                Some(s) => parse_flag("APPLY_SCHEMA", &s)?,
                None => false,
            };
            StoreSettings::Postgres(PgSettings {
                database_url,
                schema,
                max_connections,
                apply_schema,
            })
        } else {
            let raw = get("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?;
            let url = Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                var: "SUPABASE_URL",
                reason: e.to_string(),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::Invalid {
                    var: "SUPABASE_URL",
                    reason: format!("unsupported scheme '{}'", url.scheme()),
                });
            }
            let service_key =
                get("SUPABASE_SERVICE_ROLE_KEY").ok_or(ConfigError::Missing("SUPABASE_SERVICE_ROLE_KEY"))?;
            StoreSettings::Rest(RestSettings {
                url,
                service_key,
                schema,
            })
        };

        Ok(Settings { bind_addr, store })
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            var,
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn rest_backend_from_url_and_key() {
        let settings = Settings::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "secret"),
        ]))
        .unwrap();
        assert_eq!(settings.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        match settings.store {
            StoreSettings::Rest(rest) => {
                assert_eq!(rest.url.host_str(), Some("abc.supabase.co"));
                assert_eq!(rest.service_key, "secret");
                assert_eq!(rest.schema, "public");
            }
            other => panic!("expected rest settings, got {:?}", other),
        }
    }

    #[test]
    fn missing_key_is_reported() {
        let err = Settings::from_lookup(lookup(&[("SUPABASE_URL", "https://abc.supabase.co")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SUPABASE_SERVICE_ROLE_KEY")));
    }

    #[test]
    fn missing_url_is_reported() {
        let err = Settings::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SUPABASE_URL")));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let err = Settings::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SUPABASE_SERVICE_ROLE_KEY")));
    }

    #[test]
    fn non_http_url_is_rejected() {
        let err = Settings::from_lookup(lookup(&[
            ("SUPABASE_URL", "ftp://abc.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "secret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "SUPABASE_URL", .. }));
    }

    #[test]
    fn database_url_selects_postgres() {
        let settings = Settings::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("DATABASE_URL", "postgres://u:p@localhost/servem"),
            ("APPLY_SCHEMA", "true"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("BIND_ADDR", "127.0.0.1:9000"),
        ]))
        .unwrap();
        assert_eq!(settings.bind_addr.port(), 9000);
        match settings.store {
            StoreSettings::Postgres(pg) => {
                assert!(pg.apply_schema);
                assert_eq!(pg.max_connections, 12);
                assert_eq!(pg.schema, "public");
            }
            other => panic!("expected postgres settings, got {:?}", other),
        }
    }

    #[test]
    fn schema_must_be_identifier() {
        let err = Settings::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/servem"),
            ("SUPABASE_SCHEMA", "public; drop"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "SUPABASE_SCHEMA", .. }));
    }

    #[test]
    fn bad_flag_is_rejected() {
        let err = Settings::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/servem"),
            ("APPLY_SCHEMA", "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "APPLY_SCHEMA", .. }));
    }

    #[test]
    fn debug_output_hides_credentials() {
        let settings = Settings::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "super-secret-key"),
        ]))
        .unwrap();
        let printed = format!("{:?}", settings);
        assert!(!printed.contains("super-secret-key"));
        assert!(printed.contains("<redacted>"));
    }
}
