//! Process settings read from the environment (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database: PgConnectOptions,
    pub max_connections: u32,
    /// OpenAPI document served at /api/specification.
    pub openapi_path: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. `DATABASE_URL` wins over the `DB_*` keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = match lookup("DATABASE_URL").filter(|s| !s.is_empty()) {
            Some(url) => PgConnectOptions::from_str(&url).map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?,
            None => {
                let mut opts = PgConnectOptions::new();
                if let Some(host) = lookup("DB_HOST") {
                    opts = opts.host(&host);
                }
                if let Some(port) = lookup("DB_PORT") {
                    opts = opts.port(parse_num("DB_PORT", &port)?);
                }
                if let Some(name) = lookup("DB_NAME") {
                    opts = opts.database(&name);
                }
                if let Some(user) = lookup("DB_USER") {
                    opts = opts.username(&user);
                }
                if let Some(password) = lookup("DB_PASSWORD") {
                    opts = opts.password(&password);
                }
                opts
            }
        };
        let port = match lookup("PORT") {
            Some(p) => parse_num("PORT", &p)?,
            None => DEFAULT_PORT,
        };
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(n) => parse_num("DB_MAX_CONNECTIONS", &n)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        Ok(Settings {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            database,
            max_connections,
            openapi_path: lookup("OPENAPI_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("openapi.json")),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_num<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.port, 3000);
        assert_eq!(s.max_connections, 5);
        assert_eq!(s.bind_addr(), "0.0.0.0:3000");
        assert_eq!(s.openapi_path, PathBuf::from("openapi.json"));
    }

    #[test]
    fn db_parts_are_assembled() {
        let s = settings(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "5433"),
            ("DB_NAME", "nextbike"),
            ("DB_USER", "bike"),
            ("PORT", "8080"),
        ])
        .unwrap();
        assert_eq!(s.database.get_host(), "db.internal");
        assert_eq!(s.database.get_port(), 5433);
        assert_eq!(s.database.get_database(), Some("nextbike"));
        assert_eq!(s.database.get_username(), "bike");
        assert_eq!(s.port, 8080);
    }

    #[test]
    fn database_url_wins() {
        let s = settings(&[("DATABASE_URL", "postgres://u:p@example:6000/bikes"), ("DB_HOST", "ignored")]).unwrap();
        assert_eq!(s.database.get_host(), "example");
        assert_eq!(s.database.get_port(), 6000);
        assert_eq!(s.database.get_database(), Some("bikes"));
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = settings(&[("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }
}
