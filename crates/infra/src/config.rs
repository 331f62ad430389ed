//! Process configuration from environment variables (`.env` honored).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// `None` runs the app against the in-process store.
    pub database: Option<DatabaseConfig>,
    /// Mark the session cookie `Secure` (serve behind TLS).
    pub session_secure_cookie: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address like 0.0.0.0:8080")?;

        let database = match get("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: match get("DB_MAX_CONNECTIONS") {
                    Some(v) => v
                        .parse()
                        .context("DB_MAX_CONNECTIONS must be a positive integer")?,
                    None => DEFAULT_MAX_CONNECTIONS,
                },
                acquire_timeout: Duration::from_secs(match get("DB_ACQUIRE_TIMEOUT_SECS") {
                    Some(v) => v
                        .parse()
                        .context("DB_ACQUIRE_TIMEOUT_SECS must be a whole number of seconds")?,
                    None => DEFAULT_ACQUIRE_TIMEOUT_SECS,
                }),
            }),
            None => None,
        };

        let session_secure_cookie = match get("SESSION_SECURE_COOKIE") {
            Some(v) => parse_bool(&v).context("SESSION_SECURE_COOKIE must be true or false")?,
            None => false,
        };

        Ok(Self {
            bind_addr,
            database,
            session_secure_cookie,
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognized boolean {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_any_variables() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.database, None);
        assert!(!config.session_secure_cookie);
    }

    #[test]
    fn database_settings_fall_back_to_pool_defaults() {
        let config =
            Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/bierklub")]))
                .unwrap();
        let db = config.database.unwrap();
        assert_eq!(db.url, "postgres://localhost/bierklub");
        assert_eq!(db.max_connections, 5);
        assert_eq!(db.acquire_timeout, Duration::from_secs(5));
    }

    #[test]
    fn explicit_values_are_honored() {
        let config = Config::from_lookup(lookup(&[
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("DATABASE_URL", "postgres://db/club"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "2"),
            ("SESSION_SECURE_COOKIE", "true"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        let db = config.database.unwrap();
        assert_eq!(db.max_connections, 20);
        assert_eq!(db.acquire_timeout, Duration::from_secs(2));
        assert!(config.session_secure_cookie);
    }

    #[test]
    fn empty_database_url_means_in_memory() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(config.database, None);
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(Config::from_lookup(lookup(&[("BIND_ADDR", "not-an-addr")])).is_err());
        assert!(
            Config::from_lookup(lookup(&[
                ("DATABASE_URL", "postgres://db/club"),
                ("DB_MAX_CONNECTIONS", "many"),
            ]))
            .is_err()
        );
        assert!(Config::from_lookup(lookup(&[("SESSION_SECURE_COOKIE", "maybe")])).is_err());
    }
}
