//! Process configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Every knob is an env var with a default, except `DATABASE_URL`. Parsing is
//! routed through a lookup closure so tests can feed a fixed map instead of
//! mutating the process environment.

use std::time::Duration;

use crate::services::guard::ResolverFailurePolicy;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SESSION_RESOLVE_TIMEOUT_MS: u64 = 2000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub cookie_secure: bool,
    pub failure_policy: ResolverFailurePolicy,
    pub session_resolve_timeout: Duration,
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// Required:
    /// - `DATABASE_URL`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `DB_MAX_CONNECTIONS`: default 5
    /// - `COOKIE_SECURE`: default false
    /// - `SESSION_FAILURE_POLICY`: `fail-closed` (default) or `unavailable`
    /// - `SESSION_RESOLVE_TIMEOUT_MS`: default 2000
    ///
    /// # Errors
    ///
    /// Returns an error if a required var is missing or a value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), DEFAULT_DB_MAX_CONNECTIONS)?;

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { key: "COOKIE_SECURE", value: raw })?,
            None => false,
        };

        let failure_policy = match get("SESSION_FAILURE_POLICY") {
            Some(raw) => ResolverFailurePolicy::parse(&raw)
                .ok_or(ConfigError::Invalid { key: "SESSION_FAILURE_POLICY", value: raw })?,
            None => ResolverFailurePolicy::default(),
        };

        let timeout_ms = parse_or(
            "SESSION_RESOLVE_TIMEOUT_MS",
            get("SESSION_RESOLVE_TIMEOUT_MS"),
            DEFAULT_SESSION_RESOLVE_TIMEOUT_MS,
        )?;
        // A zero timeout expires every lookup before the store can answer.
        if timeout_ms == 0 {
            return Err(ConfigError::Invalid { key: "SESSION_RESOLVE_TIMEOUT_MS", value: "0".into() });
        }

        Ok(Self {
            database_url,
            port,
            db_max_connections,
            cookie_secure,
            failure_policy,
            session_resolve_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
