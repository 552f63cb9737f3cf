//! Session resolution.
//!
//! ARCHITECTURE
//! ============
//! The guard never reads cookies or queries storage itself. It is handed a
//! `SessionResolver` capability and a `RequestContext`, and only cares whether
//! a session came back. `PgSessionResolver` is the production implementation;
//! tests substitute fixed-result doubles from `state::test_helpers`.
//!
//! Session issuance (login, token minting) lives elsewhere. This module only
//! reads.

use std::time::Duration;

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub const SESSION_COOKIE_NAME: &str = "session_token";

// =============================================================================
// SESSION
// =============================================================================

/// Authenticated principal for the request being handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Unique user identifier.
    pub user_id: Uuid,
    /// Display name.
    pub name: String,
    /// How the session was established (e.g. `"password"`).
    pub auth_method: String,
}

// =============================================================================
// REQUEST CONTEXT
// =============================================================================

/// The slice of an incoming request a resolver is allowed to look at.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cookies: CookieJar,
}

impl RequestContext {
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self { cookies: CookieJar::from_headers(headers) }
    }

    /// Session token cookie value, if present and non-empty.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.cookies
            .get(SESSION_COOKIE_NAME)
            .map(Cookie::value)
            .filter(|v| !v.is_empty())
    }
}

// =============================================================================
// RESOLVER
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("session store error: {0}")]
    Store(#[from] sqlx::Error),
    #[error("session lookup timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },
    #[error("malformed session record: {0}")]
    Malformed(String),
}

impl ResolveError {
    /// Infrastructure failures that may succeed on a later request.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Timeout { .. })
    }
}

/// Resolve the current session from a request.
///
/// `Ok(None)` means "no session". Implementations own any retry or timeout
/// behavior; callers invoke `resolve` once per request.
#[async_trait::async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve(&self, ctx: &RequestContext) -> Result<Option<Session>, ResolveError>;
}

/// Resolver backed by the `sessions` and `users` tables.
pub struct PgSessionResolver {
    pool: PgPool,
    timeout: Duration,
}

impl PgSessionResolver {
    #[must_use]
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn lookup(&self, token: &str) -> Result<Option<Session>, ResolveError> {
        let row = sqlx::query(
            r"SELECT u.id, u.name, s.auth_method
              FROM sessions s
              JOIN users u ON u.id = s.user_id
              WHERE s.token = $1 AND s.expires_at > now()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let malformed = |e: sqlx::Error| ResolveError::Malformed(e.to_string());
        Ok(Some(Session {
            user_id: row.try_get("id").map_err(malformed)?,
            name: row.try_get("name").map_err(malformed)?,
            auth_method: row.try_get("auth_method").map_err(malformed)?,
        }))
    }
}

#[async_trait::async_trait]
impl SessionResolver for PgSessionResolver {
    async fn resolve(&self, ctx: &RequestContext) -> Result<Option<Session>, ResolveError> {
        let Some(token) = ctx.session_token() else {
            return Ok(None);
        };

        match tokio::time::timeout(self.timeout, self.lookup(token)).await {
            Ok(result) => result,
            Err(_) => Err(ResolveError::Timeout {
                after_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
