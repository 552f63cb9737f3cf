//! Build and runtime metadata for the diagnostic version endpoint.

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::guard::ResolverFailurePolicy;

pub const DEFAULT_COMMIT: &str = "local";
pub const DEFAULT_ENV: &str = "development";

/// Values captured once at startup. Only `buildTime` varies per response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: String,
    pub commit: String,
    pub env: String,
    pub features: BuildFeatures,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildFeatures {
    pub auth: String,
    pub transport: String,
    pub session_failure: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResponse {
    pub version: String,
    pub build_time: String,
    pub commit: String,
    pub env: String,
    pub features: BuildFeatures,
}

impl BuildInfo {
    /// Read `APP_VERSION`, `GIT_COMMIT`, `APP_ENV` from the process environment.
    #[must_use]
    pub fn from_env(cookie_secure: bool, policy: ResolverFailurePolicy) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), cookie_secure, policy)
    }

    /// Same as [`BuildInfo::from_env`] over an arbitrary lookup. Blank values
    /// fall back to defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F, cookie_secure: bool, policy: ResolverFailurePolicy) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        Self {
            version: get("APP_VERSION", env!("CARGO_PKG_VERSION")),
            commit: get("GIT_COMMIT", DEFAULT_COMMIT),
            env: get("APP_ENV", DEFAULT_ENV),
            features: BuildFeatures {
                auth: "session-cookie".into(),
                transport: if cookie_secure { "https" } else { "http" }.into(),
                session_failure: policy.as_str().into(),
            },
        }
    }

    /// Snapshot stamped with the current UTC time.
    #[must_use]
    pub fn response(&self) -> VersionResponse {
        self.response_at(OffsetDateTime::now_utc())
    }

    pub(crate) fn response_at(&self, now: OffsetDateTime) -> VersionResponse {
        VersionResponse {
            version: self.version.clone(),
            build_time: now
                .format(&Rfc3339)
                .unwrap_or_else(|_| now.unix_timestamp().to_string()),
            commit: self.commit.clone(),
            env: self.env.clone(),
            features: self.features.clone(),
        }
    }
}

#[cfg(test)]
#[path = "build_info_test.rs"]
mod tests;
