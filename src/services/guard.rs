//! Session gate for protected routes.
//!
//! DESIGN
//! ======
//! `evaluate` asks the injected resolver once and returns a tagged outcome.
//! It never renders or redirects on its own; the HTTP layer turns the outcome
//! into a response. Anything short of an affirmatively resolved session ends
//! in `Redirect`, except transient resolver failures under the opt-in
//! `ServiceUnavailable` policy.

use axum::response::{IntoResponse, Redirect, Response};

use super::session::{RequestContext, ResolveError, Session, SessionResolver};

/// Login entry point unauthenticated callers are sent to.
pub const LOGIN_PATH: &str = "/login";

/// Decision to abort handling and send the caller elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectDirective {
    pub target: &'static str,
}

impl RedirectDirective {
    #[must_use]
    pub fn to_login() -> Self {
        Self { target: LOGIN_PATH }
    }
}

impl IntoResponse for RedirectDirective {
    fn into_response(self) -> Response {
        Redirect::temporary(self.target).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Proceed(Session),
    Redirect(RedirectDirective),
    /// Resolver hit a transient infrastructure error and the policy asks for
    /// a 5xx instead of a login redirect.
    Unavailable,
}

/// What to do when the resolver errors instead of answering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolverFailurePolicy {
    /// Treat every resolver error as "no session".
    #[default]
    FailClosed,
    /// Transient errors yield `Unavailable`; everything else still redirects.
    ServiceUnavailable,
}

impl ResolverFailurePolicy {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fail-closed" | "fail_closed" | "redirect" => Some(Self::FailClosed),
            "unavailable" | "service-unavailable" | "503" => Some(Self::ServiceUnavailable),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FailClosed => "fail-closed",
            Self::ServiceUnavailable => "unavailable",
        }
    }

    fn on_error(self, err: &ResolveError) -> GuardOutcome {
        match self {
            Self::ServiceUnavailable if err.is_transient() => GuardOutcome::Unavailable,
            _ => GuardOutcome::Redirect(RedirectDirective::to_login()),
        }
    }
}

/// Resolve the caller's session and decide whether protected content may run.
pub async fn evaluate(
    resolver: &dyn SessionResolver,
    ctx: &RequestContext,
    policy: ResolverFailurePolicy,
) -> GuardOutcome {
    match resolver.resolve(ctx).await {
        Ok(Some(session)) => GuardOutcome::Proceed(session),
        Ok(None) => {
            tracing::debug!(target_path = LOGIN_PATH, "no session; redirecting");
            GuardOutcome::Redirect(RedirectDirective::to_login())
        }
        Err(e) => {
            let outcome = policy.on_error(&e);
            tracing::warn!(
                error = %e,
                transient = e.is_transient(),
                policy = policy.as_str(),
                "session resolver failed"
            );
            outcome
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
