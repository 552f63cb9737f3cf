//! Session introspection for API callers.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;

use crate::services::guard::{self, GuardOutcome};
use crate::services::session::{RequestContext, Session};
use crate::state::AppState;

/// `GET /api/auth/me` — return the current session.
///
/// Same gate as the dashboard, but API callers get `401` rather than a login
/// redirect.
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Session>, StatusCode> {
    let ctx = RequestContext::from_headers(&headers);
    match guard::evaluate(state.resolver.as_ref(), &ctx, state.failure_policy).await {
        GuardOutcome::Proceed(session) => Ok(Json(session)),
        GuardOutcome::Redirect(_) => Err(StatusCode::UNAUTHORIZED),
        GuardOutcome::Unavailable => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}
