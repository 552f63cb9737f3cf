//! Unauthenticated routes: login landing, version, health.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, Json};

use crate::services::build_info::VersionResponse;
use crate::state::AppState;

const LOGIN_PAGE: &str = "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>Sign in</title></head>\
<body><main><h1>Sign in</h1><p>Sign in to continue to the dashboard.</p></main></body></html>";

/// `GET /login` — entry point the guard redirects to. Credential submission
/// is handled by the sign-in service, not here.
pub async fn login() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

/// `GET /api/version` — build metadata, stamped at response time.
pub async fn version(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(state.build.response())
}

/// `GET /healthz`
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
