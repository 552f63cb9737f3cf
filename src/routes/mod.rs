//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything under `/dashboard` is wrapped by the session gate before any
//! handler runs. Login, version, health and the JSON `me` endpoint are public
//! routes; `me` evaluates the gate itself so it can answer with status codes.

pub mod auth;
pub mod dashboard;
pub mod guard;
pub mod public;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Routes that require a resolved session.
fn protected_routes(state: AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/dashboard", get(dashboard::index))
        .route("/dashboard/{section}", get(dashboard::section));
    guard::protect(routes, state)
}

/// Full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(protected_routes(state.clone()))
        .route("/login", get(public::login))
        .route("/api/version", get(public::version))
        .route("/api/auth/me", get(auth::me))
        .route("/healthz", get(public::healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
