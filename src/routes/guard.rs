//! Guard middleware and the session extractor for protected handlers.

use axum::Router;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};

use crate::services::guard::{self, GuardOutcome, RedirectDirective};
use crate::services::session::{RequestContext, Session};
use crate::state::AppState;

/// Wrap every route already on `router` with the session gate.
///
/// Routes added after this call are not gated.
pub fn protect<S>(router: Router<S>, state: AppState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(state, require_session))
}

/// Resolve the session before the inner handler runs. The handler only runs
/// on `Proceed`, with the session stored in request extensions.
pub async fn require_session(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let ctx = RequestContext::from_headers(request.headers());
    match guard::evaluate(state.resolver.as_ref(), &ctx, state.failure_policy).await {
        GuardOutcome::Proceed(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        GuardOutcome::Redirect(directive) => directive.into_response(),
        GuardOutcome::Unavailable => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

/// Session placed by [`require_session`].
///
/// Rejects with the login redirect when used on a route outside the gate, so
/// a mis-wired handler still never runs unauthenticated.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = RedirectDirective;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Self)
            .ok_or_else(RedirectDirective::to_login)
    }
}
