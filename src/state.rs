//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers and the guard middleware via the
//! `State` extractor. The session resolver is held as a trait object so the
//! production Postgres resolver and test doubles are interchangeable.

use std::sync::Arc;

use crate::services::build_info::BuildInfo;
use crate::services::guard::ResolverFailurePolicy;
use crate::services::session::SessionResolver;

/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn SessionResolver>,
    pub failure_policy: ResolverFailurePolicy,
    pub build: Arc<BuildInfo>,
}

impl AppState {
    #[must_use]
    pub fn new(resolver: Arc<dyn SessionResolver>, failure_policy: ResolverFailurePolicy, build: BuildInfo) -> Self {
        Self { resolver, failure_policy, build: Arc::new(build) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
