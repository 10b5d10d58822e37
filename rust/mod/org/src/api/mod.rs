mod hierarchy;

use std::sync::Arc;

use axum::Router;

use crate::service::OrgService;

/// Shared application state.
pub type AppState = Arc<OrgService>;

/// Build the org chart API router, mounted under `/org`.
pub fn build_router(svc: Arc<OrgService>) -> Router {
    Router::new()
        .nest("/org", hierarchy::routes())
        .with_state(svc)
}
