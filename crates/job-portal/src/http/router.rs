use axum::routing::get;
use axum::Router;

use super::state::PortalState;
use crate::board::admin::admin_router;
use crate::board::applications::application_router;
use crate::board::identity::auth_router;
use crate::board::jobs::job_router;

/// Every board endpoint behind one router.
pub fn portal_router(state: PortalState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .merge(auth_router(state.clone()))
        .merge(job_router(state.clone()))
        .merge(application_router(state.clone()))
        .merge(admin_router(state))
}

async fn welcome() -> &'static str {
    "Welcome to Job Portal API"
}
