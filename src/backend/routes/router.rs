/**
 * Router Configuration
 *
 * Combines the health check, the API routes, the JSON 404 fallback and the
 * request logging layer into one router.
 */

use axum::{routing::get, Router};
use tower::ServiceBuilder;

use crate::backend::error::GraphError;
use crate::backend::middleware::log_requests;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", get(|| async { "ok" }));

    // Add API routes
    let router = configure_api_routes(router);

    // Fallback handler for 404
    let router = router.fallback(|| async { GraphError::not_found("route not found") });

    router
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(log_requests)))
        .with_state(app_state)
}
