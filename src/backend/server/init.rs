/**
 * Server Initialization
 *
 * Builds the store, the services and the router from a `ServerConfig`.
 * The store handle is returned next to the router so the caller can close
 * it after the server stops; `shutdown_signal` tells it when.
 */

use std::future::Future;
use std::sync::Arc;

use axum::Router;

use crate::backend::routes::create_router;
use crate::backend::server::config::{load_store, ConfigError, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::store::UserCollection;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails only if a database is configured and cannot be reached.
pub async fn create_app(
    config: &ServerConfig,
) -> Result<(Router, Arc<dyn UserCollection>), ConfigError> {
    tracing::info!(environment = %config.environment, "Initializing PetalPix backend server");

    let store = load_store(config).await?;
    let policy = config.graph_policy();
    tracing::info!(
        transactional = store.supports_transactions(),
        dedup_targets = policy.dedup_targets,
        clamp_counts = policy.clamp_counts,
        "User collection ready"
    );

    let app_state = AppState::new(store.clone(), policy);
    let app = create_router(app_state);

    tracing::info!("Router configured");
    Ok((app, store))
}

/// Resolve on ctrl-c
pub async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

/// Resolve when `signal` fires; never resolve if it could not be installed
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections");
}
