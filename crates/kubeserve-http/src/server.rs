use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use kubeserve_k8s::ClusterApi;
use kubeserve_types::{
    HEALTH_PATH, INDEX_PATH, LINKS_PATH, PODS_FROM_DEPLOYMENT_PATH, ResourceKind,
};
use tokio::net::TcpListener;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub(crate) cluster: Arc<dyn ClusterApi>,
    index_file: PathBuf,
}

impl AppState {
    pub fn new(cluster: Arc<dyn ClusterApi>, index_file: impl Into<PathBuf>) -> Self {
        Self {
            cluster,
            index_file: index_file.into(),
        }
    }

    /// Static HTML served on `/`
    pub fn index_file(&self) -> &Path {
        &self.index_file
    }
}

/// Build the full route table
pub fn router(state: AppState) -> Router {
    let index = ServeFile::new(state.index_file());

    Router::new()
        .route(ResourceKind::Namespace.path(), get(handlers::namespaces))
        .route(ResourceKind::Deployment.path(), get(handlers::deployments))
        .route(ResourceKind::Pod.path(), get(handlers::pods))
        .route(
            PODS_FROM_DEPLOYMENT_PATH,
            get(handlers::pods_from_deployment),
        )
        .route(ResourceKind::Service.path(), get(handlers::services))
        .route(LINKS_PATH, get(handlers::links))
        .route(HEALTH_PATH, get(handlers::health))
        .route_service(INDEX_PATH, index)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve until Ctrl+C or SIGTERM, then drain in-flight requests
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    let addr = listener
        .local_addr()
        .context("Failed to read listener address")?;
    info!("HTTP server started on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Shutdown signal received"),
        _ = terminate => info!("Terminate signal received"),
    }
}
