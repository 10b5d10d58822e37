//! `orgchart serve`: expose the org module over HTTP.

use anyhow::Result;
use axum::http::Uri;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use org::{OrgModule, PlacementPolicy};
use orgchart_core::{Module, ServiceError};

/// Run the HTTP server until interrupted.
pub fn serve(listen: &str, policy: PlacementPolicy) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(listen, policy))
}

async fn run(listen: &str, policy: PlacementPolicy) -> Result<()> {
    let app = build_app(policy);

    let listener = tokio::net::TcpListener::bind(listen).await?;
    info!("org chart server listening on {}", listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

/// Router with every module's routes plus health and a JSON 404.
pub fn build_app(policy: PlacementPolicy) -> Router {
    let modules: Vec<Box<dyn Module>> = vec![Box::new(OrgModule::new(policy))];

    let mut app = Router::new().route("/health", get(health));
    for module in &modules {
        info!("{} module mounted", module.name());
        app = app.merge(module.routes());
    }
    app.fallback(not_found)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn not_found(uri: Uri) -> ServiceError {
    ServiceError::NotFound(format!("no route for {}", uri.path()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
