use bridgeschool::logging::init_tracing;
use bridgeschool::metrics::{init_metrics, metrics_app};
use bridgeschool::router::init_router;
use bridgeschool::state::init_app_state;
use dotenvy::dotenv;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _log_guard = init_tracing()?;
    let metrics_handle = init_metrics()?;

    let state = init_app_state().await?;
    let bind_address = state.server_config.bind_address.clone();
    let metrics_address = state.server_config.metrics_bind_address.clone();

    if let Some(handle) = metrics_handle {
        let listener = tokio::net::TcpListener::bind(&metrics_address).await?;
        info!(address = %metrics_address, "Metrics endpoint listening");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let app = init_router(state);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "Server running");
    info!("Swagger UI at http://{}/swagger-ui", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutting down");
}
