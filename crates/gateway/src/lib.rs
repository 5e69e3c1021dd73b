//! API Gateway Library
//!
//! HTTP front of the inventory store: session login, role checks and the
//! product endpoints.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod session;
pub mod state;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.bind_address();

    // Open the store and the session registry
    let state = AppState::bootstrap(config).await?;

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Run server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Gateway listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
