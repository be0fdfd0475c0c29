//! Task tracker API server
//!
//! Serves the task REST API over plain JSON-over-HTTP. All wiring (store,
//! service, route table) happens here at startup.

mod error;
mod router;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tt_core::task::InMemoryTaskStore;

use crate::state::AppState;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = if seed_requested() {
        tracing::info!("Starting with the demo data set");
        InMemoryTaskStore::seeded()
    } else {
        InMemoryTaskStore::new()
    };

    let state = AppState::new(Arc::new(store));
    let app = router::app(state);

    let addr: SocketAddr = std::env::var("TT_BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .expect("TT_BIND_ADDR must be a valid socket address");

    tracing::info!("Task API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}

fn seed_requested() -> bool {
    std::env::var("TT_SEED_DATA")
        .map(|value| matches!(value.as_str(), "1" | "true"))
        .unwrap_or(false)
}
