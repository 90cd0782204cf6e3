//! raffle-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use raffle_gateway::api;
use raffle_gateway::app_state::AppState;
use raffle_gateway::config::GatewayConfig;
use raffle_gateway::domain::{
    EventBus, Identity, InMemoryLedger, Ledger, LedgerSeededRandomness, Pool, PoolEntry,
    RandomnessSource,
};
use raffle_gateway::service::RaffleService;
use raffle_gateway::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting raffle-gateway");

    // Build the injected environment
    let ledger: Arc<dyn Ledger> = Arc::new(InMemoryLedger::new());
    let randomness: Arc<dyn RandomnessSource> = Arc::new(LedgerSeededRandomness::new());

    // Construct the pool: the configured (or generated) manager plays
    // the deploying account, and the pool gets its own ledger address.
    let manager = config
        .manager_id
        .map_or_else(Identity::new, Identity::from_uuid);
    let account = Identity::new();
    let pool = Pool::new(account, manager, config.min_stake);
    tracing::info!(%account, %manager, min_stake = config.min_stake, "pool constructed");

    // Build domain and service layers
    let event_bus = EventBus::new(config.event_bus_capacity);
    let raffle_service = Arc::new(RaffleService::new(
        PoolEntry::new(pool),
        ledger,
        randomness,
        event_bus.clone(),
    ));

    // Build application state
    let app_state = AppState {
        raffle_service,
        event_bus,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
