//! orderbot - conversational order taking over WhatsApp
//!
//! Receives webhook deliveries, walks each user through the category, item,
//! quantity and confirmation steps, and replies through the Graph API.

mod api;
mod catalog;
mod config;
mod gateway;
mod runtime;
mod session;
mod state_machine;

use api::{create_router, AppState};
use catalog::Catalog;
use config::BotConfig;
use gateway::{GraphApiGateway, LoggingGateway};
use runtime::OrderRuntime;
use session::InMemorySessionStore;
use state_machine::OrderContext;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often expired sessions are swept when a TTL is set
const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orderbot=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = BotConfig::from_env();
    for name in config.placeholder_secrets() {
        tracing::warn!(
            variable = name,
            "Using insecure placeholder secret; set it in the environment"
        );
    }

    let catalog = match &config.catalog_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading catalog");
            Catalog::from_file(path)?
        }
        None => Catalog::default(),
    };
    tracing::info!(categories = ?catalog.category_names(), "Catalog ready");

    // Session store
    let store = Arc::new(match config.session_ttl {
        Some(ttl) => InMemorySessionStore::with_ttl(ttl),
        None => InMemorySessionStore::new(),
    });
    if let Some(ttl) = store.ttl() {
        tracing::info!(ttl_secs = ttl.as_secs(), "Session expiry enabled");
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(PURGE_INTERVAL);
            loop {
                interval.tick().await;
                let purged = store.purge_expired().await;
                if purged > 0 {
                    tracing::info!(purged, "Expired sessions removed");
                }
            }
        });
    }

    // Outbound gateway
    let graph = GraphApiGateway::from_config(&config)?;
    let gateway = Arc::new(LoggingGateway::new(Arc::new(graph)));

    // Create application state
    let context = OrderContext::new(Arc::new(catalog), config.payment_link.clone());
    let runtime = OrderRuntime::new(context, store, gateway);
    let state = AppState::new(runtime, &config.verify_token);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("orderbot listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
