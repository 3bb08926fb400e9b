//! Wishlist server entry point

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wishlist::{
    routes, AppState, Config, InMemorySessionStore, InMemoryUserStore, InMemoryWishlistStore,
    SqliteStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wishlist=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    tracing::info!(?config, "Loaded configuration");

    // Pick the store variant; handlers never see the difference
    let app = match &config.database {
        Some(path) => {
            let store = Arc::new(SqliteStore::open(path)?);
            tracing::info!(%path, "Using SQLite store");
            routes::create_router(Arc::new(AppState::new(store.clone(), store.clone(), store)))
        }
        None => {
            tracing::info!("Using in-memory store");
            routes::create_router(Arc::new(AppState::new(
                InMemoryUserStore::new(),
                InMemorySessionStore::new(),
                InMemoryWishlistStore::new(),
            )))
        }
    };

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server is running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
