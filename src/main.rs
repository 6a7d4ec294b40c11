//! Official Gazette portal backend binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gazette_backend::config::Config;
use gazette_backend::service::{HttpGazetteService, MockGazetteService, ServiceState};
use gazette_backend::store::RecordStore;
use gazette_backend::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Official Gazette backend");
    tracing::info!("Bind address: {}", config.bind_addr);

    let service: ServiceState = match &config.api_base_url {
        Some(url) => {
            tracing::info!("Forwarding to remote gazette backend at {}", url);
            Arc::new(HttpGazetteService::new(url, config.http_timeout)?)
        }
        None => {
            let store = RecordStore::from_fixtures()?;
            tracing::info!(
                institutions = store.institutions().len(),
                issues = store.issues().len(),
                texts = store.texts().len(),
                "Serving in-memory fixtures"
            );
            Arc::new(MockGazetteService::new(Arc::new(store), config.mock_latency))
        }
    };

    // Create application state
    let state = AppState {
        service,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
