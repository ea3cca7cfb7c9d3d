// File: crates/services/bazaar_backend/src/main.rs
use bazaar_common::{config_error, logging, BazaarError};
use bazaar_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), BazaarError> {
    logging::init();
    let config = Arc::new(load_config().map_err(config_error)?);

    if config.backend.base_url().is_none() || config.backend.service_role_key().is_none() {
        warn!("Supabase credentials are not set; confirmations will fail with 500");
    }
    if config.confirmation.persistence_enabled {
        info!(table = %config.confirmation.table, "Payment confirmations will be persisted");
    }

    let app = bazaar_backend::app(config.clone());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!(
        "Functions available at http://{}{}",
        addr,
        bazaar_backend::FUNCTIONS_PREFIX
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
