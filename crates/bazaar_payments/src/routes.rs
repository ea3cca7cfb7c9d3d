// --- File: crates/bazaar_payments/src/routes.rs ---
use crate::handlers::{confirm_payment_handler, PaymentsState};
use axum::{routing::any, Router};
use bazaar_common::ConfirmationStore;
use bazaar_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing the payment confirmation function.
pub fn routes(config: Arc<AppConfig>) -> Router {
    routes_with_store(config, None)
}

/// Same as [`routes`], recording confirmations through `store` instead of the
/// Supabase REST API when persistence is enabled.
pub fn routes_with_store(
    config: Arc<AppConfig>,
    store: Option<Arc<dyn ConfirmationStore>>,
) -> Router {
    let state = Arc::new(PaymentsState { config, store });

    Router::new()
        .route("/confirm-payment", any(confirm_payment_handler))
        .with_state(state)
}
