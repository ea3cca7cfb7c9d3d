// --- File: crates/bazaar_payments/src/handlers.rs ---
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use bazaar_common::{cors_headers, ConfirmationStore};
use bazaar_config::AppConfig;
use std::sync::Arc;

use crate::error::PaymentError;
use crate::logic::confirm_payment;

// --- State for Payment Handlers ---
#[derive(Clone)]
pub struct PaymentsState {
    pub config: Arc<AppConfig>,
    /// Overrides the Supabase store when persistence is enabled.
    pub store: Option<Arc<dyn ConfirmationStore>>,
}

/// Axum handler acknowledging a completed payment.
///
/// Mounted for every method. `OPTIONS` is answered with a bare `ok` and the
/// CORS headers; anything else goes through [`confirm_payment`]. A body that
/// cannot be buffered is reported like any other failure.
#[axum::debug_handler]
pub async fn confirm_payment_handler(
    State(state): State<Arc<PaymentsState>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if method == Method::OPTIONS {
        return (StatusCode::OK, cors_headers(), "ok").into_response();
    }

    let body = match body {
        Ok(body) => body,
        Err(rejection) => return PaymentError::from(rejection).into_response(),
    };

    match confirm_payment(&state.config, state.store.as_deref(), &body).await {
        Ok(response) => (StatusCode::OK, cors_headers(), Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}
