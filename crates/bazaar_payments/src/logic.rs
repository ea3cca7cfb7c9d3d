// --- File: crates/bazaar_payments/src/logic.rs ---
use bazaar_common::{ConfirmationStore, PaymentConfirmation};
use bazaar_config::{env_vars, AppConfig, BackendConfig};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::PaymentError;
use crate::store::SupabaseConfirmationStore;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub const SUCCESS_MESSAGE: &str = "Payment confirmed successfully";

// --- Data Structures ---

/// Body sent by the app after the payment sheet completes.
///
/// Fields are kept as raw JSON values: only their presence is checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmPaymentRequest {
    pub payment_intent_id: Value,
    pub amount: Value,
}

/// Documentation-only shape of [`ConfirmPaymentRequest`].
#[cfg(feature = "openapi")]
#[derive(ToSchema, serde::Deserialize)]
#[allow(dead_code)]
pub struct ConfirmPaymentBody {
    #[serde(rename = "paymentIntentId")]
    #[schema(example = "pi_123")]
    pub payment_intent_id: String,
    #[schema(example = 25)]
    pub amount: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ConfirmPaymentResponse {
    pub success: bool,
    #[cfg_attr(feature = "openapi", schema(example = "Payment confirmed successfully"))]
    pub message: String,
}

impl ConfirmPaymentResponse {
    pub fn confirmed() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

impl ConfirmPaymentRequest {
    /// Parses a raw body. Malformed JSON is an `InvalidBody` error, not a
    /// validation error.
    pub fn parse(body: &[u8]) -> Result<Self, PaymentError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(&value)
    }

    /// Presence check: a field is missing when absent or `null`.
    /// Non-object bodies have no fields and therefore fail validation.
    pub fn from_value(body: &Value) -> Result<Self, PaymentError> {
        let field = |name: &str| body.get(name).filter(|v| !v.is_null()).cloned();

        match (field("paymentIntentId"), field("amount")) {
            (Some(payment_intent_id), Some(amount)) => Ok(Self {
                payment_intent_id,
                amount,
            }),
            _ => Err(PaymentError::MissingFields),
        }
    }

    /// Whether `amount` looks like a usable charge amount. Used for logging only.
    pub fn has_plausible_amount(&self) -> bool {
        self.amount.as_f64().is_some_and(|a| a >= 0.0)
    }
}

/// Backend credentials resolved for one request.
#[derive(Debug, Clone, Copy)]
pub struct BackendCredentials<'a> {
    pub url: &'a str,
    pub service_role_key: &'a str,
}

/// Both the project URL and the service role key must be configured.
pub fn require_backend(backend: &BackendConfig) -> Result<BackendCredentials<'_>, PaymentError> {
    let url = backend
        .base_url()
        .ok_or(PaymentError::MissingEnv(env_vars::SUPABASE_URL))?;
    let service_role_key = backend
        .service_role_key()
        .ok_or(PaymentError::MissingEnv(env_vars::SUPABASE_SERVICE_ROLE_KEY))?;
    Ok(BackendCredentials {
        url,
        service_role_key,
    })
}

// --- Core Logic Function ---

/// Confirms a payment.
///
/// Order matters: credentials are checked before the body is parsed, then the
/// body is validated, logged and (only when enabled) persisted.
///
/// `store` overrides the Supabase store used when persistence is enabled.
pub async fn confirm_payment(
    config: &AppConfig,
    store: Option<&dyn ConfirmationStore>,
    body: &[u8],
) -> Result<ConfirmPaymentResponse, PaymentError> {
    let credentials = require_backend(&config.backend)?;
    let request = ConfirmPaymentRequest::parse(body)?;

    info!(
        payment_intent_id = %request.payment_intent_id,
        amount = %request.amount,
        "Payment confirmed"
    );
    if !request.has_plausible_amount() {
        warn!(amount = %request.amount, "Confirmed payment has a non-numeric or negative amount");
    }

    if config.confirmation.persistence_enabled {
        let confirmation =
            PaymentConfirmation::confirmed(request.payment_intent_id, request.amount);
        match store {
            Some(store) => store.record(confirmation).await?,
            None => {
                SupabaseConfirmationStore::new(
                    credentials.url,
                    credentials.service_role_key,
                    &config.confirmation.table,
                )
                .record(confirmation)
                .await?
            }
        }
    }

    Ok(ConfirmPaymentResponse::confirmed())
}
