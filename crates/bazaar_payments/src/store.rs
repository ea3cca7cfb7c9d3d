// --- File: crates/bazaar_payments/src/store.rs ---
//! Supabase REST persistence for payment confirmations.
//!
//! Only used when `confirmation.persistence_enabled` is set.

use bazaar_common::{
    log_result, BazaarError, BoxFuture, ConfirmationStore, PaymentConfirmation, HTTP_CLIENT,
};
use reqwest::{header, Client};
use tracing::debug;

/// Inserts confirmations into a PostgREST table with the service role key.
pub struct SupabaseConfirmationStore {
    client: Client,
    endpoint: String,
    service_role_key: String,
}

impl SupabaseConfirmationStore {
    pub fn new(base_url: &str, service_role_key: &str, table: &str) -> Self {
        Self::with_client(HTTP_CLIENT.clone(), base_url, service_role_key, table)
    }

    pub fn with_client(client: Client, base_url: &str, service_role_key: &str, table: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table),
            service_role_key: service_role_key.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn insert(&self, confirmation: &PaymentConfirmation) -> Result<(), BazaarError> {
        debug!(endpoint = %self.endpoint, "Inserting payment confirmation");
        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.service_role_key)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.service_role_key),
            )
            .header("Prefer", "return=minimal")
            .json(confirmation)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = response.text().await.unwrap_or_default();
        Err(BazaarError::DatabaseError(format!(
            "insert into {} failed with status {}: {}",
            self.endpoint, status, message
        )))
    }
}

impl ConfirmationStore for SupabaseConfirmationStore {
    fn record(&self, confirmation: PaymentConfirmation) -> BoxFuture<'_, (), BazaarError> {
        Box::pin(async move {
            log_result(
                self.insert(&confirmation).await,
                "Payment confirmation stored",
                "Failed to store payment confirmation",
            )
        })
    }
}
