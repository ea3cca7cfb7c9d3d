// --- File: crates/bazaar_payments/src/error.rs ---
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bazaar_common::{json_error_response, BazaarError, HttpStatusCode};
use thiserror::Error;
use tracing::error;

/// Errors raised while confirming a payment.
///
/// Only `MissingFields` is a client error; everything else is reported as a
/// 500 carrying the error's own message.
#[derive(Error, Debug)]
pub enum PaymentError {
    /// `paymentIntentId` or `amount` absent from the body
    #[error("Missing required fields")]
    MissingFields,

    /// A backend credential was not provided in the environment
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    /// The request body could not be read (e.g. over the size limit)
    #[error("{}", .0.body_text())]
    UnreadableBody(#[from] BytesRejection),

    /// The request body was not valid JSON
    #[error("{0}")]
    InvalidBody(#[from] serde_json::Error),

    /// Writing the confirmation to the backend failed
    #[error("{0}")]
    Persistence(#[from] BazaarError),
}

impl HttpStatusCode for PaymentError {
    fn status_code(&self) -> u16 {
        match self {
            PaymentError::MissingFields => 400,
            PaymentError::MissingEnv(_) => 500,
            PaymentError::UnreadableBody(_) => 500,
            PaymentError::InvalidBody(_) => 500,
            PaymentError::Persistence(_) => 500,
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!("Error confirming payment: {}", self);
        }
        json_error_response(status, self)
    }
}
