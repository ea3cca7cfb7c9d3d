// --- File: crates/bazaar_payments/src/doc.rs ---
#![allow(dead_code)]
use utoipa::OpenApi;

use crate::logic::{ConfirmPaymentBody, ConfirmPaymentResponse};

#[utoipa::path(
    post,
    path = "/confirm-payment", // Path relative to /functions/v1
    request_body(content = ConfirmPaymentBody, example = json!({
        "paymentIntentId": "pi_123",
        "amount": 25
    })),
    responses(
        (status = 200, description = "Payment acknowledged", body = ConfirmPaymentResponse,
            example = json!({ "success": true, "message": "Payment confirmed successfully" })),
        (status = 400, description = "A required field is missing",
            example = json!({ "error": "Missing required fields" })),
        (status = 500, description = "Missing configuration, malformed body or failed insert")
    ),
    tag = "Payments"
)]
fn doc_confirm_payment_handler() {}

#[utoipa::path(
    options,
    path = "/confirm-payment",
    responses((status = 200, description = "CORS preflight", content_type = "text/plain")),
    tag = "Payments"
)]
fn doc_confirm_payment_preflight() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_confirm_payment_handler, doc_confirm_payment_preflight),
    components(schemas(ConfirmPaymentBody, ConfirmPaymentResponse)),
    tags((name = "Payments", description = "Payment confirmation function"))
)]
pub struct PaymentsApiDoc;
