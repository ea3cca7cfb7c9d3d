// --- File: crates/bazaar_common/src/http.rs ---
use axum::{
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

// Include the client module
pub mod client;

/// Value of `Access-Control-Allow-Origin` on every function response.
pub const CORS_ALLOW_ORIGIN: &str = "*";

/// Value of `Access-Control-Allow-Headers` on every function response.
pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// The permissive cross-origin headers browsers and the mobile client expect.
pub fn cors_headers() -> [(HeaderName, &'static str); 2] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, CORS_ALLOW_ORIGIN),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, CORS_ALLOW_HEADERS),
    ]
}

/// Builds a `{ "error": <message> }` JSON response carrying the CORS headers.
pub fn json_error_response<M: fmt::Display>(status: StatusCode, message: M) -> Response {
    let body = Json(json!({ "error": message.to_string() }));
    (status, cors_headers(), body).into_response()
}
