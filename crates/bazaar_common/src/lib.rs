// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Data structures shared between crates
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{config_error, external_service_error, BazaarError, HttpStatusCode};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, HTTP_CLIENT},
    cors_headers, json_error_response, CORS_ALLOW_HEADERS, CORS_ALLOW_ORIGIN,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error, log_result};

pub use models::{PaymentConfirmation, Session, SessionUser};
pub use services::{AuthProvider, BoxFuture, ConfirmationStore};
