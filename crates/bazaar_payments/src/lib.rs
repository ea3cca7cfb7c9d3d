// --- File: crates/bazaar_payments/src/lib.rs ---
#[cfg(feature = "openapi")]
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod routes;
pub mod store;

// Re-export for main backend
pub use error::PaymentError;
pub use handlers::PaymentsState;
pub use logic::{ConfirmPaymentRequest, ConfirmPaymentResponse};
pub use routes::{routes, routes_with_store};
pub use store::SupabaseConfirmationStore;
