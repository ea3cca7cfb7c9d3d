// --- File: crates/bazaar_common/src/services.rs ---
//! Service abstractions for the hosted backend.
//!
//! These traits decouple the gate and the confirmation handler from the
//! concrete Supabase clients so tests can substitute their own.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::error::BazaarError;
use crate::models::{PaymentConfirmation, Session};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// The auth service as seen by the app.
pub trait AuthProvider: Send + Sync {
    /// Get the current session, `None` when nobody is signed in.
    fn get_session(&self) -> BoxFuture<'_, Option<Session>, BazaarError>;

    /// Exchange the refresh token for a fresh session.
    ///
    /// Returns `None` when there is no session to refresh.
    fn refresh_session(&self) -> BoxFuture<'_, Option<Session>, BazaarError>;

    /// Refresh only if the current session expires within `margin`.
    ///
    /// Providers that cannot tell when a session expires refresh every time.
    fn refresh_if_expiring(&self, margin: Duration) -> BoxFuture<'_, Option<Session>, BazaarError> {
        let _ = margin;
        self.refresh_session()
    }
}

/// Durable storage for payment confirmations.
pub trait ConfirmationStore: Send + Sync {
    fn record(&self, confirmation: PaymentConfirmation) -> BoxFuture<'_, (), BazaarError>;
}
