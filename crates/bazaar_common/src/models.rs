// --- File: crates/bazaar_common/src/models.rs ---

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated session issued by the auth provider.
///
/// The app treats it as a presence flag; the tokens are only used to talk to
/// the auth service again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp (seconds) after which the access token is expired.
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

impl Session {
    /// Whether the access token is expired at `now` (unix seconds).
    /// Sessions without an expiry never expire locally.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A payment confirmation as written to the backend when persistence is on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub payment_intent_id: serde_json::Value,
    pub amount: serde_json::Value,
    pub status: String,
    pub confirmed_at: DateTime<Utc>,
}

impl PaymentConfirmation {
    pub fn confirmed(payment_intent_id: serde_json::Value, amount: serde_json::Value) -> Self {
        Self {
            payment_intent_id,
            amount,
            status: "confirmed".to_string(),
            confirmed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: Option<i64>) -> Session {
        Session {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_at,
            user: None,
        }
    }

    #[test]
    fn test_expiry() {
        assert!(session(Some(100)).is_expired_at(100));
        assert!(session(Some(100)).is_expired_at(101));
        assert!(!session(Some(100)).is_expired_at(99));
        assert!(!session(None).is_expired_at(i64::MAX));
    }

    #[test]
    fn test_session_deserializes_without_optional_fields() {
        let s: Session =
            serde_json::from_str(r#"{"access_token":"a","refresh_token":"r"}"#).unwrap();
        assert_eq!(s, session(None));
    }
}
