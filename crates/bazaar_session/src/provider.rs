// --- File: crates/bazaar_session/src/provider.rs ---
//! Supabase Auth (GoTrue) client used by the session gate.

use bazaar_common::{
    config_error, external_service_error, AuthProvider, BazaarError, BoxFuture, Session,
    SessionUser, HTTP_CLIENT,
};
use bazaar_config::{env_vars, BackendConfig};
use chrono::Utc;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info, warn};

use crate::storage::load_session_file;

const SERVICE_NAME: &str = "Supabase Auth";

/// Token endpoint response for `grant_type=refresh_token`.
#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    user: Option<SessionUser>,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| Utc::now().timestamp() + secs));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// Auth provider backed by a locally stored session and the Supabase Auth API.
///
/// With a session file attached, the file is read on the first query. A file
/// that cannot be read fails that query like any other auth error.
pub struct SupabaseAuthProvider {
    client: Client,
    base_url: String,
    anon_key: String,
    session: RwLock<Option<Session>>,
    session_file: Option<PathBuf>,
    file_loaded: OnceCell<()>,
}

impl SupabaseAuthProvider {
    pub fn new(base_url: &str, anon_key: &str, session: Option<Session>) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            session: RwLock::new(session),
            session_file: None,
            file_loaded: OnceCell::new(),
        }
    }

    /// Reads the stored session from `path` on first use.
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Builds the provider from the `backend` section; the anon key is the
    /// client-side credential.
    pub fn from_config(
        backend: &BackendConfig,
        session: Option<Session>,
    ) -> Result<Self, BazaarError> {
        let url = backend.base_url().ok_or_else(|| {
            config_error(format!("{} is not set", env_vars::SUPABASE_URL))
        })?;
        let anon_key = backend.anon_key().ok_or_else(|| {
            config_error(format!("{} is not set", env_vars::SUPABASE_ANON_KEY))
        })?;
        Ok(Self::new(url, anon_key, session))
    }

    /// The locally held session, without contacting the auth service.
    pub async fn stored_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub async fn set_session(&self, session: Option<Session>) {
        *self.session.write().await = session;
    }

    /// The stored session, reading the session file first if one is attached
    /// and has not been read yet. An in-memory session wins over the file.
    async fn current_session(&self) -> Result<Option<Session>, BazaarError> {
        if let Some(path) = self.session_file.as_deref() {
            self.file_loaded
                .get_or_try_init(|| async {
                    if let Some(session) = load_session_file(path).await? {
                        let mut current = self.session.write().await;
                        if current.is_none() {
                            *current = Some(session);
                        }
                    }
                    Ok::<(), BazaarError>(())
                })
                .await?;
        }
        Ok(self.stored_session().await)
    }

    async fn fetch_user(&self, access_token: &str) -> Result<Option<SessionUser>, BazaarError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {access_token}"))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(Some(response.json::<SessionUser>().await?));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!(%status, "Access token rejected");
            return Ok(None);
        }
        let body = response.text().await.unwrap_or_default();
        Err(external_service_error(
            SERVICE_NAME,
            format!("Status: {}, Message: {}", status, body),
        ))
    }

    /// Exchanges `refresh_token` and stores the result. A rejected refresh
    /// token clears the stored session.
    async fn refresh(&self, refresh_token: &str) -> Result<Option<Session>, BazaarError> {
        debug!("Refreshing auth session");
        let response = self
            .client
            .post(format!(
                "{}/auth/v1/token?grant_type=refresh_token",
                self.base_url
            ))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let session = response.json::<TokenResponse>().await?.into_session();
            self.set_session(Some(session.clone())).await;
            info!("Auth session refreshed");
            return Ok(Some(session));
        }
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            warn!(%status, "Refresh token rejected, clearing session");
            self.set_session(None).await;
            return Ok(None);
        }
        let body = response.text().await.unwrap_or_default();
        Err(external_service_error(
            SERVICE_NAME,
            format!("Status: {}, Message: {}", status, body),
        ))
    }
}

impl AuthProvider for SupabaseAuthProvider {
    fn get_session(&self) -> BoxFuture<'_, Option<Session>, BazaarError> {
        Box::pin(async move {
            let Some(stored) = self.current_session().await? else {
                return Ok(None);
            };

            if stored.is_expired() {
                return self.refresh(&stored.refresh_token).await;
            }

            match self.fetch_user(&stored.access_token).await? {
                Some(user) => {
                    let session = Session {
                        user: Some(user),
                        ..stored
                    };
                    self.set_session(Some(session.clone())).await;
                    Ok(Some(session))
                }
                None => {
                    self.set_session(None).await;
                    Ok(None)
                }
            }
        })
    }

    fn refresh_session(&self) -> BoxFuture<'_, Option<Session>, BazaarError> {
        Box::pin(async move {
            match self.current_session().await? {
                Some(stored) => self.refresh(&stored.refresh_token).await,
                None => Ok(None),
            }
        })
    }

    fn refresh_if_expiring(&self, margin: Duration) -> BoxFuture<'_, Option<Session>, BazaarError> {
        Box::pin(async move {
            let Some(stored) = self.current_session().await? else {
                return Ok(None);
            };
            let margin = i64::try_from(margin.as_secs()).unwrap_or(i64::MAX);
            let deadline = Utc::now().timestamp().saturating_add(margin);
            if stored.is_expired_at(deadline) {
                self.refresh(&stored.refresh_token).await
            } else {
                Ok(Some(stored))
            }
        })
    }
}
