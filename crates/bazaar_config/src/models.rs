// --- File: crates/bazaar_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::time::Duration;

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8086
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// --- Backend (Supabase) Config ---
// All three values are normally injected from SUPABASE_* env vars.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BackendConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub service_role_key: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
}

impl BackendConfig {
    /// Project URL without a trailing slash, if set and non-empty.
    pub fn base_url(&self) -> Option<&str> {
        non_empty(self.url.as_deref()).map(|u| u.trim_end_matches('/'))
    }

    pub fn service_role_key(&self) -> Option<&str> {
        non_empty(self.service_role_key.as_deref())
    }

    pub fn anon_key(&self) -> Option<&str> {
        non_empty(self.anon_key.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// --- Payment Confirmation Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConfirmationConfig {
    /// When false the handler only logs confirmations.
    #[serde(default)]
    pub persistence_enabled: bool,
    #[serde(default = "default_confirmation_table")]
    pub table: String,
}

fn default_confirmation_table() -> String {
    "payments".to_string()
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            persistence_enabled: false,
            table: default_confirmation_table(),
        }
    }
}

// --- Session Config (client side) ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default)]
    pub session_file: Option<String>,
}

fn default_refresh_interval_secs() -> u64 {
    60
}

impl SessionConfig {
    /// Auto-refresh tick. Zero is clamped to one second.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
            session_file: None,
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub confirmation: ConfirmationConfig,
    #[serde(default)]
    pub session: SessionConfig,
}
