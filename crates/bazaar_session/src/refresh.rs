// --- File: crates/bazaar_session/src/refresh.rs ---
//! Background refresh of the auth session.
//!
//! Refreshing only runs while the app is in the foreground. The controller is
//! process-wide ([`AutoRefresh::global`]) and driven explicitly by the app's
//! lifecycle events through [`AutoRefresh::on_app_state_change`].

use bazaar_common::AuthProvider;
use bazaar_config::SessionConfig;
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Ticks ahead of expiry at which a session gets refreshed.
const EXPIRY_MARGIN_TICKS: u32 = 3;

/// Application lifecycle states as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Active,
    Inactive,
    Background,
}

fn expiry_margin(interval: Duration) -> Duration {
    interval.saturating_mul(EXPIRY_MARGIN_TICKS)
}

static GLOBAL: Lazy<AutoRefresh> = Lazy::new(AutoRefresh::new);

/// Owns at most one refresh task.
#[derive(Default)]
pub struct AutoRefresh {
    task: Mutex<Option<JoinHandle<()>>>,
}

impl AutoRefresh {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide controller.
    pub fn global() -> &'static AutoRefresh {
        &GLOBAL
    }

    fn task(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.task.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Starts the refresh loop. Returns `false` if it was already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<P>(&self, provider: Arc<P>, interval: Duration) -> bool
    where
        P: AuthProvider + ?Sized + 'static,
    {
        let mut task = self.task();
        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return false;
        }

        let interval = interval.max(Duration::from_millis(1));
        let margin = expiry_margin(interval);
        *task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match provider.refresh_if_expiring(margin).await {
                    Ok(Some(_)) => debug!("Auth session is current"),
                    Ok(None) => debug!("No auth session to refresh"),
                    Err(e) => warn!("Auth session refresh failed: {}", e),
                }
            }
        }));
        info!(?interval, "Auth auto-refresh started");
        true
    }

    /// Stops the refresh loop. Returns `false` if it was not running.
    pub fn stop(&self) -> bool {
        match self.task().take() {
            Some(handle) => {
                handle.abort();
                info!("Auth auto-refresh stopped");
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.task()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Foreground starts refreshing every `session.refresh_interval_secs`,
    /// anything else stops it.
    pub fn on_app_state_change<P>(&self, state: AppState, provider: Arc<P>, config: &SessionConfig)
    where
        P: AuthProvider + ?Sized + 'static,
    {
        match state {
            AppState::Active => {
                self.start(provider, config.refresh_interval());
            }
            AppState::Inactive | AppState::Background => {
                self.stop();
            }
        }
    }
}
