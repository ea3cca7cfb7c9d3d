// --- File: crates/bazaar_session/src/gate.rs ---
use bazaar_common::{log_error, AuthProvider, Session};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{watch, OnceCell};
use tracing::info;

/// Where the app lands once the session check has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRoute {
    /// Authenticated home flow.
    Home,
    /// Account creation flow.
    SignUp,
}

impl EntryRoute {
    pub fn path(&self) -> &'static str {
        match self {
            EntryRoute::Home => "/(tabs)",
            EntryRoute::SignUp => "/sign-up",
        }
    }
}

impl fmt::Display for EntryRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    /// The auth query is in flight; show the loading indicator.
    Pending,
    Authenticated(Session),
    Unauthenticated,
}

impl GateState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GateState::Pending)
    }

    /// `None` while pending.
    pub fn route(&self) -> Option<EntryRoute> {
        match self {
            GateState::Pending => None,
            GateState::Authenticated(_) => Some(EntryRoute::Home),
            GateState::Unauthenticated => Some(EntryRoute::SignUp),
        }
    }
}

/// Startup session gate.
///
/// Each gate performs at most one auth query. Both outcomes are terminal;
/// mounting a new gate starts over at [`GateState::Pending`].
pub struct SessionGate<P: ?Sized> {
    provider: Arc<P>,
    state: watch::Sender<GateState>,
    outcome: OnceCell<GateState>,
}

impl<P> SessionGate<P>
where
    P: AuthProvider + ?Sized,
{
    pub fn mount(provider: Arc<P>) -> Self {
        let (state, _) = watch::channel(GateState::Pending);
        Self {
            provider,
            state,
            outcome: OnceCell::new(),
        }
    }

    pub fn state(&self) -> GateState {
        self.state.borrow().clone()
    }

    /// Observe transitions, e.g. to swap the loading indicator for a route.
    pub fn subscribe(&self) -> watch::Receiver<GateState> {
        self.state.subscribe()
    }

    /// Runs the session check once and returns the terminal state.
    ///
    /// Concurrent and repeated calls share the first call's outcome.
    pub async fn resolve(&self) -> GateState {
        self.outcome
            .get_or_init(|| async {
                let outcome = self.check().await;
                self.state.send_replace(outcome.clone());
                outcome
            })
            .await
            .clone()
    }

    async fn check(&self) -> GateState {
        match self.provider.get_session().await {
            Ok(Some(session)) => {
                info!(
                    user_id = session.user.as_ref().map(|u| u.id.as_str()).unwrap_or("unknown"),
                    "Existing session found"
                );
                GateState::Authenticated(session)
            }
            Ok(None) => {
                info!("No session, routing to sign-up");
                GateState::Unauthenticated
            }
            Err(e) => {
                log_error(&e, "Session check failed, routing to sign-up");
                GateState::Unauthenticated
            }
        }
    }
}
