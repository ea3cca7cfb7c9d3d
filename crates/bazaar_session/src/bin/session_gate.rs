// File: crates/bazaar_session/src/bin/session_gate.rs
//! Runs the startup session gate against the configured Supabase project and
//! prints the entry route the app would open.
//!
//! With `--watch`, an authenticated session is kept fresh in the background
//! (as while the app is in the foreground) until Ctrl-C.

use bazaar_common::{config_error, logging, BazaarError};
use bazaar_config::load_config;
use bazaar_session::{
    save_session_file, AppState, AutoRefresh, GateState, SessionGate, SupabaseAuthProvider,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), BazaarError> {
    logging::init();
    let config = load_config().map_err(config_error)?;
    let watch = std::env::args().skip(1).any(|arg| arg == "--watch");

    let session_file = config.session.session_file.as_deref();
    let mut provider = SupabaseAuthProvider::from_config(&config.backend, None)?;
    if let Some(path) = session_file {
        provider = provider.with_session_file(path);
    }
    let provider = Arc::new(provider);

    let gate = SessionGate::mount(provider.clone());
    info!("Checking for an existing session");
    let state = gate.resolve().await;

    if let Some(route) = state.route() {
        println!("{}", route);
    }

    if watch && matches!(state, GateState::Authenticated(_)) {
        let refresher = AutoRefresh::global();
        refresher.on_app_state_change(AppState::Active, provider.clone(), &config.session);
        info!("Refreshing the session in the background, press Ctrl-C to stop");
        tokio::signal::ctrl_c().await?;
        refresher.on_app_state_change(AppState::Background, provider.clone(), &config.session);
    }

    // Keep refreshed tokens for the next start.
    if let (Some(session), Some(path)) = (provider.stored_session().await, session_file) {
        save_session_file(path, &session).await?;
    }
    Ok(())
}
