//! Session handling for the Bazaar app.
//!
//! * [`gate`]: the startup gate deciding between the home flow and sign-up.
//! * [`provider`]: the Supabase Auth implementation of [`AuthProvider`].
//! * [`refresh`]: process-wide auto-refresh bound to foreground/background.
//! * [`storage`]: the on-disk copy of the signed-in session.
//!
//! [`AuthProvider`]: bazaar_common::AuthProvider

pub mod gate;
pub mod provider;
pub mod refresh;
pub mod storage;

pub use gate::{EntryRoute, GateState, SessionGate};
pub use provider::SupabaseAuthProvider;
pub use refresh::{AppState, AutoRefresh};
pub use storage::{load_session_file, save_session_file};
