// --- File: crates/bazaar_session/src/storage.rs ---
use bazaar_common::{BazaarError, Session};
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Reads the persisted session. A missing file means nobody is signed in.
pub async fn load_session_file(path: impl AsRef<Path>) -> Result<Option<Session>, BazaarError> {
    let path = path.as_ref();
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No stored session");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Writes the session, creating parent directories as needed.
pub async fn save_session_file(path: impl AsRef<Path>, session: &Session) -> Result<(), BazaarError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, serde_json::to_vec_pretty(session)?).await?;
    Ok(())
}
