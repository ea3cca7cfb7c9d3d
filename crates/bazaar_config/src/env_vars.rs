//! Environment variable handling for the Bazaar backend.
//!
//! Generic settings follow the `BAZAAR__SECTION__KEY` pattern and are picked up
//! by the `config` crate. The Supabase credentials keep the names the hosted
//! platform injects into functions (`SUPABASE_URL`, ...), so they are applied
//! on top of the loaded configuration here.

use std::env;

use crate::models::BackendConfig;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "BAZAAR";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

pub const SUPABASE_URL: &str = "SUPABASE_URL";
pub const SUPABASE_SERVICE_ROLE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// # Examples
///
/// `server.host` becomes `BAZAAR__SERVER__HOST`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Overlay the platform-provided Supabase variables onto `backend`.
///
/// Returns `true` if any value was replaced.
pub fn apply_backend_env(backend: &mut BackendConfig) -> bool {
    apply_backend_overrides(backend, |key| env::var(key).ok())
}

/// Same as [`apply_backend_env`] with an injectable lookup.
pub fn apply_backend_overrides<F>(backend: &mut BackendConfig, lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let mut replaced = false;
    for (key, slot) in [
        (SUPABASE_URL, &mut backend.url),
        (SUPABASE_SERVICE_ROLE_KEY, &mut backend.service_role_key),
        (SUPABASE_ANON_KEY, &mut backend.anon_key),
    ] {
        if let Some(value) = lookup(key) {
            *slot = Some(value);
            replaced = true;
        }
    }
    replaced
}
