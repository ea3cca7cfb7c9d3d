use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use tracing::debug;

pub mod env_vars;
pub mod models;

pub use models::*;

/// Loads the layered application configuration.
///
/// Sources, later ones winning:
/// 1. `config/default` (optional, any format the `config` crate understands)
/// 2. `config/{RUN_ENV}` (optional, `RUN_ENV` defaults to `debug`)
/// 3. `BAZAAR__*` environment variables
/// 4. `SUPABASE_URL`, `SUPABASE_SERVICE_ROLE_KEY`, `SUPABASE_ANON_KEY`
///
/// Missing backend credentials are not an error here; the handlers that need
/// them report it per request.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("BAZAAR_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let prefix = env_vars::get_config_prefix();

    let builder = Config::builder()
        .add_source(File::with_name(&format!("{config_dir}/default")).required(false))
        .add_source(File::with_name(&format!("{config_dir}/{run_env}")).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .prefix_separator(env_vars::CONFIG_SEPARATOR)
                .separator(env_vars::CONFIG_SEPARATOR),
        );

    debug!(%run_env, %config_dir, "loading configuration");

    let mut config: AppConfig = builder.build()?.try_deserialize()?;
    env_vars::apply_backend_env(&mut config.backend);
    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `DOTENV_OVERRIDE` if set, otherwise `.env`. Loading happens at
/// most once per process; a missing file is not an error. Returns the path
/// that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize_from_empty_source() {
        let config: AppConfig = Config::builder()
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("empty config should deserialize");

        assert_eq!(config.server.port, 8086);
        assert!(!config.confirmation.persistence_enabled);
        assert_eq!(config.confirmation.table, "payments");
        assert_eq!(config.session.refresh_interval_secs, 60);
        assert!(config.backend.base_url().is_none());
    }

    #[test]
    fn test_toml_source_overrides_defaults() {
        let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [backend]
            url = "https://abc.supabase.co/"

            [confirmation]
            persistence_enabled = true
        "#;
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("toml config should deserialize");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.backend.base_url(), Some("https://abc.supabase.co"));
        assert!(config.confirmation.persistence_enabled);
        assert_eq!(config.confirmation.table, "payments");
    }

    #[test]
    fn test_partial_server_section_keeps_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str("[server]\nport = 9100\n", config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("partial server section should deserialize");

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_session_refresh_interval() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(
                "[session]\nrefresh_interval_secs = 15\n",
                config::FileFormat::Toml,
            ))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("session section should deserialize");
        assert_eq!(config.session.refresh_interval(), std::time::Duration::from_secs(15));

        let zero = SessionConfig {
            refresh_interval_secs: 0,
            session_file: None,
        };
        assert_eq!(zero.refresh_interval(), std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_blank_credentials_count_as_missing() {
        let backend = BackendConfig {
            url: Some("  ".to_string()),
            service_role_key: Some(String::new()),
            anon_key: None,
        };
        assert!(backend.base_url().is_none());
        assert!(backend.service_role_key().is_none());
    }
}
