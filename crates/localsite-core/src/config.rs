use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Footer size used by the generated site template.
pub const DEFAULT_FOOTER_COUNT: &str = "11";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("LOCALSITE_ENV", "development"));
    let log_level = or_default("LOCALSITE_LOG_LEVEL", "info");
    let business_path = PathBuf::from(or_default(
        "LOCALSITE_BUSINESS_PATH",
        "./config/business.yaml",
    ));
    let suburbs_path = PathBuf::from(or_default(
        "LOCALSITE_SUBURBS_PATH",
        "./src/data/suburbs.json",
    ));

    let footer_count = parse_usize("LOCALSITE_FOOTER_COUNT", DEFAULT_FOOTER_COUNT)?;
    if footer_count == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LOCALSITE_FOOTER_COUNT".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        business_path,
        suburbs_path,
        footer_count,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
