use std::path::PathBuf;

use crate::app_config::{
    AppConfig, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_LLM_TIMEOUT_SECS, DEFAULT_MAX_TEXT_CHARS,
    DEFAULT_USER_AGENT,
};
use crate::ConfigError;

/// Fixed completions endpoint; overridable only for tests via
/// `GLOWBOX_LLM_API_URL`.
pub const DEFAULT_LLM_API_URL: &str = "https://api.deepseek.com/chat/completions";

/// Fixed completion model identifier.
pub const DEFAULT_LLM_MODEL: &str = "deepseek-chat";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if env var values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if env var values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        }
    };

    let parse_usize = |var: &str, default: usize| -> Result<usize, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => raw.parse::<usize>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        }
    };

    // Blank credentials count as absent so a stray `DEEPSEEK_API_KEY=` line
    // in a .env file does not enable the refiner.
    let llm_api_key = lookup("DEEPSEEK_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());

    let llm_api_url = or_default("GLOWBOX_LLM_API_URL", DEFAULT_LLM_API_URL);
    let llm_model = or_default("GLOWBOX_LLM_MODEL", DEFAULT_LLM_MODEL);

    let fetch_timeout_secs =
        parse_u64("GLOWBOX_FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)?;
    let llm_timeout_secs = parse_u64("GLOWBOX_LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?;
    let max_text_chars = parse_usize("GLOWBOX_MAX_TEXT_CHARS", DEFAULT_MAX_TEXT_CHARS)?;

    let user_agent = or_default("GLOWBOX_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT);
    let rules_path = lookup("GLOWBOX_RULES_PATH").ok().map(PathBuf::from);
    let log_level = or_default("GLOWBOX_LOG_LEVEL", "info");

    Ok(AppConfig {
        llm_api_key,
        llm_api_url,
        llm_model,
        fetch_timeout_secs,
        llm_timeout_secs,
        max_text_chars,
        user_agent,
        rules_path,
        log_level,
    })
}
