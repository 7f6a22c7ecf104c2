//! Startup configuration loading
//!
//! Values come from environment variables first (`.env` is loaded by the
//! binary). An optional TOML file, `config.<environment>.toml` or the path in
//! `TOKENLINE_CONFIG`, overrides them key by key.

use config::{Config, ConfigError, File};

use tl_shared::config::AppConfig;

/// Load the application configuration
pub fn load() -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::from_env();
    let file = std::env::var("TOKENLINE_CONFIG")
        .unwrap_or_else(|_| defaults.environment.config_file().to_string());
    load_layered(&defaults, &file)
}

/// Overlay an optional TOML file on top of `defaults`
pub fn load_layered(defaults: &AppConfig, file: &str) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(Config::try_from(defaults)?)
        .add_source(File::with_name(file).required(false))
        .build()?
        .try_deserialize()
}
