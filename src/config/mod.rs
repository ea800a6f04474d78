//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TALENT_SCOUT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use talent_scout::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod ai;
mod error;
mod interview;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use interview::InterviewConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Language model endpoint
    #[serde(default)]
    pub ai: AiConfig,

    /// Interview flow settings
    #[serde(default)]
    pub interview: InterviewConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TALENT_SCOUT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TALENT_SCOUT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TALENT_SCOUT__AI__API_KEY=...` -> `ai.api_key = ...`
    /// - `TALENT_SCOUT__INTERVIEW__TERMINATION_COMMAND=/quit`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TALENT_SCOUT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.interview.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "TALENT_SCOUT__AI__API_KEY",
        "TALENT_SCOUT__SERVER__PORT",
        "TALENT_SCOUT__SERVER__ENVIRONMENT",
        "TALENT_SCOUT__INTERVIEW__TERMINATION_COMMAND",
        "TALENT_SCOUT__INTERVIEW__TRANSLATION_ENABLED",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("TALENT_SCOUT__AI__API_KEY", "gsk_xxx");
        env::set_var("TALENT_SCOUT__SERVER__PORT", "9000");
        env::set_var("TALENT_SCOUT__INTERVIEW__TERMINATION_COMMAND", "/quit");
        env::set_var("TALENT_SCOUT__INTERVIEW__TRANSLATION_ENABLED", "false");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.api_key.as_deref(), Some("gsk_xxx"));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.interview.termination_command, "/quit");
        assert!(!config.interview.translation_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.interview.termination_command, "/bye");
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("AI__API_KEY"))
        );
    }

    #[test]
    fn test_production_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("TALENT_SCOUT__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }
}
