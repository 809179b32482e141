//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PATIENT_INTAKE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use patient_intake::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod ai;
mod error;
mod intake;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use intake::{GenerationProfile, IntakeConfig};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Hosted model configuration (access token, model, endpoint)
    #[serde(default)]
    pub ai: AiConfig,

    /// Dialogue policy (extraction threshold, sampling profiles)
    #[serde(default)]
    pub intake: IntakeConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PATIENT_INTAKE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PATIENT_INTAKE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PATIENT_INTAKE__AI__API_KEY=...` -> `ai.api_key = ...`
    /// - `PATIENT_INTAKE__INTAKE__EXTRACTION_TURN_THRESHOLD=8`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PATIENT_INTAKE")
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
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.intake.validate()?;
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

    const VARS: &[&str] = &[
        "PATIENT_INTAKE__AI__API_KEY",
        "PATIENT_INTAKE__AI__MODEL",
        "PATIENT_INTAKE__SERVER__PORT",
        "PATIENT_INTAKE__SERVER__ENVIRONMENT",
        "PATIENT_INTAKE__INTAKE__EXTRACTION_TURN_THRESHOLD",
        "PATIENT_INTAKE__INTAKE__EXTRACTION_INTERVAL",
    ];

    fn set_minimal_env() {
        env::set_var("PATIENT_INTAKE__AI__API_KEY", "gsk_test");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.ai.api_key.as_deref(), Some("gsk_test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.ai.model, "llama-3.3-70b-versatile");
        assert_eq!(config.intake.extraction_turn_threshold, 10);
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("AI__API_KEY"))
        );
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PATIENT_INTAKE__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }

    #[test]
    fn test_custom_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PATIENT_INTAKE__SERVER__PORT", "3000");
        env::set_var("PATIENT_INTAKE__AI__MODEL", "llama-3.1-8b-instant");
        env::set_var("PATIENT_INTAKE__INTAKE__EXTRACTION_TURN_THRESHOLD", "8");
        env::set_var("PATIENT_INTAKE__INTAKE__EXTRACTION_INTERVAL", "2");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.ai.model, "llama-3.1-8b-instant");
        assert_eq!(config.intake.extraction_turn_threshold, 8);
        assert_eq!(config.intake.extraction_interval, 2);
    }
}
