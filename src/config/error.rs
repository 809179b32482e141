//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid host address: {0}")]
    InvalidHost(String),

    #[error("Invalid log format: {0} (expected \"pretty\" or \"json\")")]
    InvalidLogFormat(String),

    #[error("Invalid AI base URL format")]
    InvalidBaseUrl,

    #[error("Invalid AI request timeout")]
    InvalidTimeout,

    #[error("Extraction turn threshold must be at least 1")]
    InvalidExtractionThreshold,

    #[error("Extraction interval must be at least 1")]
    InvalidExtractionInterval,

    #[error("Invalid temperature for {0} calls (expected 0.0..=2.0)")]
    InvalidTemperature(&'static str),

    #[error("Token budget for {0} calls must be positive")]
    InvalidTokenBudget(&'static str),
}
