//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject level variable names the environment cannot hold
//! - Check that enabled features have what they need (watch needs a path)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LogConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::LogConfig;

/// A single semantic problem in a [`LogConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("level_env must not be empty")]
    EmptyLevelEnv,

    #[error("level_env '{0}' is not a valid environment variable name")]
    InvalidLevelEnv(String),

    #[error("text.timestamp_format must not be empty when timestamps are enabled")]
    EmptyTimestampFormat,

    #[error("text.prefix_field must not be empty")]
    EmptyPrefixField,

    #[error("translations.watch requires translations.path")]
    WatchWithoutPath,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &LogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.level_env.is_empty() {
        errors.push(ValidationError::EmptyLevelEnv);
    } else if config.level_env.contains(['=', '\0']) {
        errors.push(ValidationError::InvalidLevelEnv(config.level_env.clone()));
    }

    if config.text.timestamps && config.text.timestamp_format.is_empty() {
        errors.push(ValidationError::EmptyTimestampFormat);
    }

    if config.text.prefix_field.is_empty() {
        errors.push(ValidationError::EmptyPrefixField);
    }

    if config.translations.watch && config.translations.path.is_none() {
        errors.push(ValidationError::WatchWithoutPath);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
