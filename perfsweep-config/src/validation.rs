//! Configuration validation traits and utilities

use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::time::Duration;

/// Trait for validatable configuration
pub trait Validatable {
    /// Validate the configuration
    fn validate(&self) -> ConfigResult<()>;

    /// Get the domain name for error reporting
    fn domain_name(&self) -> &'static str;

    /// Helper to create a domain-specific validation error
    fn validation_error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::DomainError {
            domain: self.domain_name().to_string(),
            message: message.into(),
        }
    }
}

/// Validate a required string field
pub fn validate_required_string(value: &str, field_name: &str, domain: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} cannot be empty", field_name),
        });
    }
    Ok(())
}

/// Validate a required path field
pub fn validate_required_path(value: &Path, field_name: &str, domain: &str) -> ConfigResult<()> {
    if value.as_os_str().is_empty() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} cannot be empty", field_name),
        });
    }
    Ok(())
}

/// Validate a positive number
pub fn validate_positive<T>(value: T, field_name: &str, domain: &str) -> ConfigResult<()>
where
    T: PartialOrd + Default + std::fmt::Display,
{
    if value <= T::default() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} must be greater than 0, got {}", field_name, value),
        });
    }
    Ok(())
}

/// Validate a timeout that kubectl will receive in whole seconds
pub fn validate_timeout(value: Duration, field_name: &str, domain: &str) -> ConfigResult<()> {
    validate_positive(value.as_secs(), field_name, domain)
}

/// Validate that a template mentions every placeholder it is expected to carry
pub fn validate_placeholders(
    template: &str,
    placeholders: &[&str],
    field_name: &str,
    domain: &str,
) -> ConfigResult<()> {
    let missing: Vec<&str> = placeholders
        .iter()
        .copied()
        .filter(|p| !template.contains(p))
        .collect();

    if !missing.is_empty() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!(
                "{} is missing placeholder(s): {}",
                field_name,
                missing.join(", ")
            ),
        });
    }
    Ok(())
}
