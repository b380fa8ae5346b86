//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `TABLEBOOK_*` environment variables
//! that override configuration file values.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;

/// Handles environment variable overrides for configuration.
///
/// | Variable | Field |
/// |----------|-------|
/// | `TABLEBOOK_DEFAULT_DURATION_MINUTES` | `default_duration_minutes` |
/// | `TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS` | `maximum_lock_wait_seconds` |
/// | `TABLEBOOK_OUTPUT_FORMAT` | `output_format` |
/// | `TABLEBOOK_DISABLE_AUTOINIT` | `disable_autoinit` |
///
/// # Examples
///
/// ```no_run
/// use tablebook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., non-numeric duration, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        // TABLEBOOK_DEFAULT_DURATION_MINUTES
        if let Ok(minutes) = env::var("TABLEBOOK_DEFAULT_DURATION_MINUTES") {
            config.default_duration_minutes =
                Some(minutes.trim().parse().map_err(|_| Error::Validation {
                    field: "TABLEBOOK_DEFAULT_DURATION_MINUTES".into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        // TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS
        if let Ok(seconds) = env::var("TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: "TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS".into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        // TABLEBOOK_OUTPUT_FORMAT
        if let Ok(format) = env::var("TABLEBOOK_OUTPUT_FORMAT") {
            config.output_format =
                Some(OutputFormat::parse(&format).ok_or_else(|| Error::Validation {
                    field: "TABLEBOOK_OUTPUT_FORMAT".into(),
                    message: format!("Unknown format '{format}' (expected table, json, csv or tsv)"),
                })?);
        }

        // TABLEBOOK_DISABLE_AUTOINIT
        if let Ok(val) = env::var("TABLEBOOK_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("TABLEBOOK_DISABLE_AUTOINIT", &val)?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
