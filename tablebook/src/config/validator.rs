//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::schedule::MAX_DURATION_MINUTES;

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let zero = Config { default_duration_minutes: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&zero).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns validation errors for invalid configurations.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(minutes) = config.default_duration_minutes {
            if minutes == 0 || minutes > MAX_DURATION_MINUTES {
                return Err(Error::Validation {
                    field: "default_duration_minutes".into(),
                    message: format!("Must be between 1 and {MAX_DURATION_MINUTES}"),
                });
            }
        }

        // Validate lock timeout
        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        Ok(())
    }
}
