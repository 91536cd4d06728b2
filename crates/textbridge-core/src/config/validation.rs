//! Configuration validation logic.

use crate::config::types::TextBridgeConfig;
use crate::errors::ConfigError;

/// Largest accepted messaging timeout (one minute).
pub const MAX_MESSAGING_TIMEOUT_MS: u64 = 60_000;

/// Validate a TextBridgeConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - `accessibility.messaging_timeout_ms`, if set, must be within `1..=60000`
pub fn validate_config(config: &TextBridgeConfig) -> Result<(), ConfigError> {
    if let Some(timeout_ms) = config.accessibility.messaging_timeout_ms
        && !(1..=MAX_MESSAGING_TIMEOUT_MS).contains(&timeout_ms)
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "accessibility.messaging_timeout_ms must be between 1 and {} (got {})",
                MAX_MESSAGING_TIMEOUT_MS, timeout_ms
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::AccessibilityConfig;

    fn config_with_timeout(timeout_ms: Option<u64>) -> TextBridgeConfig {
        TextBridgeConfig {
            accessibility: AccessibilityConfig {
                messaging_timeout_ms: timeout_ms,
            },
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&TextBridgeConfig::default()).is_ok());
    }

    #[test]
    fn test_timeout_bounds() {
        assert!(validate_config(&config_with_timeout(Some(1))).is_ok());
        assert!(validate_config(&config_with_timeout(Some(MAX_MESSAGING_TIMEOUT_MS))).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = validate_config(&config_with_timeout(Some(0)));
        match result {
            Err(ConfigError::InvalidConfiguration { message }) => {
                assert!(message.contains("messaging_timeout_ms"));
                assert!(message.contains("got 0"));
            }
            other => panic!("Expected InvalidConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_excessive_timeout_rejected() {
        let result = validate_config(&config_with_timeout(Some(MAX_MESSAGING_TIMEOUT_MS + 1)));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidConfiguration { .. })
        ));
    }
}
