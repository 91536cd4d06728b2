//! Configuration type definitions for textbridge.
//!
//! # Example Configuration
//!
//! ```toml
//! [accessibility]
//! messaging_timeout_ms = 1000
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.textbridge/config.toml`
/// 2. Project config: `./.textbridge/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TextBridgeConfig {
    /// Accessibility subsystem settings
    #[serde(default)]
    pub accessibility: AccessibilityConfig,
}

/// Accessibility subsystem settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AccessibilityConfig {
    /// Upper bound in milliseconds for each round-trip to the target application.
    /// When unset the OS default applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_timeout_ms: Option<u64>,
}

impl AccessibilityConfig {
    pub fn messaging_timeout(&self) -> Option<Duration> {
        self.messaging_timeout_ms.map(Duration::from_millis)
    }
}

impl TextBridgeConfig {
    /// Override the messaging timeout (used for CLI flags).
    pub fn with_messaging_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        if timeout_ms.is_some() {
            self.accessibility.messaging_timeout_ms = timeout_ms;
        }
        self
    }
}
