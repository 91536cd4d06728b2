//! # Configuration System
//!
//! Hierarchical TOML configuration for textbridge.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.textbridge/config.toml` (global user preferences)
//! 3. **Project config** - `./.textbridge/config.toml` (directory-specific overrides)
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.textbridge/config.toml
//! [accessibility]
//! messaging_timeout_ms = 1000
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use textbridge_core::config::TextBridgeConfig;
//!
//! fn example() -> Result<(), textbridge_core::errors::ConfigError> {
//!     let config = TextBridgeConfig::load_hierarchy()?;
//!     let timeout = config.accessibility.messaging_timeout();
//!     Ok(())
//! }
//! ```

pub mod loading;
pub mod types;
pub mod validation;

pub use types::{AccessibilityConfig, TextBridgeConfig};
pub use validation::{MAX_MESSAGING_TIMEOUT_MS, validate_config};

impl TextBridgeConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
