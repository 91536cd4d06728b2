pub mod errors;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
mod unsupported;
#[cfg(target_os = "windows")]
mod windows;

pub use errors::AxError;
pub use traits::AccessibilityApi;
pub use types::{ElementAttribute, ValueAttribute};

#[cfg(target_os = "macos")]
pub use macos::{AxElement, AxValue, SystemAccessibility};
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub use unsupported::{SystemAccessibility, UnsupportedElement, UnsupportedValue};
#[cfg(target_os = "windows")]
pub use self::windows::{SystemAccessibility, UiaElement, UiaValue};

use crate::config::TextBridgeConfig;

impl SystemAccessibility {
    /// Build the system backend from loaded configuration.
    pub fn from_config(config: &TextBridgeConfig) -> Self {
        Self::new(config.accessibility.messaging_timeout())
    }
}
