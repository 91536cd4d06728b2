//! textbridge-core: Read and replace the focused application's text selection
//!
//! Talks to the operating system's accessibility subsystem to find the UI
//! element that currently has keyboard focus and to read or overwrite its
//! selected text. Used by the `textbridge` CLI and by any host that embeds it.
//!
//! # Main Entry Points
//!
//! - [`bridge`] - Permission check, focus resolution and selection access in one call
//! - [`permission`] - Whether the process is trusted for accessibility
//! - [`focus`] - Resolve system → application → window → element
//! - [`selection`] - Read or write the selected text of a focused element
//! - [`platform`] - The accessibility backend seam and the per-OS implementation
//! - [`config`] - Configuration management
//!
//! The crate-root functions never fail: a read that cannot be satisfied yields
//! `""` and a write that cannot be applied yields `false`, so the caller can
//! fall back to its own strategy (for example clipboard paste).

pub mod bridge;
pub mod config;
pub mod errors;
pub mod events;
pub mod focus;
pub mod logging;
pub mod permission;
pub mod platform;
pub mod selection;

// Re-export commonly used types at crate root for convenience
pub use bridge::{OperationError, SelectionBridge};
pub use config::TextBridgeConfig;
pub use focus::{FocusError, FocusLevel, FocusedElement};
pub use platform::{AccessibilityApi, AxError, SystemAccessibility};
pub use selection::SelectionError;

// Re-export handler modules as the primary API
pub use bridge::handler as bridge_ops;
pub use focus::handler as focus_ops;
pub use selection::handler as selection_ops;

// Re-export logging initialization
pub use logging::init_logging;

/// Whether this process may use the accessibility subsystem. Never cached.
pub fn has_accessibility_permission() -> bool {
    SelectionBridge::system().has_accessibility_permission()
}

/// Selected text of the focused element, or `""` if none can be obtained.
pub fn get_selected_text() -> String {
    SelectionBridge::system().get_selected_text()
}

/// Replace the focused element's selection. `false` means nothing was changed.
pub fn replace_selected_text(new_text: &str) -> bool {
    SelectionBridge::system().replace_selected_text(new_text)
}
