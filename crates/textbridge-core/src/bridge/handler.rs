use tracing::{debug, info, warn};

use super::errors::OperationError;
use crate::config::TextBridgeConfig;
use crate::errors::TextBridgeError;
use crate::focus::resolve_focused_element;
use crate::permission;
use crate::platform::{AccessibilityApi, SystemAccessibility};
use crate::selection::{SelectionError, read_selection, write_selection};

/// Reads and replaces the text selection of the focused application.
///
/// Every call runs permission check → focus resolution → selection access from
/// scratch; nothing is cached between calls because focus and trust can change
/// at any time. Calls block until the target application answers.
#[derive(Debug, Clone, Default)]
pub struct SelectionBridge<A> {
    api: A,
}

impl SelectionBridge<SystemAccessibility> {
    /// Bridge over the OS accessibility subsystem with default settings.
    pub fn system() -> Self {
        Self::new(SystemAccessibility::default())
    }

    pub fn from_config(config: &TextBridgeConfig) -> Self {
        Self::new(SystemAccessibility::from_config(config))
    }
}

impl<A: AccessibilityApi> SelectionBridge<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn has_accessibility_permission(&self) -> bool {
        permission::has_accessibility_permission(&self.api)
    }

    /// Selected text of the focused element, or `""` on any failure.
    pub fn get_selected_text(&self) -> String {
        self.try_get_selected_text().unwrap_or_default()
    }

    /// Replace the focused element's selection. `false` means the caller should fall back.
    pub fn replace_selected_text(&self, new_text: &str) -> bool {
        self.try_replace_selected_text(new_text).is_ok()
    }

    /// Selected text of the focused element with the failure reason kept.
    ///
    /// An element without a selection yields `Ok("")`.
    pub fn try_get_selected_text(&self) -> Result<String, OperationError> {
        info!(event = "core.bridge.read_started");

        let result = self.read_focused();
        match &result {
            Ok(text) => info!(event = "core.bridge.read_completed", text_len = text.len()),
            Err(e) => log_failure("core.bridge.read_failed", e),
        }
        result
    }

    /// Replace the focused element's selection with the failure reason kept.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Selection(SelectionError::UnsupportedMutation)` when the
    /// element exposes no settable selection; the caller owns any fallback.
    pub fn try_replace_selected_text(&self, new_text: &str) -> Result<(), OperationError> {
        info!(
            event = "core.bridge.replace_started",
            text_len = new_text.len()
        );

        let result = self.write_focused(new_text);
        match &result {
            Ok(()) => info!(event = "core.bridge.replace_completed"),
            Err(e) => log_failure("core.bridge.replace_failed", e),
        }
        result
    }

    fn require_permission(&self) -> Result<(), OperationError> {
        if self.has_accessibility_permission() {
            Ok(())
        } else {
            Err(OperationError::PermissionDenied)
        }
    }

    fn read_focused(&self) -> Result<String, OperationError> {
        self.require_permission()?;
        let focused = resolve_focused_element(&self.api)?;

        match read_selection(&self.api, focused.element()) {
            Ok(text) => Ok(text),
            Err(SelectionError::NoSelection { source }) => {
                debug!(
                    event = "core.bridge.read_no_selection",
                    ax_code = source.code()
                );
                Ok(String::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_focused(&self, new_text: &str) -> Result<(), OperationError> {
        self.require_permission()?;
        let focused = resolve_focused_element(&self.api)?;
        write_selection(&self.api, focused.element(), new_text)?;
        Ok(())
    }
}

fn log_failure(event: &'static str, error: &OperationError) {
    if error.is_user_error() {
        info!(
            event = event,
            error_code = error.error_code(),
            error = %error
        );
    } else {
        warn!(
            event = event,
            error_code = error.error_code(),
            error = %error
        );
    }
}
