use tracing::debug;

use super::errors::FocusError;
use super::types::{FocusLevel, FocusedElement};
use crate::platform::{AccessibilityApi, ElementAttribute};

/// Walk the accessibility tree from the system-wide root to the focused element.
///
/// Strictly sequential with no retries: the first missing link ends the call.
/// Handles acquired before a failure are dropped on the early return, so a
/// broken chain never leaks a reference into the target application.
pub fn resolve_focused_element<A: AccessibilityApi>(
    api: &A,
) -> Result<FocusedElement<A::Element>, FocusError> {
    debug!(event = "core.focus.resolve_started");

    let system_wide = api
        .system_wide()
        .map_err(|source| FocusError::SystemWideUnavailable { source })
        .inspect_err(log_unresolved)?;

    let application = copy_link(
        api,
        &system_wide,
        ElementAttribute::FocusedApplication,
        FocusLevel::Application,
    )?;
    let window = copy_link(
        api,
        &application,
        ElementAttribute::FocusedWindow,
        FocusLevel::Window,
    )?;
    let element = copy_link(
        api,
        &window,
        ElementAttribute::FocusedUIElement,
        FocusLevel::Element,
    )?;

    debug!(event = "core.focus.resolve_completed");

    Ok(FocusedElement::new(system_wide, application, window, element))
}

fn copy_link<A: AccessibilityApi>(
    api: &A,
    parent: &A::Element,
    attribute: ElementAttribute,
    level: FocusLevel,
) -> Result<A::Element, FocusError> {
    api.copy_element_attribute(parent, attribute)
        .map_err(|source| FocusError::at(level, source))
        .inspect_err(log_unresolved)
}

fn log_unresolved(error: &FocusError) {
    debug!(
        event = "core.focus.resolve_failed",
        level = ?error.level(),
        ax_code = error.ax_error().code(),
        error = %error
    );
}
