use tracing::debug;

use super::errors::SelectionError;
use crate::platform::{AccessibilityApi, ValueAttribute};

/// Read the selected text of a focused element.
///
/// A missing range or missing text is reported as `NoSelection`; an empty
/// selection is `Ok("")`. The range handle is held until the text has been
/// copied and both are released before returning.
pub fn read_selection<A: AccessibilityApi>(
    api: &A,
    element: &A::Element,
) -> Result<String, SelectionError> {
    let _range = api
        .copy_value_attribute(element, ValueAttribute::SelectedTextRange)
        .map_err(|source| SelectionError::NoSelection { source })?;

    let value = api
        .copy_value_attribute(element, ValueAttribute::SelectedText)
        .map_err(|source| SelectionError::NoSelection { source })?;

    let text = api.value_to_text(&value).ok_or(SelectionError::NotText)?;

    debug!(event = "core.selection.read_decoded", text_len = text.len());

    Ok(text)
}

/// Replace the selection of a focused element by setting its selected text.
///
/// One direct attempt. When the element rejects it the error is returned as
/// `UnsupportedMutation` and no alternate strategy is tried.
pub fn write_selection<A: AccessibilityApi>(
    api: &A,
    element: &A::Element,
    text: &str,
) -> Result<(), SelectionError> {
    let value = api
        .text_to_value(text)
        .ok_or(SelectionError::EncodingFailed)?;

    api.set_value_attribute(element, ValueAttribute::SelectedText, &value)
        .map_err(|source| SelectionError::UnsupportedMutation { source })?;

    debug!(event = "core.selection.write_applied", text_len = text.len());

    Ok(())
}
