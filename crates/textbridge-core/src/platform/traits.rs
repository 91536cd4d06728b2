//! Accessibility backend trait definition.

use crate::platform::errors::AxError;
use crate::platform::types::{ElementAttribute, ValueAttribute};

/// Interface to the OS accessibility subsystem.
///
/// Handles are scoped resources: every `Element` and `Value` returned by this
/// trait is owned by the caller and released when dropped. Implementations
/// must never hand out a borrowed (+0) reference as an owned handle.
pub trait AccessibilityApi {
    /// Owned handle to an accessibility element.
    type Element;

    /// Owned handle to an attribute value.
    type Value;

    /// Whether the process is trusted for assistive access.
    ///
    /// Must be a fresh query; trust can be granted or revoked at any time.
    fn is_process_trusted(&self) -> bool;

    /// Acquire the system-wide root element.
    fn system_wide(&self) -> Result<Self::Element, AxError>;

    /// Copy an element-valued attribute.
    ///
    /// A successful call that yields no value returns `AxError::NoValue`.
    fn copy_element_attribute(
        &self,
        element: &Self::Element,
        attribute: ElementAttribute,
    ) -> Result<Self::Element, AxError>;

    /// Copy a value attribute of a text element.
    fn copy_value_attribute(
        &self,
        element: &Self::Element,
        attribute: ValueAttribute,
    ) -> Result<Self::Value, AxError>;

    /// Decode a value to UTF-8 text.
    ///
    /// # Returns
    /// * `Some(text)` - The value is a string (possibly empty)
    /// * `None` - The value is not a string
    fn value_to_text(&self, value: &Self::Value) -> Option<String>;

    /// Encode text to the platform string representation.
    ///
    /// Returns `None` when the text cannot be represented.
    fn text_to_value(&self, text: &str) -> Option<Self::Value>;

    /// Set a value attribute on a text element.
    fn set_value_attribute(
        &self,
        element: &Self::Element,
        attribute: ValueAttribute,
        value: &Self::Value,
    ) -> Result<(), AxError>;
}
