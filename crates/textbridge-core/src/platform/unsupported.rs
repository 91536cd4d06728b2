use std::time::Duration;

use super::errors::AxError;
use super::traits::AccessibilityApi;
use super::types::{ElementAttribute, ValueAttribute};

/// No accessibility handle can exist on this platform.
#[derive(Debug)]
pub enum UnsupportedElement {}

#[derive(Debug)]
pub enum UnsupportedValue {}

/// Backend for platforms without a supported accessibility subsystem.
///
/// The process is never trusted, so every operation stops at the permission check.
#[derive(Debug, Clone, Default)]
pub struct SystemAccessibility {
    messaging_timeout: Option<Duration>,
}

impl SystemAccessibility {
    pub fn new(messaging_timeout: Option<Duration>) -> Self {
        Self { messaging_timeout }
    }

    pub fn messaging_timeout(&self) -> Option<Duration> {
        self.messaging_timeout
    }
}

impl AccessibilityApi for SystemAccessibility {
    type Element = UnsupportedElement;
    type Value = UnsupportedValue;

    fn is_process_trusted(&self) -> bool {
        false
    }

    fn system_wide(&self) -> Result<UnsupportedElement, AxError> {
        Err(AxError::ApiDisabled)
    }

    fn copy_element_attribute(
        &self,
        element: &UnsupportedElement,
        _attribute: ElementAttribute,
    ) -> Result<UnsupportedElement, AxError> {
        match *element {}
    }

    fn copy_value_attribute(
        &self,
        element: &UnsupportedElement,
        _attribute: ValueAttribute,
    ) -> Result<UnsupportedValue, AxError> {
        match *element {}
    }

    fn value_to_text(&self, value: &UnsupportedValue) -> Option<String> {
        match *value {}
    }

    fn text_to_value(&self, _text: &str) -> Option<UnsupportedValue> {
        None
    }

    fn set_value_attribute(
        &self,
        element: &UnsupportedElement,
        _attribute: ValueAttribute,
        _value: &UnsupportedValue,
    ) -> Result<(), AxError> {
        match *element {}
    }
}
