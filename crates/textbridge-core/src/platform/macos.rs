use std::ptr;
use std::time::Duration;

use accessibility_sys::{
    AXIsProcessTrusted, AXUIElementCopyAttributeValue, AXUIElementCreateSystemWide,
    AXUIElementGetTypeID, AXUIElementRef, AXUIElementSetAttributeValue,
    AXUIElementSetMessagingTimeout, kAXFocusedApplicationAttribute, kAXFocusedUIElementAttribute,
    kAXFocusedWindowAttribute, kAXSelectedTextAttribute, kAXSelectedTextRangeAttribute,
};
use core_foundation::base::{
    Boolean, CFGetTypeID, CFIndex, CFRange, CFRelease, CFType, CFTypeRef, TCFType,
    kCFAllocatorDefault,
};
use core_foundation::string::{
    CFString, CFStringCreateWithBytes, CFStringGetBytes, CFStringRef, kCFStringEncodingUTF8,
};
use tracing::{debug, warn};

use super::errors::AxError;
use super::traits::AccessibilityApi;
use super::types::{ElementAttribute, ValueAttribute};

/// Worst-case UTF-8 bytes produced per UTF-16 code unit.
const UTF8_BYTES_PER_CODE_UNIT: usize = 4;

/// Owned AXUIElementRef (+1 retained). Released on drop.
#[derive(Debug)]
pub struct AxElement(AXUIElementRef);

impl Drop for AxElement {
    fn drop(&mut self) {
        // SAFETY: self.0 is non-null and was obtained under the Create/Copy Rule,
        // so this guard owns exactly one reference.
        unsafe { CFRelease(self.0 as CFTypeRef) };
    }
}

/// Owned attribute value. `CFType` releases it on drop.
#[derive(Debug)]
pub struct AxValue(CFType);

/// Accessibility backend over the macOS Accessibility API.
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

fn element_attribute_name(attribute: ElementAttribute) -> &'static str {
    match attribute {
        ElementAttribute::FocusedApplication => kAXFocusedApplicationAttribute,
        ElementAttribute::FocusedWindow => kAXFocusedWindowAttribute,
        ElementAttribute::FocusedUIElement => kAXFocusedUIElementAttribute,
    }
}

fn value_attribute_name(attribute: ValueAttribute) -> &'static str {
    match attribute {
        ValueAttribute::SelectedText => kAXSelectedTextAttribute,
        ValueAttribute::SelectedTextRange => kAXSelectedTextRangeAttribute,
    }
}

/// Copy an attribute, taking ownership of whatever the call returned.
fn copy_attribute(element: AXUIElementRef, attribute: &str) -> Result<CFType, AxError> {
    let cf_attr = CFString::new(attribute);
    let mut value: CFTypeRef = ptr::null();

    // SAFETY: Standard AXUIElementCopyAttributeValue call (Copy Rule: +1 retained ref).
    let status = unsafe {
        AXUIElementCopyAttributeValue(element, cf_attr.as_concrete_TypeRef(), &mut value)
    };

    // SAFETY: value, if set, is a +1 retained CFTypeRef. wrap_under_create_rule takes
    // ownership so it is released even when the status reports a failure.
    let owned = (!value.is_null()).then(|| unsafe { CFType::wrap_under_create_rule(value) });

    AxError::check(status)?;
    owned.ok_or(AxError::NoValue)
}

impl AccessibilityApi for SystemAccessibility {
    type Element = AxElement;
    type Value = AxValue;

    fn is_process_trusted(&self) -> bool {
        // SAFETY: AXIsProcessTrusted has no preconditions and returns false when the
        // process lacks accessibility permissions.
        unsafe { AXIsProcessTrusted() }
    }

    fn system_wide(&self) -> Result<AxElement, AxError> {
        // SAFETY: AXUIElementCreateSystemWide creates a +1 retained AXUIElementRef.
        let element = unsafe { AXUIElementCreateSystemWide() };
        if element.is_null() {
            return Err(AxError::Failure);
        }
        let element = AxElement(element);

        if let Some(timeout) = self.messaging_timeout {
            // SAFETY: element.0 is a valid AXUIElementRef we just created. Setting the
            // timeout on the system-wide element applies it to every element.
            let status =
                unsafe { AXUIElementSetMessagingTimeout(element.0, timeout.as_secs_f32()) };
            if let Err(e) = AxError::check(status) {
                warn!(
                    event = "core.platform.macos.messaging_timeout_failed",
                    timeout_ms = timeout.as_millis() as u64,
                    error = %e
                );
            }
        }

        Ok(element)
    }

    fn copy_element_attribute(
        &self,
        element: &AxElement,
        attribute: ElementAttribute,
    ) -> Result<AxElement, AxError> {
        let value = copy_attribute(element.0, element_attribute_name(attribute))?;

        // SAFETY: CFGetTypeID accepts any valid CFTypeRef.
        if unsafe { CFGetTypeID(value.as_CFTypeRef()) } != unsafe { AXUIElementGetTypeID() } {
            debug!(
                event = "core.platform.macos.unexpected_value_type",
                attribute = attribute.name()
            );
            return Err(AxError::IllegalArgument);
        }

        // Transfer the reference from the CFType guard to the element guard.
        let raw = value.as_CFTypeRef() as AXUIElementRef;
        std::mem::forget(value);
        Ok(AxElement(raw))
    }

    fn copy_value_attribute(
        &self,
        element: &AxElement,
        attribute: ValueAttribute,
    ) -> Result<AxValue, AxError> {
        copy_attribute(element.0, value_attribute_name(attribute)).map(AxValue)
    }

    fn value_to_text(&self, value: &AxValue) -> Option<String> {
        if !value.0.instance_of::<CFString>() {
            return None;
        }
        // SAFETY: the value was checked to be a CFString; get rule retains it for the
        // lifetime of the wrapper and AxValue keeps its own reference.
        let string = unsafe { CFString::wrap_under_get_rule(value.0.as_CFTypeRef() as CFStringRef) };
        Some(cf_string_to_utf8(&string))
    }

    fn text_to_value(&self, text: &str) -> Option<AxValue> {
        utf8_to_cf_string(text).map(|s| AxValue(s.as_CFType()))
    }

    fn set_value_attribute(
        &self,
        element: &AxElement,
        attribute: ValueAttribute,
        value: &AxValue,
    ) -> Result<(), AxError> {
        let cf_attr = CFString::new(value_attribute_name(attribute));

        // SAFETY: element and value are valid owned references for the duration of the call.
        let status = unsafe {
            AXUIElementSetAttributeValue(
                element.0,
                cf_attr.as_concrete_TypeRef(),
                value.0.as_CFTypeRef(),
            )
        };
        AxError::check(status)
    }
}

/// Decode a CFString to UTF-8.
///
/// The buffer is sized for the worst case and truncated to the bytes actually
/// produced, so characters outside the BMP and embedded NULs survive intact.
pub(crate) fn cf_string_to_utf8(string: &CFString) -> String {
    let length: CFIndex = string.char_len();
    if length <= 0 {
        return String::new();
    }

    let capacity = length as usize * UTF8_BYTES_PER_CODE_UNIT;
    let mut buffer = vec![0u8; capacity];
    let mut used: CFIndex = 0;

    // SAFETY: buffer has `capacity` writable bytes and the range covers the string.
    let converted = unsafe {
        CFStringGetBytes(
            string.as_concrete_TypeRef(),
            CFRange::init(0, length),
            kCFStringEncodingUTF8,
            0,
            false as Boolean,
            buffer.as_mut_ptr(),
            capacity as CFIndex,
            &mut used,
        )
    };

    if converted < length {
        warn!(
            event = "core.platform.macos.decode_truncated",
            code_units = length,
            converted = converted
        );
    }

    buffer.truncate(used.max(0) as usize);
    match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Encode UTF-8 text as a CFString. Returns `None` if CoreFoundation rejects it.
pub(crate) fn utf8_to_cf_string(text: &str) -> Option<CFString> {
    let bytes = text.as_bytes();

    // SAFETY: bytes is a valid slice for the duration of the call; the result is a
    // +1 retained CFStringRef or null.
    let raw = unsafe {
        CFStringCreateWithBytes(
            kCFAllocatorDefault,
            bytes.as_ptr(),
            bytes.len() as CFIndex,
            kCFStringEncodingUTF8,
            false as Boolean,
        )
    };
    if raw.is_null() {
        return None;
    }
    // SAFETY: raw is a non-null +1 retained CFStringRef we own.
    Some(unsafe { CFString::wrap_under_create_rule(raw) })
}
