//! Accessibility backend over Windows UI Automation.
//!
//! UI Automation has no focused-application or focused-window attribute, only a
//! process-wide focused element. The chain is rebuilt from it:
//!
//! - system-wide: the desktop root element
//! - application: the top-level child of the root that contains the focus
//! - window: the nearest `Window` control at or above the focus inside that
//!   top-level element, or the top-level element itself
//! - element: the focused element
//!
//! There is no trust registry. The process counts as trusted when UI Automation
//! can be created and its root element reached.

use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, warn};
use windows::Win32::Foundation::RPC_E_CHANGED_MODE;
use windows::Win32::System::Com::{
    CLSCTX_INPROC_SERVER, COINIT_MULTITHREADED, CoCreateInstance, CoInitializeEx, CoUninitialize,
};
use windows::Win32::UI::Accessibility::{
    CUIAutomation8, IUIAutomation, IUIAutomation2, IUIAutomationElement,
    IUIAutomationTextPattern, IUIAutomationTextRangeArray, IUIAutomationValuePattern,
    UIA_TextPatternId, UIA_ValuePatternId, UIA_WindowControlTypeId,
};
use windows::core::{BSTR, Interface};

use super::errors::AxError;
use super::traits::AccessibilityApi;
use super::types::{ElementAttribute, ValueAttribute};

/// Deepest ancestor walk accepted before giving up on a cyclic or runaway tree.
const MAX_TREE_DEPTH: usize = 256;

fn ax_error(error: windows::core::Error) -> AxError {
    AxError::from_hresult(error.code().0)
}

/// COM initialization for the calling thread, undone on drop.
#[derive(Debug)]
struct ComApartment {
    owns_init: bool,
}

impl ComApartment {
    fn enter() -> Result<Self, AxError> {
        // SAFETY: CoInitializeEx has no preconditions; every successful call is
        // balanced by CoUninitialize in Drop.
        let hr = unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) };
        if hr == RPC_E_CHANGED_MODE {
            // The host already put this thread in a single-threaded apartment.
            return Ok(Self { owns_init: false });
        }
        hr.ok().map_err(ax_error)?;
        Ok(Self { owns_init: true })
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        if self.owns_init {
            // SAFETY: balances the successful CoInitializeEx in enter().
            unsafe { CoUninitialize() };
        }
    }
}

/// Owned UI Automation element. COM releases it on drop; the apartment goes last.
#[derive(Debug)]
pub struct UiaElement {
    element: IUIAutomationElement,
    automation: IUIAutomation,
    apartment: Rc<ComApartment>,
}

impl UiaElement {
    fn sibling(&self, element: IUIAutomationElement) -> Self {
        Self {
            element,
            automation: self.automation.clone(),
            apartment: Rc::clone(&self.apartment),
        }
    }
}

/// Owned attribute value.
#[derive(Debug)]
pub struct UiaValue(ValueKind);

#[derive(Debug)]
enum ValueKind {
    Selection(IUIAutomationTextRangeArray, Rc<ComApartment>),
    Text(String),
    Encoded(BSTR),
}

/// Accessibility backend over Windows UI Automation.
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

    fn connect(&self) -> Result<UiaElement, AxError> {
        let apartment = Rc::new(ComApartment::enter()?);

        // SAFETY: COM is initialized on this thread for as long as `apartment` lives.
        let automation: IUIAutomation =
            unsafe { CoCreateInstance(&CUIAutomation8, None, CLSCTX_INPROC_SERVER) }
                .map_err(ax_error)?;

        if let Some(timeout) = self.messaging_timeout {
            apply_timeout(&automation, timeout);
        }

        // SAFETY: automation is a live IUIAutomation.
        let root = unsafe { automation.GetRootElement() }.map_err(ax_error)?;

        Ok(UiaElement {
            element: root,
            automation,
            apartment,
        })
    }
}

fn apply_timeout(automation: &IUIAutomation, timeout: Duration) {
    let timeout_ms = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);

    let result = automation
        .cast::<IUIAutomation2>()
        // SAFETY: the cast succeeded, so the object implements IUIAutomation2.
        .and_then(|automation| unsafe { automation.SetTransactionTimeout(timeout_ms) });

    if let Err(e) = result {
        warn!(
            event = "core.platform.windows.messaging_timeout_failed",
            timeout_ms = timeout_ms,
            error = %e
        );
    }
}

fn same_element(
    automation: &IUIAutomation,
    left: &IUIAutomationElement,
    right: &IUIAutomationElement,
) -> Result<bool, AxError> {
    // SAFETY: both elements are live references owned by the caller.
    let same = unsafe { automation.CompareElements(left, right) }.map_err(ax_error)?;
    Ok(same.as_bool())
}

/// The child of the desktop root that contains `focused`.
fn top_level_ancestor(
    root: &UiaElement,
    focused: IUIAutomationElement,
) -> Result<IUIAutomationElement, AxError> {
    // SAFETY: automation is a live IUIAutomation.
    let walker = unsafe { root.automation.ControlViewWalker() }.map_err(ax_error)?;

    let mut current = focused;
    for _ in 0..MAX_TREE_DEPTH {
        // SAFETY: current is a live element; a null parent (the root itself) is an error.
        let parent = unsafe { walker.GetParentElement(&current) }.map_err(ax_error)?;
        if same_element(&root.automation, &parent, &root.element)? {
            return Ok(current);
        }
        current = parent;
    }
    Err(AxError::CannotComplete)
}

/// The nearest `Window` control from `focused` up to and including `application`.
fn nearest_window(
    application: &UiaElement,
    focused: IUIAutomationElement,
) -> Result<IUIAutomationElement, AxError> {
    // SAFETY: automation is a live IUIAutomation.
    let walker = unsafe { application.automation.ControlViewWalker() }.map_err(ax_error)?;

    let mut current = focused;
    for _ in 0..MAX_TREE_DEPTH {
        // SAFETY: current is a live element.
        let control_type = unsafe { current.CurrentControlType() }.map_err(ax_error)?;
        if control_type == UIA_WindowControlTypeId
            || same_element(&application.automation, &current, &application.element)?
        {
            return Ok(current);
        }
        // SAFETY: current is a live element.
        current = unsafe { walker.GetParentElement(&current) }.map_err(ax_error)?;
    }
    Err(AxError::CannotComplete)
}

fn text_pattern(element: &IUIAutomationElement) -> Result<IUIAutomationTextPattern, AxError> {
    // SAFETY: element is a live element; an unsupported pattern comes back as an error.
    unsafe { element.GetCurrentPattern(UIA_TextPatternId) }
        .and_then(|pattern| pattern.cast::<IUIAutomationTextPattern>())
        .map_err(|_| AxError::AttributeUnsupported)
}

fn value_pattern(element: &IUIAutomationElement) -> Result<IUIAutomationValuePattern, AxError> {
    // SAFETY: element is a live element; an unsupported pattern comes back as an error.
    unsafe { element.GetCurrentPattern(UIA_ValuePatternId) }
        .and_then(|pattern| pattern.cast::<IUIAutomationValuePattern>())
        .map_err(|_| AxError::AttributeUnsupported)
}

fn selection_ranges(element: &IUIAutomationElement) -> Result<IUIAutomationTextRangeArray, AxError> {
    let pattern = text_pattern(element)?;
    // SAFETY: pattern is a live text pattern of element.
    let ranges = unsafe { pattern.GetSelection() }.map_err(ax_error)?;
    // SAFETY: ranges is a live range array.
    let count = unsafe { ranges.Length() }.map_err(ax_error)?;
    if count <= 0 {
        return Err(AxError::NoValue);
    }
    Ok(ranges)
}

/// Text of the first selected range. Multiple selections are not merged.
fn first_selected_text(element: &IUIAutomationElement) -> Result<String, AxError> {
    let ranges = selection_ranges(element)?;
    // SAFETY: the array holds at least one range.
    let range = unsafe { ranges.GetElement(0) }.map_err(ax_error)?;
    // SAFETY: range is live; -1 requests the whole range without truncation.
    let text = unsafe { range.GetText(-1) }.map_err(ax_error)?;
    Ok(text.to_string())
}

impl AccessibilityApi for SystemAccessibility {
    type Element = UiaElement;
    type Value = UiaValue;

    fn is_process_trusted(&self) -> bool {
        match self.connect() {
            Ok(_) => true,
            Err(e) => {
                debug!(
                    event = "core.platform.windows.automation_unavailable",
                    error = %e
                );
                false
            }
        }
    }

    fn system_wide(&self) -> Result<UiaElement, AxError> {
        self.connect()
    }

    fn copy_element_attribute(
        &self,
        element: &UiaElement,
        attribute: ElementAttribute,
    ) -> Result<UiaElement, AxError> {
        // SAFETY: automation is a live IUIAutomation.
        let focused = unsafe { element.automation.GetFocusedElement() }.map_err(ax_error)?;

        let resolved = match attribute {
            ElementAttribute::FocusedApplication => top_level_ancestor(element, focused)?,
            ElementAttribute::FocusedWindow => nearest_window(element, focused)?,
            ElementAttribute::FocusedUIElement => focused,
        };
        Ok(element.sibling(resolved))
    }

    fn copy_value_attribute(
        &self,
        element: &UiaElement,
        attribute: ValueAttribute,
    ) -> Result<UiaValue, AxError> {
        match attribute {
            ValueAttribute::SelectedTextRange => {
                let ranges = selection_ranges(&element.element)?;
                Ok(UiaValue(ValueKind::Selection(
                    ranges,
                    Rc::clone(&element.apartment),
                )))
            }
            ValueAttribute::SelectedText => {
                first_selected_text(&element.element).map(|text| UiaValue(ValueKind::Text(text)))
            }
        }
    }

    fn value_to_text(&self, value: &UiaValue) -> Option<String> {
        match &value.0 {
            ValueKind::Text(text) => Some(text.clone()),
            ValueKind::Encoded(text) => Some(text.to_string()),
            ValueKind::Selection(..) => None,
        }
    }

    fn text_to_value(&self, text: &str) -> Option<UiaValue> {
        Some(UiaValue(ValueKind::Encoded(BSTR::from(text))))
    }

    /// Replace the selection through the value pattern.
    ///
    /// UI Automation text ranges are read-only, so a selection can only be
    /// replaced when it covers the element's whole, writable value. Anything
    /// else is rejected with `AttributeUnsupported` so the caller can fall back.
    fn set_value_attribute(
        &self,
        element: &UiaElement,
        attribute: ValueAttribute,
        value: &UiaValue,
    ) -> Result<(), AxError> {
        if attribute != ValueAttribute::SelectedText {
            return Err(AxError::AttributeUnsupported);
        }
        let ValueKind::Encoded(text) = &value.0 else {
            return Err(AxError::IllegalArgument);
        };

        let selected = first_selected_text(&element.element)?;
        let pattern = value_pattern(&element.element)?;

        // SAFETY: pattern is a live value pattern of element.
        let read_only = unsafe { pattern.CurrentIsReadOnly() }.map_err(ax_error)?;
        if read_only.as_bool() {
            return Err(AxError::AttributeUnsupported);
        }

        // SAFETY: pattern is a live value pattern of element.
        let current = unsafe { pattern.CurrentValue() }.map_err(ax_error)?;
        if current.to_string() != selected {
            debug!(
                event = "core.platform.windows.partial_selection_unsupported",
                selected_len = selected.len(),
                value_len = current.len()
            );
            return Err(AxError::AttributeUnsupported);
        }

        // SAFETY: pattern is live and text is an owned BSTR for the duration of the call.
        unsafe { pattern.SetValue(text) }.map_err(ax_error)
    }
}
