//! In-memory accessibility desktop used by unit tests.
//!
//! Models the system → application → window → element chain with a single text
//! field and counts live handles, so tests can assert that every handle acquired
//! during an operation has been released when it returns.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::errors::AxError;
use super::traits::AccessibilityApi;
use super::types::{ElementAttribute, ValueAttribute};
use crate::focus::FocusLevel;

#[derive(Debug, Default)]
struct HandleCounter {
    live: Cell<usize>,
    acquired: Cell<usize>,
}

/// One outstanding reference. Decrements the live count on drop.
#[derive(Debug)]
struct Ticket(Rc<HandleCounter>);

impl Ticket {
    fn issue(counter: &Rc<HandleCounter>) -> Self {
        counter.live.set(counter.live.get() + 1);
        counter.acquired.set(counter.acquired.get() + 1);
        Ticket(Rc::clone(counter))
    }
}

impl Drop for Ticket {
    fn drop(&mut self) {
        self.0.live.set(self.0.live.get() - 1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FakeNode {
    SystemWide,
    Application,
    Window,
    TextField,
}

#[derive(Debug)]
pub(crate) struct FakeElement {
    node: FakeNode,
    _ticket: Ticket,
}

impl FakeElement {
    pub(crate) fn node(&self) -> FakeNode {
        self.node
    }
}

#[derive(Debug)]
enum FakeValueKind {
    Range,
    Text(String),
    Number,
}

#[derive(Debug)]
pub(crate) struct FakeValue {
    kind: FakeValueKind,
    _ticket: Ticket,
}

#[derive(Debug)]
pub(crate) struct FakeDesktop {
    trusted: Cell<bool>,
    broken_at: Option<FocusLevel>,
    selection: RefCell<Option<String>>,
    has_range: Cell<bool>,
    selection_is_text: bool,
    settable: bool,
    encodable: bool,
    forbid_resolution: bool,
    counter: Rc<HandleCounter>,
    system_wide_calls: Cell<usize>,
    set_calls: Cell<usize>,
}

impl FakeDesktop {
    /// A trusted desktop whose focused text field has nothing selected.
    pub(crate) fn trusted() -> Self {
        Self {
            trusted: Cell::new(true),
            broken_at: None,
            selection: RefCell::new(Some(String::new())),
            has_range: Cell::new(true),
            selection_is_text: true,
            settable: true,
            encodable: true,
            forbid_resolution: false,
            counter: Rc::new(HandleCounter::default()),
            system_wide_calls: Cell::new(0),
            set_calls: Cell::new(0),
        }
    }

    /// An untrusted desktop that panics if anything tries to walk the focus chain.
    pub(crate) fn untrusted() -> Self {
        let mut desktop = Self::trusted();
        desktop.trusted.set(false);
        desktop.forbid_resolution = true;
        desktop
    }

    pub(crate) fn with_selection(self, text: &str) -> Self {
        *self.selection.borrow_mut() = Some(text.to_string());
        self.has_range.set(true);
        self
    }

    /// The field exposes no selection range and no selected text.
    pub(crate) fn without_selection(self) -> Self {
        *self.selection.borrow_mut() = None;
        self.has_range.set(false);
        self
    }

    /// The field reports a range but its selected text is not a string.
    pub(crate) fn with_non_text_selection(mut self) -> Self {
        self.selection_is_text = false;
        self
    }

    pub(crate) fn broken_at(mut self, level: FocusLevel) -> Self {
        self.broken_at = Some(level);
        self
    }

    /// The field rejects writes to its selected text.
    pub(crate) fn read_only(mut self) -> Self {
        self.settable = false;
        self
    }

    pub(crate) fn rejecting_encoding(mut self) -> Self {
        self.encodable = false;
        self
    }

    pub(crate) fn set_trusted(&self, trusted: bool) {
        self.trusted.set(trusted);
    }

    pub(crate) fn live_handles(&self) -> usize {
        self.counter.live.get()
    }

    pub(crate) fn acquired_handles(&self) -> usize {
        self.counter.acquired.get()
    }

    pub(crate) fn system_wide_calls(&self) -> usize {
        self.system_wide_calls.get()
    }

    pub(crate) fn set_calls(&self) -> usize {
        self.set_calls.get()
    }

    pub(crate) fn selection(&self) -> Option<String> {
        self.selection.borrow().clone()
    }

    fn element(&self, node: FakeNode) -> FakeElement {
        FakeElement {
            node,
            _ticket: Ticket::issue(&self.counter),
        }
    }

    fn value(&self, kind: FakeValueKind) -> FakeValue {
        FakeValue {
            kind,
            _ticket: Ticket::issue(&self.counter),
        }
    }

    fn child(&self, level: FocusLevel, node: FakeNode) -> Result<FakeElement, AxError> {
        if self.broken_at == Some(level) {
            return Err(AxError::NoValue);
        }
        Ok(self.element(node))
    }
}

impl AccessibilityApi for FakeDesktop {
    type Element = FakeElement;
    type Value = FakeValue;

    fn is_process_trusted(&self) -> bool {
        self.trusted.get()
    }

    fn system_wide(&self) -> Result<FakeElement, AxError> {
        assert!(
            !self.forbid_resolution,
            "focus chain resolution attempted without permission"
        );
        self.system_wide_calls.set(self.system_wide_calls.get() + 1);
        Ok(self.element(FakeNode::SystemWide))
    }

    fn copy_element_attribute(
        &self,
        element: &FakeElement,
        attribute: ElementAttribute,
    ) -> Result<FakeElement, AxError> {
        match (element.node, attribute) {
            (FakeNode::SystemWide, ElementAttribute::FocusedApplication) => {
                self.child(FocusLevel::Application, FakeNode::Application)
            }
            (FakeNode::Application, ElementAttribute::FocusedWindow) => {
                self.child(FocusLevel::Window, FakeNode::Window)
            }
            (FakeNode::Window, ElementAttribute::FocusedUIElement) => {
                self.child(FocusLevel::Element, FakeNode::TextField)
            }
            _ => Err(AxError::AttributeUnsupported),
        }
    }

    fn copy_value_attribute(
        &self,
        element: &FakeElement,
        attribute: ValueAttribute,
    ) -> Result<FakeValue, AxError> {
        if element.node != FakeNode::TextField {
            return Err(AxError::AttributeUnsupported);
        }

        match attribute {
            ValueAttribute::SelectedTextRange if self.has_range.get() => {
                Ok(self.value(FakeValueKind::Range))
            }
            ValueAttribute::SelectedTextRange => Err(AxError::NoValue),
            ValueAttribute::SelectedText => match self.selection.borrow().as_ref() {
                Some(_) if !self.selection_is_text => Ok(self.value(FakeValueKind::Number)),
                Some(text) => Ok(self.value(FakeValueKind::Text(text.clone()))),
                None => Err(AxError::NoValue),
            },
        }
    }

    fn value_to_text(&self, value: &FakeValue) -> Option<String> {
        match &value.kind {
            FakeValueKind::Text(text) => Some(text.clone()),
            FakeValueKind::Range | FakeValueKind::Number => None,
        }
    }

    fn text_to_value(&self, text: &str) -> Option<FakeValue> {
        self.encodable
            .then(|| self.value(FakeValueKind::Text(text.to_string())))
    }

    fn set_value_attribute(
        &self,
        element: &FakeElement,
        attribute: ValueAttribute,
        value: &FakeValue,
    ) -> Result<(), AxError> {
        self.set_calls.set(self.set_calls.get() + 1);

        if element.node != FakeNode::TextField
            || attribute != ValueAttribute::SelectedText
            || !self.settable
        {
            return Err(AxError::AttributeUnsupported);
        }

        let FakeValueKind::Text(text) = &value.kind else {
            return Err(AxError::IllegalArgument);
        };

        // The target re-selects the inserted text.
        *self.selection.borrow_mut() = Some(text.clone());
        self.has_range.set(true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_counted_and_released() {
        let desktop = FakeDesktop::trusted();
        {
            let root = desktop.system_wide().unwrap();
            let _app = desktop
                .copy_element_attribute(&root, ElementAttribute::FocusedApplication)
                .unwrap();
            assert_eq!(desktop.live_handles(), 2);
        }
        assert_eq!(desktop.live_handles(), 0);
        assert_eq!(desktop.acquired_handles(), 2);
    }

    #[test]
    fn test_wrong_parent_is_unsupported() {
        let desktop = FakeDesktop::trusted();
        let root = desktop.system_wide().unwrap();
        let result = desktop.copy_element_attribute(&root, ElementAttribute::FocusedWindow);
        assert!(matches!(result, Err(AxError::AttributeUnsupported)));
    }

    #[test]
    #[should_panic(expected = "without permission")]
    fn test_untrusted_desktop_forbids_resolution() {
        let desktop = FakeDesktop::untrusted();
        let _ = desktop.system_wide();
    }
}
