/// Attributes whose value is another accessibility element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementAttribute {
    FocusedApplication,
    FocusedWindow,
    FocusedUIElement,
}

impl ElementAttribute {
    pub fn name(&self) -> &'static str {
        match self {
            ElementAttribute::FocusedApplication => "AXFocusedApplication",
            ElementAttribute::FocusedWindow => "AXFocusedWindow",
            ElementAttribute::FocusedUIElement => "AXFocusedUIElement",
        }
    }
}

/// Attributes read from or written to the focused text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueAttribute {
    SelectedText,
    SelectedTextRange,
}

impl ValueAttribute {
    pub fn name(&self) -> &'static str {
        match self {
            ValueAttribute::SelectedText => "AXSelectedText",
            ValueAttribute::SelectedTextRange => "AXSelectedTextRange",
        }
    }
}
