use std::fmt;

/// A link in the system → application → window → element focus chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusLevel {
    Application,
    Window,
    Element,
}

impl fmt::Display for FocusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FocusLevel::Application => "application",
            FocusLevel::Window => "window",
            FocusLevel::Element => "element",
        };
        f.write_str(name)
    }
}

/// The focused UI element together with every ancestor it was resolved through.
///
/// Each handle is only valid while its parent is, so the ancestors are kept
/// alive alongside the element. Fields drop in declaration order: the element
/// is released first and the system-wide root last.
#[derive(Debug)]
pub struct FocusedElement<E> {
    element: E,
    window: E,
    application: E,
    system_wide: E,
}

impl<E> FocusedElement<E> {
    pub(crate) fn new(system_wide: E, application: E, window: E, element: E) -> Self {
        Self {
            element,
            window,
            application,
            system_wide,
        }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn window(&self) -> &E {
        &self.window
    }

    pub fn application(&self) -> &E {
        &self.application
    }

    pub fn system_wide(&self) -> &E {
        &self.system_wide
    }
}
