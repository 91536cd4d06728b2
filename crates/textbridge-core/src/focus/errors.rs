use crate::errors::TextBridgeError;
use crate::focus::types::FocusLevel;
use crate::platform::AxError;

#[derive(Debug, thiserror::Error)]
pub enum FocusError {
    #[error("System-wide accessibility element unavailable: {source}")]
    SystemWideUnavailable { source: AxError },

    #[error("No focused application: {source}")]
    NoFocusedApplication { source: AxError },

    #[error("Focused application has no focused window: {source}")]
    NoFocusedWindow { source: AxError },

    #[error("Focused window has no focused element: {source}")]
    NoFocusedElement { source: AxError },
}

impl FocusError {
    /// The link of the chain that could not be resolved.
    ///
    /// `None` when the system-wide root itself was unavailable.
    pub fn level(&self) -> Option<FocusLevel> {
        match self {
            FocusError::SystemWideUnavailable { .. } => None,
            FocusError::NoFocusedApplication { .. } => Some(FocusLevel::Application),
            FocusError::NoFocusedWindow { .. } => Some(FocusLevel::Window),
            FocusError::NoFocusedElement { .. } => Some(FocusLevel::Element),
        }
    }

    pub(crate) fn at(level: FocusLevel, source: AxError) -> Self {
        match level {
            FocusLevel::Application => FocusError::NoFocusedApplication { source },
            FocusLevel::Window => FocusError::NoFocusedWindow { source },
            FocusLevel::Element => FocusError::NoFocusedElement { source },
        }
    }

    pub fn ax_error(&self) -> AxError {
        match self {
            FocusError::SystemWideUnavailable { source }
            | FocusError::NoFocusedApplication { source }
            | FocusError::NoFocusedWindow { source }
            | FocusError::NoFocusedElement { source } => *source,
        }
    }
}

impl TextBridgeError for FocusError {
    fn error_code(&self) -> &'static str {
        match self {
            FocusError::SystemWideUnavailable { .. } => "FOCUS_SYSTEM_WIDE_UNAVAILABLE",
            FocusError::NoFocusedApplication { .. } => "FOCUS_NO_APPLICATION",
            FocusError::NoFocusedWindow { .. } => "FOCUS_NO_WINDOW",
            FocusError::NoFocusedElement { .. } => "FOCUS_NO_ELEMENT",
        }
    }

    fn is_user_error(&self) -> bool {
        // Nothing focused is a routine desktop state, not a fault.
        !matches!(self, FocusError::SystemWideUnavailable { .. })
    }
}
