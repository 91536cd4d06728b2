use crate::errors::TextBridgeError;
use crate::focus::FocusError;
use crate::selection::SelectionError;

/// Why a read or write through the bridge produced no result.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error(
        "Accessibility permission required: enable in System Settings > Privacy & Security > Accessibility"
    )]
    PermissionDenied,

    #[error(transparent)]
    NoFocusChain(#[from] FocusError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

impl OperationError {
    /// Whether a caller-side fallback (e.g. keystroke simulation) is the expected next step.
    pub fn invites_fallback(&self) -> bool {
        matches!(
            self,
            OperationError::Selection(SelectionError::UnsupportedMutation { .. })
        )
    }
}

impl TextBridgeError for OperationError {
    fn error_code(&self) -> &'static str {
        match self {
            OperationError::PermissionDenied => "ACCESSIBILITY_PERMISSION_DENIED",
            OperationError::NoFocusChain(e) => e.error_code(),
            OperationError::Selection(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            OperationError::PermissionDenied => true,
            OperationError::NoFocusChain(e) => e.is_user_error(),
            OperationError::Selection(e) => e.is_user_error(),
        }
    }
}
