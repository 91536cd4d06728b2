use crate::errors::TextBridgeError;
use crate::platform::AxError;

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("Focused element has no selection: {source}")]
    NoSelection { source: AxError },

    #[error("Selected text is not a string value")]
    NotText,

    #[error("Text cannot be represented as a platform string")]
    EncodingFailed,

    #[error("Focused element does not accept a direct selection replacement: {source}")]
    UnsupportedMutation { source: AxError },
}

impl TextBridgeError for SelectionError {
    fn error_code(&self) -> &'static str {
        match self {
            SelectionError::NoSelection { .. } => "SELECTION_NONE",
            SelectionError::NotText => "SELECTION_NOT_TEXT",
            SelectionError::EncodingFailed => "SELECTION_ENCODING_FAILED",
            SelectionError::UnsupportedMutation { .. } => "SELECTION_UNSUPPORTED_MUTATION",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            SelectionError::NoSelection { .. } | SelectionError::UnsupportedMutation { .. }
        )
    }
}
