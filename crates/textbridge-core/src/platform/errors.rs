use crate::errors::TextBridgeError;

/// Status returned by a failed accessibility call.
///
/// Mirrors the `AXError` codes of the macOS Accessibility API so that the
/// portable layers can reason about failures without platform headers.
/// UI Automation failures are folded into the same set by [`AxError::from_hresult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AxError {
    #[error("Accessibility request failed")]
    Failure,

    #[error("Illegal argument passed to the accessibility API")]
    IllegalArgument,

    #[error("Accessibility element is no longer valid")]
    InvalidUIElement,

    #[error("Accessibility observer is no longer valid")]
    InvalidUIElementObserver,

    #[error("Target application did not complete the request")]
    CannotComplete,

    #[error("Attribute is not supported by the element")]
    AttributeUnsupported,

    #[error("Action is not supported by the element")]
    ActionUnsupported,

    #[error("Notification is not supported by the element")]
    NotificationUnsupported,

    #[error("Target application does not implement the accessibility API")]
    NotImplemented,

    #[error("Notification is already registered")]
    NotificationAlreadyRegistered,

    #[error("Notification is not registered")]
    NotificationNotRegistered,

    #[error("Accessibility API is disabled for this process")]
    ApiDisabled,

    #[error("Attribute has no value")]
    NoValue,

    #[error("Parameterized attribute is not supported by the element")]
    ParameterizedAttributeUnsupported,

    #[error("Requested precision is not available")]
    NotEnoughPrecision,

    #[error("Unknown accessibility error (status {code})")]
    Unknown { code: i32 },
}

/// Status code for a successful call.
pub const AX_SUCCESS: i32 = 0;

// COM and UI Automation HRESULTs, as the signed values the `windows` crate reports.
const E_NOTIMPL: i32 = 0x8000_4001_u32 as i32;
const E_POINTER: i32 = 0x8000_4003_u32 as i32;
const E_FAIL: i32 = 0x8000_4005_u32 as i32;
const E_ACCESSDENIED: i32 = 0x8007_0005_u32 as i32;
const E_INVALIDARG: i32 = 0x8007_0057_u32 as i32;
const RPC_E_DISCONNECTED: i32 = 0x8001_0108_u32 as i32;
const UIA_E_ELEMENTNOTENABLED: i32 = 0x8004_0200_u32 as i32;
const UIA_E_ELEMENTNOTAVAILABLE: i32 = 0x8004_0201_u32 as i32;
const UIA_E_NOTSUPPORTED: i32 = 0x8004_0204_u32 as i32;
const UIA_E_TIMEOUT: i32 = 0x8013_1505_u32 as i32;

impl AxError {
    /// Convert a raw status code into a `Result`.
    pub fn check(code: i32) -> Result<(), AxError> {
        match code {
            AX_SUCCESS => Ok(()),
            -25200 => Err(AxError::Failure),
            -25201 => Err(AxError::IllegalArgument),
            -25202 => Err(AxError::InvalidUIElement),
            -25203 => Err(AxError::InvalidUIElementObserver),
            -25204 => Err(AxError::CannotComplete),
            -25205 => Err(AxError::AttributeUnsupported),
            -25206 => Err(AxError::ActionUnsupported),
            -25207 => Err(AxError::NotificationUnsupported),
            -25208 => Err(AxError::NotImplemented),
            -25209 => Err(AxError::NotificationAlreadyRegistered),
            -25210 => Err(AxError::NotificationNotRegistered),
            -25211 => Err(AxError::ApiDisabled),
            -25212 => Err(AxError::NoValue),
            -25213 => Err(AxError::ParameterizedAttributeUnsupported),
            -25214 => Err(AxError::NotEnoughPrecision),
            code => Err(AxError::Unknown { code }),
        }
    }

    /// Map a failed UI Automation `HRESULT` onto the closest status.
    ///
    /// A zero code comes from a call that succeeded but returned a null
    /// interface, which is how UI Automation reports "nothing there".
    pub fn from_hresult(hresult: i32) -> AxError {
        match hresult {
            AX_SUCCESS | E_POINTER => AxError::NoValue,
            E_FAIL => AxError::Failure,
            E_INVALIDARG => AxError::IllegalArgument,
            E_NOTIMPL => AxError::NotImplemented,
            E_ACCESSDENIED => AxError::ApiDisabled,
            UIA_E_ELEMENTNOTAVAILABLE | RPC_E_DISCONNECTED => AxError::InvalidUIElement,
            UIA_E_NOTSUPPORTED => AxError::AttributeUnsupported,
            UIA_E_ELEMENTNOTENABLED | UIA_E_TIMEOUT => AxError::CannotComplete,
            code => AxError::Unknown { code },
        }
    }

    /// The raw status code.
    pub fn code(&self) -> i32 {
        match self {
            AxError::Failure => -25200,
            AxError::IllegalArgument => -25201,
            AxError::InvalidUIElement => -25202,
            AxError::InvalidUIElementObserver => -25203,
            AxError::CannotComplete => -25204,
            AxError::AttributeUnsupported => -25205,
            AxError::ActionUnsupported => -25206,
            AxError::NotificationUnsupported => -25207,
            AxError::NotImplemented => -25208,
            AxError::NotificationAlreadyRegistered => -25209,
            AxError::NotificationNotRegistered => -25210,
            AxError::ApiDisabled => -25211,
            AxError::NoValue => -25212,
            AxError::ParameterizedAttributeUnsupported => -25213,
            AxError::NotEnoughPrecision => -25214,
            AxError::Unknown { code } => *code,
        }
    }
}

impl TextBridgeError for AxError {
    fn error_code(&self) -> &'static str {
        match self {
            AxError::Failure => "AX_FAILURE",
            AxError::IllegalArgument => "AX_ILLEGAL_ARGUMENT",
            AxError::InvalidUIElement => "AX_INVALID_UI_ELEMENT",
            AxError::InvalidUIElementObserver => "AX_INVALID_UI_ELEMENT_OBSERVER",
            AxError::CannotComplete => "AX_CANNOT_COMPLETE",
            AxError::AttributeUnsupported => "AX_ATTRIBUTE_UNSUPPORTED",
            AxError::ActionUnsupported => "AX_ACTION_UNSUPPORTED",
            AxError::NotificationUnsupported => "AX_NOTIFICATION_UNSUPPORTED",
            AxError::NotImplemented => "AX_NOT_IMPLEMENTED",
            AxError::NotificationAlreadyRegistered => "AX_NOTIFICATION_ALREADY_REGISTERED",
            AxError::NotificationNotRegistered => "AX_NOTIFICATION_NOT_REGISTERED",
            AxError::ApiDisabled => "AX_API_DISABLED",
            AxError::NoValue => "AX_NO_VALUE",
            AxError::ParameterizedAttributeUnsupported => "AX_PARAMETERIZED_ATTRIBUTE_UNSUPPORTED",
            AxError::NotEnoughPrecision => "AX_NOT_ENOUGH_PRECISION",
            AxError::Unknown { .. } => "AX_UNKNOWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_code() {
        assert_eq!(AxError::check(0), Ok(()));
    }

    #[test]
    fn test_known_codes_round_trip() {
        for code in -25214..=-25200 {
            let error = AxError::check(code).unwrap_err();
            assert_eq!(error.code(), code);
            assert_ne!(error.error_code(), "AX_UNKNOWN");
        }
    }

    #[test]
    fn test_unknown_code() {
        let error = AxError::check(-1).unwrap_err();
        assert_eq!(error, AxError::Unknown { code: -1 });
        assert_eq!(error.code(), -1);
        assert_eq!(error.to_string(), "Unknown accessibility error (status -1)");
        assert_eq!(error.error_code(), "AX_UNKNOWN");
    }

    #[test]
    fn test_no_value_display() {
        let error = AxError::check(-25212).unwrap_err();
        assert_eq!(error, AxError::NoValue);
        assert_eq!(error.to_string(), "Attribute has no value");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_from_hresult_maps_uia_failures() {
        assert_eq!(
            AxError::from_hresult(0x8004_0201_u32 as i32),
            AxError::InvalidUIElement
        );
        assert_eq!(
            AxError::from_hresult(0x8004_0204_u32 as i32),
            AxError::AttributeUnsupported
        );
        assert_eq!(
            AxError::from_hresult(0x8013_1505_u32 as i32),
            AxError::CannotComplete
        );
        assert_eq!(
            AxError::from_hresult(0x8007_0005_u32 as i32),
            AxError::ApiDisabled
        );
    }

    #[test]
    fn test_from_hresult_null_result_is_no_value() {
        assert_eq!(AxError::from_hresult(0), AxError::NoValue);
        assert_eq!(AxError::from_hresult(0x8000_4003_u32 as i32), AxError::NoValue);
    }

    #[test]
    fn test_from_hresult_keeps_unknown_code() {
        let code = 0x8000_FFFF_u32 as i32;
        let error = AxError::from_hresult(code);
        assert_eq!(error, AxError::Unknown { code });
        assert_eq!(error.code(), code);
    }
}
