use tracing::debug;

use crate::platform::AccessibilityApi;

/// Whether the process is trusted to inspect and modify other applications' UI.
///
/// Queried afresh on every call; the user can grant or revoke trust at any time.
pub fn has_accessibility_permission<A: AccessibilityApi>(api: &A) -> bool {
    let granted = api.is_process_trusted();
    debug!(event = "core.permission.checked", granted = granted);
    granted
}
