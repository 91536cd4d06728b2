pub mod errors;
pub mod handler;
pub mod types;

pub use errors::FocusError;
pub use handler::resolve_focused_element;
pub use types::{FocusLevel, FocusedElement};
