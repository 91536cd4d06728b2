pub mod errors;
pub mod handler;

pub use errors::OperationError;
pub use handler::SelectionBridge;
