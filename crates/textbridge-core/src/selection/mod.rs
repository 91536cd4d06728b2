pub mod errors;
pub mod handler;

pub use errors::SelectionError;
pub use handler::{read_selection, write_selection};
