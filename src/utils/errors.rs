pub use bridgeschool_core::errors::{AppError, ErrorKind, ErrorResponse};
