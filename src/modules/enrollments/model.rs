pub use bridgeschool_models::enrollments::*;
