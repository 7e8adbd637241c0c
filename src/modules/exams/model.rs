pub use bridgeschool_models::exams::*;
