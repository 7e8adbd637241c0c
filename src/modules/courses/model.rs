pub use bridgeschool_models::courses::*;
