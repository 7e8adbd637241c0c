pub use bridgeschool_models::attendance::*;
