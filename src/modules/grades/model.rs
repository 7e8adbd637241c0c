pub use bridgeschool_models::grades::*;
