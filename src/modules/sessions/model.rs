pub use bridgeschool_models::sessions::*;
