pub use bridgeschool_models::students::*;
