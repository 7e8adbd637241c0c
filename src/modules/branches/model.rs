pub use bridgeschool_models::branches::*;
