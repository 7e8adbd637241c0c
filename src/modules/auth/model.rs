pub use bridgeschool_models::auth::*;
