pub use bridgeschool_models::users::*;
