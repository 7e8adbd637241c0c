pub use bridgeschool_models::classes::*;
pub use bridgeschool_models::students::ClassStudent;
