pub use bridgeschool_core::password::{hash_password, verify_password};
