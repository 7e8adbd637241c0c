//! Shared utilities re-exported from the workspace crates.
//!
//! - [`errors`]: application error type and HTTP mapping
//! - [`password`]: bcrypt hashing and verification

pub mod errors;
pub mod password;
