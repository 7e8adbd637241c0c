//! # Bridge School Core
//!
//! Foundational types shared by every Bridge School crate:
//!
//! - [`errors`]: the application error taxonomy and its HTTP mapping
//! - [`password`]: salted one-way password hashing
//!
//! # Example
//!
//! ```ignore
//! use bridgeschool_core::errors::AppError;
//! use bridgeschool_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Class not found"));
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;

pub use errors::{AppError, ErrorKind, ErrorResponse};
pub use password::{hash_password, verify_password};
