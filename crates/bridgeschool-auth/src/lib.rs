//! # Bridge School Auth
//!
//! Bearer-token verification and role-based authorization.
//!
//! A protected request goes through two independent steps:
//!
//! 1. [`TokenVerifier::verify`] turns the raw token into [`Claims`], failing
//!    with `Unauthorized` (bad signature, malformed, expired, no subject id)
//!    or `ServerMisconfigured` (no signing secret configured).
//! 2. [`authorize`] checks the claimed role against a [`RoleSet`] and fails
//!    with `Forbidden` when it is absent or not a member.
//!
//! Nothing is cached between requests; every request re-verifies.
//!
//! # Example
//!
//! ```ignore
//! use bridgeschool_auth::{RoleSet, TokenVerifier, authorize};
//! use bridgeschool_config::JwtConfig;
//!
//! let verifier = TokenVerifier::new(&JwtConfig::from_env());
//! let claims = verifier.verify(token)?;
//! let claims = authorize(claims, &RoleSet::ADMINS)?;
//! ```

pub mod claims;
pub mod jwt;
pub mod roles;

pub use claims::Claims;
pub use jwt::{TokenVerifier, sign_token};
pub use roles::{Role, RoleSet, authorize};
