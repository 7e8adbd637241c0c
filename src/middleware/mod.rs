//! Request guards.
//!
//! - [`auth`]: bearer-token extraction and the [`auth::AuthUser`] extractor
//! - [`role`]: router-level role guard layers
//!
//! # Flow
//!
//! 1. A guarded router group is wrapped in one of the `require_*` layers,
//!    each bound to a single [`bridgeschool_auth::RoleSet`].
//! 2. The layer verifies the bearer token, then authorizes its role, before
//!    any handler (and so any database access) runs.
//! 3. The verified claims are stored in request extensions, where handlers
//!    pick them up through [`auth::AuthUser`].

pub mod auth;
pub mod role;
