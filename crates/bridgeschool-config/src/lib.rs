//! # Bridge School Config
//!
//! Process-wide configuration, read once from the environment at startup and
//! then passed by reference to whatever needs it.
//!
//! - [`jwt`]: token signing secret, algorithm and issued-token lifetime
//! - [`cors`]: allowed browser origins
//! - [`server`]: bind address, API prefix and project metadata

pub mod cors;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

pub use jsonwebtoken::Algorithm;

/// Reads a variable through `lookup`, treating empty values as unset.
pub(crate) fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
