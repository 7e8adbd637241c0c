//! # Bridge School CLI
//!
//! Staff account bootstrap and development seeding.
//!
//! ```ignore
//! use bridgeschool_cli::seeder::{seed_all, SeedConfig};
//!
//! seed_all(&pool, SeedConfig::new(2)).await?;
//! ```

pub mod seeder;
