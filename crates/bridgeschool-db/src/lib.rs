//! # Bridge School DB
//!
//! Postgres connection pool, embedded schema migrations, and the mapping
//! from store integrity violations to application errors.
//!
//! Uniqueness and referential rules live in the schema so that concurrent
//! writers are serialized by Postgres itself; services translate the
//! resulting violations with [`ConstraintExt::or_conflict`] and friends.

use std::time::Duration;

use anyhow::Context;
use bridgeschool_core::AppError;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use sqlx::PgPool;

/// Migrations under the workspace `migrations/` directory, embedded at build time.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Connects to `database_url` with the pool settings used by the server and CLI.
pub async fn init_db_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    info!("Database pool established");
    Ok(pool)
}

/// Reads `DATABASE_URL` and connects.
pub async fn init_db_pool_from_env() -> anyhow::Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    init_db_pool(&database_url).await
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations applied");
    Ok(())
}

/// Which integrity rule a database error broke, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Unique,
    ForeignKey,
    Check,
}

pub fn violation(err: &sqlx::Error) -> Option<Violation> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };

    if db_err.is_unique_violation() {
        Some(Violation::Unique)
    } else if db_err.is_foreign_key_violation() {
        Some(Violation::ForeignKey)
    } else if db_err.is_check_violation() {
        Some(Violation::Check)
    } else {
        None
    }
}

/// Maps integrity violations on a query result into typed application errors.
pub trait ConstraintExt<T> {
    /// Unique violation becomes `Conflict`, foreign-key violation `NotFound`.
    fn or_conflict(self, conflict: &str, missing: &str) -> Result<T, AppError>;
}

impl<T> ConstraintExt<T> for Result<T, sqlx::Error> {
    fn or_conflict(self, conflict: &str, missing: &str) -> Result<T, AppError> {
        self.map_err(|e| match violation(&e) {
            Some(Violation::Unique) => AppError::conflict(anyhow::anyhow!(conflict.to_string())),
            Some(Violation::ForeignKey) => {
                AppError::not_found(anyhow::anyhow!(missing.to_string()))
            }
            Some(Violation::Check) => {
                AppError::unprocessable(anyhow::anyhow!("Value out of range: {}", e))
            }
            None => AppError::from(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridgeschool_core::ErrorKind;

    #[test]
    fn test_non_database_errors_have_no_violation() {
        assert_eq!(violation(&sqlx::Error::RowNotFound), None);
        assert_eq!(violation(&sqlx::Error::PoolTimedOut), None);
    }

    #[test]
    fn test_plain_errors_map_to_internal() {
        let result: Result<(), sqlx::Error> = Err(sqlx::Error::PoolClosed);
        let err = result.or_conflict("dup", "missing").unwrap_err();
        assert!(err.is(ErrorKind::Internal));
    }

    #[test]
    fn test_migrator_embeds_schema() {
        assert!(MIGRATOR.iter().next().is_some());
    }
}
