//! Development data seeding.
//!
//! Seeded rows are tagged (branch name prefix, staff email domain) so that
//! [`clear_all`] removes them without touching real data.

mod academics;
mod branches;
mod models;
mod staff;

pub use academics::seed_academics;
pub use branches::{clear_branches, seed_branches};
pub use models::*;
pub use staff::{clear_staff, seed_staff};

use bridgeschool_core::hash_password;
use sqlx::PgPool;
use std::time::Instant;

/// `($1, $2), ($3, $4), ...` for `rows` rows of `columns` parameters.
pub(crate) fn values_clause(rows: usize, columns: usize) -> String {
    (0..rows)
        .map(|row| {
            let params: Vec<String> = (1..=columns)
                .map(|col| format!("${}", row * columns + col))
                .collect();
            format!("({})", params.join(", "))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> anyhow::Result<()> {
    if config.branches == 0 {
        println!("Nothing to seed");
        return Ok(());
    }

    let start_time = Instant::now();
    println!("🌱 Seeding database...\n");

    let password_hash = hash_password(SEED_PASSWORD).map_err(|e| e.error)?;

    let branches = seed_branches(db, config.branches).await?;
    let branch_ids: Vec<_> = branches.iter().map(|(branch, _)| *branch).collect();
    let teachers = seed_staff(db, &branch_ids, &config.staff, &password_hash).await?;
    seed_academics(db, &branches, &teachers, &config.academics).await?;

    println!("\n✅ Seeding finished in {:?}", start_time.elapsed());
    println!("   Staff password: {}", SEED_PASSWORD);
    Ok(())
}

pub async fn clear_all(db: &PgPool) -> anyhow::Result<()> {
    let start_time = Instant::now();
    clear_staff(db).await?;
    clear_branches(db).await?;
    println!("\n✅ Cleared seeded data in {:?}", start_time.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_clause_numbers_params_row_major() {
        assert_eq!(values_clause(2, 3), "($1, $2, $3), ($4, $5, $6)");
        assert_eq!(values_clause(1, 1), "($1)");
    }
}
