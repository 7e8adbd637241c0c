//! Branch and session seeding.

use bridgeschool_models::{BranchId, SessionId};
use chrono::{Datelike, NaiveDate, Utc};
use fake::Fake;
use fake::faker::address::en::*;
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;

use super::models::{BranchSeed, SEED_BRANCH_PREFIX};
use super::values_clause;

pub fn generate_branches(count: usize) -> Vec<BranchSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let city: String = CityName().fake();
            let street: String = StreetName().fake();
            let building: String = BuildingNumber().fake();

            BranchSeed {
                name: format!("{}{} Campus {}", SEED_BRANCH_PREFIX, city, i + 1),
                address: format!("{} {}, {}", building, street, city),
            }
        })
        .collect()
}

/// Current academic year, September to July.
pub fn current_session_dates() -> anyhow::Result<(String, NaiveDate, NaiveDate)> {
    let today = Utc::now().date_naive();
    let start_year = if today.month() >= 9 {
        today.year()
    } else {
        today.year() - 1
    };

    let start = NaiveDate::from_ymd_opt(start_year, 9, 1)
        .ok_or_else(|| anyhow::anyhow!("invalid session start"))?;
    let end = NaiveDate::from_ymd_opt(start_year + 1, 7, 31)
        .ok_or_else(|| anyhow::anyhow!("invalid session end"))?;
    Ok((format!("{}/{}", start_year, start_year + 1), start, end))
}

/// Inserts the branches and one current session for each.
pub async fn seed_branches(
    db: &PgPool,
    count: usize,
) -> anyhow::Result<Vec<(BranchId, SessionId)>> {
    let start_time = Instant::now();
    println!("🏫 Seeding {} branches...", count);

    let branches = generate_branches(count);
    let (session_name, start, end) = current_session_dates()?;

    let mut tx = db.begin().await?;

    let query = format!(
        "INSERT INTO branches (name, address) VALUES {} RETURNING id",
        values_clause(branches.len(), 2)
    );
    let mut q = sqlx::query_scalar::<_, BranchId>(&query);
    for branch in &branches {
        q = q.bind(&branch.name).bind(&branch.address);
    }
    let branch_ids = q.fetch_all(&mut *tx).await?;

    let query = format!(
        "INSERT INTO sessions (name, start_date, end_date, branch_id) VALUES {} RETURNING id",
        values_clause(branch_ids.len(), 4)
    );
    let mut q = sqlx::query_scalar::<_, SessionId>(&query);
    for branch_id in &branch_ids {
        q = q.bind(&session_name).bind(start).bind(end).bind(branch_id);
    }
    let session_ids = q.fetch_all(&mut *tx).await?;

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} branches with sessions in {:?}",
        branch_ids.len(),
        start_time.elapsed()
    );

    Ok(branch_ids.into_iter().zip(session_ids).collect())
}

/// Deletes every seeded branch. Sessions, classes, courses and students
/// go with them.
pub async fn clear_branches(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded branches...");

    let result = sqlx::query("DELETE FROM branches WHERE name LIKE $1 || '%'")
        .bind(SEED_BRANCH_PREFIX)
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} branches in {:?}",
        result,
        start_time.elapsed()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_branches_are_marked() {
        let branches = generate_branches(5);
        assert_eq!(branches.len(), 5);
        assert!(branches.iter().all(|b| b.name.starts_with(SEED_BRANCH_PREFIX)));
    }

    #[test]
    fn test_session_spans_academic_year() {
        let (name, start, end) = current_session_dates().unwrap();
        assert!(start < end);
        assert_eq!(start.month(), 9);
        assert_eq!(end.year(), start.year() + 1);
        assert!(name.contains('/'));
    }
}
