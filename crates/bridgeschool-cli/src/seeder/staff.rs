//! Staff account seeding.

use bridgeschool_auth::Role;
use bridgeschool_models::{BranchId, UserId};
use fake::Fake;
use fake::faker::name::en::*;
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;

use super::models::{SEED_EMAIL_DOMAIN, StaffPerBranch, StaffSeed};
use super::values_clause;

const BATCH_SIZE: usize = 1000;

pub fn generate_staff(branch_ids: &[BranchId], per_branch: &StaffPerBranch) -> Vec<StaffSeed> {
    branch_ids
        .par_iter()
        .flat_map(|&branch_id| {
            let admins = (0..per_branch.admins).map(move |i| (Role::Admin, i));
            let teachers = (0..per_branch.teachers).map(move |i| (Role::Teacher, i));

            admins
                .chain(teachers)
                .map(|(role, i)| {
                    let first_name: String = FirstName().fake();
                    let last_name: String = LastName().fake();
                    let email = format!(
                        "{}.{}+{}{}-{}@{}",
                        first_name.to_lowercase(),
                        last_name.to_lowercase(),
                        role,
                        branch_id,
                        i,
                        SEED_EMAIL_DOMAIN
                    );
                    StaffSeed {
                        first_name,
                        last_name,
                        email,
                        role,
                        branch_id,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Inserts staff and returns the ids of the teachers, grouped by branch in
/// insertion order.
pub async fn seed_staff(
    db: &PgPool,
    branch_ids: &[BranchId],
    per_branch: &StaffPerBranch,
    password_hash: &str,
) -> anyhow::Result<Vec<(BranchId, UserId)>> {
    let start_time = Instant::now();
    let staff = generate_staff(branch_ids, per_branch);
    println!("👥 Seeding {} staff users...", staff.len());

    let mut tx = db.begin().await?;
    let mut teachers = Vec::new();

    for chunk in staff.chunks(BATCH_SIZE) {
        let query = format!(
            r#"INSERT INTO users (email, password, first_name, last_name, role, branch_id)
               VALUES {} RETURNING id"#,
            values_clause(chunk.len(), 6)
        );
        let mut q = sqlx::query_scalar::<_, UserId>(&query);
        for seed in chunk {
            q = q
                .bind(&seed.email)
                .bind(password_hash)
                .bind(&seed.first_name)
                .bind(&seed.last_name)
                .bind(seed.role)
                .bind(seed.branch_id);
        }
        let ids = q.fetch_all(&mut *tx).await?;

        teachers.extend(
            chunk
                .iter()
                .zip(ids)
                .filter(|(seed, _)| seed.role == Role::Teacher)
                .map(|(seed, id)| (seed.branch_id, id)),
        );
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} staff users in {:?}",
        staff.len(),
        start_time.elapsed()
    );
    Ok(teachers)
}

/// Deletes every seeded staff account.
pub async fn clear_staff(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded staff...");

    let result = sqlx::query("DELETE FROM users WHERE email LIKE '%@' || $1")
        .bind(SEED_EMAIL_DOMAIN)
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} users in {:?}",
        result,
        start_time.elapsed()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_staff_counts_and_emails() {
        let per_branch = StaffPerBranch {
            admins: 1,
            teachers: 3,
        };
        let staff = generate_staff(&[BranchId(1), BranchId(2)], &per_branch);

        assert_eq!(staff.len(), 8);
        assert_eq!(staff.iter().filter(|s| s.role == Role::Teacher).count(), 6);
        assert!(staff.iter().all(|s| s.email.ends_with(SEED_EMAIL_DOMAIN)));

        let mut emails: Vec<&str> = staff.iter().map(|s| s.email.as_str()).collect();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), 8, "seeded emails must be unique");
    }
}
