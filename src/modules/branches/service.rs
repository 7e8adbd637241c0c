use bridgeschool_models::BranchId;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::branches::model::{Branch, CreateBranchDto, UpdateBranchDto};
use crate::utils::errors::AppError;

const BRANCH_COLUMNS: &str = "id, name, address, created_at, updated_at";

pub struct BranchService;

impl BranchService {
    #[instrument(skip(db))]
    pub async fn create_branch(db: &PgPool, dto: CreateBranchDto) -> Result<Branch, AppError> {
        let branch = sqlx::query_as::<_, Branch>(&format!(
            "INSERT INTO branches (name, address) VALUES ($1, $2) RETURNING {BRANCH_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.address)
        .fetch_one(db)
        .await?;

        Ok(branch)
    }

    #[instrument(skip(db))]
    pub async fn get_branches(db: &PgPool) -> Result<Vec<Branch>, AppError> {
        let branches = sqlx::query_as::<_, Branch>(&format!(
            "SELECT {BRANCH_COLUMNS} FROM branches ORDER BY name"
        ))
        .fetch_all(db)
        .await?;

        Ok(branches)
    }

    #[instrument(skip(db))]
    pub async fn get_branch(db: &PgPool, id: BranchId) -> Result<Branch, AppError> {
        sqlx::query_as::<_, Branch>(&format!(
            "SELECT {BRANCH_COLUMNS} FROM branches WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Branch not found")))
    }

    #[instrument(skip(db))]
    pub async fn update_branch(
        db: &PgPool,
        id: BranchId,
        dto: UpdateBranchDto,
    ) -> Result<Branch, AppError> {
        sqlx::query_as::<_, Branch>(&format!(
            r#"UPDATE branches
               SET name = COALESCE($1, name),
                   address = COALESCE($2, address),
                   updated_at = NOW()
               WHERE id = $3
               RETURNING {BRANCH_COLUMNS}"#
        ))
        .bind(&dto.name)
        .bind(&dto.address)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Branch not found")))
    }

    /// Deletes the branch with its sessions, classes, courses and students.
    /// Staff assigned to it are kept and detached.
    #[instrument(skip(db))]
    pub async fn delete_branch(db: &PgPool, id: BranchId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM branches WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Branch not found")));
        }

        Ok(())
    }

    pub async fn ensure_exists(db: &PgPool, id: BranchId) -> Result<(), AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM branches WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Branch not found")));
        }
        Ok(())
    }
}
