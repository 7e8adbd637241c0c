use bridgeschool_db::ConstraintExt;
use bridgeschool_models::{BranchId, SessionId};
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::branches::service::BranchService;
use crate::modules::sessions::model::{CreateSessionDto, Session};
use crate::utils::errors::AppError;

pub struct SessionService;

impl SessionService {
    #[instrument(skip(db))]
    pub async fn create_session(db: &PgPool, dto: CreateSessionDto) -> Result<Session, AppError> {
        BranchService::ensure_exists(db, dto.branch_id).await?;

        let session = sqlx::query_as::<_, Session>(
            r#"INSERT INTO sessions (name, start_date, end_date, branch_id)
               VALUES ($1, $2, $3, $4)
               RETURNING id, name, start_date, end_date, branch_id, created_at"#,
        )
        .bind(&dto.name)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(dto.branch_id)
        .fetch_one(db)
        .await
        .or_conflict("Session already exists", "Branch not found")?;

        Ok(session)
    }

    #[instrument(skip(db))]
    pub async fn get_sessions_by_branch(
        db: &PgPool,
        branch_id: BranchId,
    ) -> Result<Vec<Session>, AppError> {
        let sessions = sqlx::query_as::<_, Session>(
            r#"SELECT id, name, start_date, end_date, branch_id, created_at
               FROM sessions
               WHERE branch_id = $1
               ORDER BY start_date DESC"#,
        )
        .bind(branch_id)
        .fetch_all(db)
        .await?;

        Ok(sessions)
    }

    /// Cascades to the session's classes, courses and exams.
    #[instrument(skip(db))]
    pub async fn delete_session(db: &PgPool, id: SessionId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Session not found")));
        }
        Ok(())
    }

    /// Fails with `NotFound` unless the session exists and belongs to `branch_id`.
    pub async fn ensure_in_branch(
        db: &PgPool,
        id: SessionId,
        branch_id: BranchId,
    ) -> Result<(), AppError> {
        let owner = sqlx::query_scalar::<_, BranchId>("SELECT branch_id FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Session not found")))?;

        if owner != branch_id {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Session not found in branch {}",
                branch_id
            )));
        }
        Ok(())
    }
}
