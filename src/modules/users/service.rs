use std::collections::BTreeSet;

use bridgeschool_auth::Role;
use bridgeschool_db::ConstraintExt;
use bridgeschool_models::classes::ClassSummary;
use bridgeschool_models::{BranchId, UserId};
use sqlx::{PgExecutor, PgPool};
use tracing::{info, instrument};

use crate::modules::courses::service::CourseService;
use crate::modules::users::model::{CreateUserDto, TeacherDetails, User};
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

const USER_COLUMNS: &str = "id, email, first_name, last_name, role, branch_id, created_at";

pub struct UserService;

impl UserService {
    /// Registers a staff account. The password is stored only as a bcrypt hash.
    #[instrument(skip(db, dto), fields(email = %dto.email, role = %dto.role))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let email = dto.email.trim().to_lowercase();

        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE lower(email) = $1)",
        )
        .bind(&email)
        .fetch_one(db)
        .await?;
        if taken {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Email already registered"
            )));
        }

        let hashed = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO users (email, password, first_name, last_name, role, branch_id)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(&email)
        .bind(&hashed)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(dto.role)
        .bind(dto.branch_id)
        .fetch_one(db)
        .await
        // The unique index settles races the pre-check cannot see.
        .or_conflict("Email already registered", "Branch not found")?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: UserId) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    /// Fails with `NotFound` if the user is absent and `InvalidRole` if they
    /// do not hold `role`.
    pub async fn ensure_role<'e, E>(executor: E, id: UserId, role: Role) -> Result<(), AppError>
    where
        E: PgExecutor<'e>,
    {
        let actual = sqlx::query_scalar::<_, Role>("SELECT role FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User {} not found", id)))?;

        if actual != role {
            return Err(AppError::invalid_role(anyhow::anyhow!(
                "User {} is a {}, not a {}",
                id,
                actual,
                role
            )));
        }
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn get_users_by_role(
        db: &PgPool,
        branch_id: BranchId,
        role: Role,
    ) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            r#"SELECT {USER_COLUMNS} FROM users
               WHERE branch_id = $1 AND role = $2
               ORDER BY first_name, last_name"#
        ))
        .bind(branch_id)
        .bind(role)
        .fetch_all(db)
        .await?;

        Ok(users)
    }

    #[instrument(skip(db))]
    pub async fn get_teacher_details(
        db: &PgPool,
        branch_id: BranchId,
    ) -> Result<Vec<TeacherDetails>, AppError> {
        let teachers = Self::get_users_by_role(db, branch_id, Role::Teacher).await?;

        let mut details = Vec::with_capacity(teachers.len());
        for teacher in teachers {
            let courses = CourseService::get_teacher_courses(db, teacher.id).await?;
            let homeroom_classes = sqlx::query_as::<_, ClassSummary>(
                "SELECT id, name FROM classes WHERE class_teacher_id = $1 ORDER BY name",
            )
            .bind(teacher.id)
            .fetch_all(db)
            .await?;

            details.push(TeacherDetails {
                teacher,
                courses,
                homeroom_classes,
            });
        }

        Ok(details)
    }

    /// Homeroom references and attendance authorship are cleared; course
    /// links of the user are removed.
    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: UserId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Deletes every listed user or none of them.
    #[instrument(skip(db))]
    pub async fn delete_users(db: &PgPool, ids: &[UserId]) -> Result<u64, AppError> {
        let unique: BTreeSet<UserId> = ids.iter().copied().collect();
        let mut tx = db.begin().await?;
        let mut deleted = 0;

        for id in unique {
            let result = sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                return Err(AppError::not_found(anyhow::anyhow!("User {} not found", id)));
            }
            deleted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(deleted)
    }
}
