use bridgeschool_auth::Role;
use bridgeschool_db::ConstraintExt;
use bridgeschool_models::{BranchId, ClassId, UserId};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::modules::branches::service::BranchService;
use crate::modules::classes::model::{Class, ClassStudent, ClassWithDetails, CreateClassDto};
use crate::modules::sessions::service::SessionService;
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;

const CLASS_COLUMNS: &str = "id, name, branch_id, session_id, class_teacher_id, created_at";

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db))]
    pub async fn create_class(db: &PgPool, dto: CreateClassDto) -> Result<Class, AppError> {
        BranchService::ensure_exists(db, dto.branch_id).await?;
        SessionService::ensure_in_branch(db, dto.session_id, dto.branch_id).await?;

        let class = sqlx::query_as::<_, Class>(&format!(
            r#"INSERT INTO classes (name, branch_id, session_id)
               VALUES ($1, $2, $3)
               RETURNING {CLASS_COLUMNS}"#
        ))
        .bind(&dto.name)
        .bind(dto.branch_id)
        .bind(dto.session_id)
        .fetch_one(db)
        .await
        // A concurrent delete of the branch or session lands here.
        .or_conflict("Class already exists", "Branch or session not found")?;

        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn get_class(db: &PgPool, id: ClassId) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>(&format!("SELECT {CLASS_COLUMNS} FROM classes WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_classes_by_branch(
        db: &PgPool,
        branch_id: BranchId,
    ) -> Result<Vec<ClassWithDetails>, AppError> {
        let classes = sqlx::query_as::<_, ClassWithDetails>(
            r#"SELECT
                c.id,
                c.name,
                c.branch_id,
                c.session_id,
                s.name AS session_name,
                c.class_teacher_id,
                CASE WHEN u.id IS NULL THEN NULL
                     ELSE u.first_name || ' ' || u.last_name END AS class_teacher_name,
                COUNT(sc.id) FILTER (WHERE sc.status = 'active') AS student_count,
                c.created_at
               FROM classes c
               JOIN sessions s ON s.id = c.session_id
               LEFT JOIN users u ON u.id = c.class_teacher_id
               LEFT JOIN student_classes sc ON sc.class_id = c.id
               WHERE c.branch_id = $1
               GROUP BY c.id, s.name, u.id
               ORDER BY c.name"#,
        )
        .bind(branch_id)
        .fetch_all(db)
        .await?;

        Ok(classes)
    }

    /// Sets the homeroom teacher. Re-assigning the current teacher is a no-op.
    #[instrument(skip(db))]
    pub async fn assign_homeroom_teacher(
        db: &PgPool,
        class_id: ClassId,
        teacher_id: UserId,
    ) -> Result<Class, AppError> {
        let class = Self::get_class(db, class_id).await?;
        UserService::ensure_role(db, teacher_id, Role::Teacher).await?;

        if class.class_teacher_id == Some(teacher_id) {
            return Ok(class);
        }

        let class = sqlx::query_as::<_, Class>(&format!(
            r#"UPDATE classes SET class_teacher_id = $1 WHERE id = $2
               RETURNING {CLASS_COLUMNS}"#
        ))
        .bind(teacher_id)
        .bind(class_id)
        .fetch_optional(db)
        .await
        .or_conflict("Class already has this teacher", "Teacher not found")?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))?;

        info!(class_id = %class_id, teacher_id = %teacher_id, "Homeroom teacher assigned");
        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn get_class_students(
        db: &PgPool,
        class_id: ClassId,
    ) -> Result<Vec<ClassStudent>, AppError> {
        Self::get_class(db, class_id).await?;

        let students = sqlx::query_as::<_, ClassStudent>(
            r#"SELECT sc.id AS enrollment_id, st.id AS student_id, st.name, st.dob, st.gender, sc.status
               FROM student_classes sc
               JOIN students st ON st.id = sc.student_id
               WHERE sc.class_id = $1
               ORDER BY st.name"#,
        )
        .bind(class_id)
        .fetch_all(db)
        .await?;

        Ok(students)
    }

    /// Cascades to enrollments, course links and attendance of the class.
    #[instrument(skip(db))]
    pub async fn delete_class(db: &PgPool, id: ClassId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }
        Ok(())
    }
}
