use bridgeschool_db::ConstraintExt;
use bridgeschool_models::{BranchId, StudentId};
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::branches::service::BranchService;
use crate::modules::students::model::{CreateStudentDto, Student, StudentWithClass};
use crate::utils::errors::AppError;

const STUDENT_COLUMNS: &str = "id, name, dob, gender, branch_id, created_at";

pub struct StudentService;

impl StudentService {
    /// Creates the student and, when `class_id` is given, enrolls them as
    /// active in that class within the same transaction.
    #[instrument(skip(db))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        BranchService::ensure_exists(db, dto.branch_id).await?;

        let mut tx = db.begin().await?;

        let student = sqlx::query_as::<_, Student>(&format!(
            r#"INSERT INTO students (name, dob, gender, branch_id)
               VALUES ($1, $2, $3, $4)
               RETURNING {STUDENT_COLUMNS}"#
        ))
        .bind(&dto.name)
        .bind(dto.dob)
        .bind(&dto.gender)
        .bind(dto.branch_id)
        .fetch_one(&mut *tx)
        .await
        .or_conflict("Student already exists", "Branch not found")?;

        if let Some(class_id) = dto.class_id {
            let in_branch = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM classes WHERE id = $1 AND branch_id = $2)",
            )
            .bind(class_id)
            .bind(dto.branch_id)
            .fetch_one(&mut *tx)
            .await?;
            if !in_branch {
                return Err(AppError::not_found(anyhow::anyhow!(
                    "Class {} not found in branch {}",
                    class_id,
                    dto.branch_id
                )));
            }

            sqlx::query("INSERT INTO student_classes (student_id, class_id) VALUES ($1, $2)")
                .bind(student.id)
                .bind(class_id)
                .execute(&mut *tx)
                .await
                .or_conflict("Student already enrolled in this class", "Class not found")?;
        }

        tx.commit().await?;
        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, id: StudentId) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    /// Branch roster with each student's most recent active class.
    #[instrument(skip(db))]
    pub async fn get_students_by_branch(
        db: &PgPool,
        branch_id: BranchId,
    ) -> Result<Vec<StudentWithClass>, AppError> {
        let students = sqlx::query_as::<_, StudentWithClass>(
            r#"SELECT DISTINCT ON (st.id)
                st.id, st.name, st.dob, st.gender, st.branch_id,
                c.id AS class_id, c.name AS class_name
               FROM students st
               LEFT JOIN student_classes sc ON sc.student_id = st.id AND sc.status = 'active'
               LEFT JOIN classes c ON c.id = sc.class_id
               WHERE st.branch_id = $1
               ORDER BY st.id, sc.created_at DESC"#,
        )
        .bind(branch_id)
        .fetch_all(db)
        .await?;

        Ok(students)
    }

    /// Cascades to enrollments, grades and attendance of the student.
    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: StudentId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }
        Ok(())
    }
}
