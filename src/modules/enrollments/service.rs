use std::collections::BTreeSet;

use bridgeschool_db::ConstraintExt;
use bridgeschool_models::{BranchId, ClassId, EnrollmentId, StudentId};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::modules::enrollments::model::{
    EnrollStudentDto, Enrollment, PromotionResponse, StudentStatus,
};
use crate::utils::errors::AppError;

const ENROLLMENT_COLUMNS: &str = "id, student_id, class_id, status, created_at";

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enrolls a student in a class. A second enrollment of the same
    /// (student, class) pair fails with `Conflict`; use
    /// [`EnrollmentService::update_status`] to change an existing one.
    #[instrument(skip(db))]
    pub async fn enroll_student(
        db: &PgPool,
        dto: EnrollStudentDto,
    ) -> Result<Enrollment, AppError> {
        let student_branch =
            sqlx::query_scalar::<_, BranchId>("SELECT branch_id FROM students WHERE id = $1")
                .bind(dto.student_id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        let class_branch =
            sqlx::query_scalar::<_, BranchId>("SELECT branch_id FROM classes WHERE id = $1")
                .bind(dto.class_id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))?;

        if student_branch != class_branch {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Student and class belong to different branches"
            )));
        }

        let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
            r#"INSERT INTO student_classes (student_id, class_id, status)
               VALUES ($1, $2, $3)
               RETURNING {ENROLLMENT_COLUMNS}"#
        ))
        .bind(dto.student_id)
        .bind(dto.class_id)
        .bind(dto.status)
        .fetch_one(db)
        .await
        .or_conflict(
            "Student is already enrolled in this class",
            "Student or class not found",
        )?;

        Ok(enrollment)
    }

    #[instrument(skip(db))]
    pub async fn update_status(
        db: &PgPool,
        id: EnrollmentId,
        status: StudentStatus,
    ) -> Result<Enrollment, AppError> {
        sqlx::query_as::<_, Enrollment>(&format!(
            "UPDATE student_classes SET status = $1 WHERE id = $2 RETURNING {ENROLLMENT_COLUMNS}"
        ))
        .bind(status)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Enrollment not found")))
    }

    /// Moves every listed student into `class_id` as active, marking their
    /// other active enrollments inactive. All or nothing.
    #[instrument(skip(db, student_ids), fields(students = student_ids.len()))]
    pub async fn promote_students(
        db: &PgPool,
        class_id: ClassId,
        student_ids: &[StudentId],
    ) -> Result<PromotionResponse, AppError> {
        let students: BTreeSet<StudentId> = student_ids.iter().copied().collect();
        let mut tx = db.begin().await?;

        let class_branch = sqlx::query_scalar::<_, BranchId>(
            "SELECT branch_id FROM classes WHERE id = $1 FOR SHARE",
        )
        .bind(class_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))?;

        let mut deactivated = 0;
        for student_id in &students {
            let student_branch =
                sqlx::query_scalar::<_, BranchId>("SELECT branch_id FROM students WHERE id = $1")
                    .bind(student_id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| {
                        AppError::not_found(anyhow::anyhow!("Student {} not found", student_id))
                    })?;
            if student_branch != class_branch {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Student {} belongs to a different branch",
                    student_id
                )));
            }

            let result = sqlx::query(
                r#"UPDATE student_classes SET status = 'inactive'
                   WHERE student_id = $1 AND class_id <> $2 AND status = 'active'"#,
            )
            .bind(student_id)
            .bind(class_id)
            .execute(&mut *tx)
            .await?;
            deactivated += result.rows_affected();

            sqlx::query(
                r#"INSERT INTO student_classes (student_id, class_id, status)
                   VALUES ($1, $2, 'active')
                   ON CONFLICT (student_id, class_id) DO UPDATE SET status = 'active'"#,
            )
            .bind(student_id)
            .bind(class_id)
            .execute(&mut *tx)
            .await
            .or_conflict("Enrollment conflict", "Student or class not found")?;
        }

        tx.commit().await?;
        info!(class_id = %class_id, promoted = students.len(), "Students promoted");

        Ok(PromotionResponse {
            class_id,
            promoted: students.len(),
            deactivated,
        })
    }
}
