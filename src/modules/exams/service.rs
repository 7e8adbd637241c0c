use bridgeschool_db::ConstraintExt;
use bridgeschool_models::{CourseId, ExamId, UserId};
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::courses::service::CourseService;
use crate::modules::exams::model::{CreateExamDto, Exam};
use crate::utils::errors::AppError;

const EXAM_COLUMNS: &str = "id, name, max_marks, date, course_id, session_id, created_at";

pub struct ExamService;

impl ExamService {
    #[instrument(skip(db))]
    pub async fn create_exam(
        db: &PgPool,
        teacher_id: UserId,
        dto: CreateExamDto,
    ) -> Result<Exam, AppError> {
        let course = CourseService::get_course(db, dto.course_id).await?;
        CourseService::ensure_teacher_assigned(db, teacher_id, dto.course_id).await?;
        if dto.session_id != course.session_id {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Session {} is not the session of course {}",
                dto.session_id,
                dto.course_id
            )));
        }

        let exam = sqlx::query_as::<_, Exam>(&format!(
            r#"INSERT INTO exams (name, max_marks, date, course_id, session_id)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {EXAM_COLUMNS}"#
        ))
        .bind(&dto.name)
        .bind(dto.max_marks)
        .bind(dto.date)
        .bind(dto.course_id)
        .bind(dto.session_id)
        .fetch_one(db)
        .await
        .or_conflict("Exam already exists", "Course or session not found")?;

        Ok(exam)
    }

    #[instrument(skip(db))]
    pub async fn get_exam(db: &PgPool, id: ExamId) -> Result<Exam, AppError> {
        sqlx::query_as::<_, Exam>(&format!("SELECT {EXAM_COLUMNS} FROM exams WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Exam not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_exams_by_course(
        db: &PgPool,
        course_id: CourseId,
    ) -> Result<Vec<Exam>, AppError> {
        let exams = sqlx::query_as::<_, Exam>(&format!(
            "SELECT {EXAM_COLUMNS} FROM exams WHERE course_id = $1 ORDER BY date, id"
        ))
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(exams)
    }

    /// Cascades to the exam's grades.
    #[instrument(skip(db))]
    pub async fn delete_exam(db: &PgPool, teacher_id: UserId, id: ExamId) -> Result<(), AppError> {
        let exam = Self::get_exam(db, id).await?;
        CourseService::ensure_teacher_assigned(db, teacher_id, exam.course_id).await?;

        sqlx::query("DELETE FROM exams WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
