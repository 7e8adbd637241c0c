use std::collections::BTreeMap;

use bridgeschool_db::ConstraintExt;
use bridgeschool_models::{ClassId, CourseId, ExamId, StudentId, UserId};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::{info, instrument};

use crate::modules::courses::service::CourseService;
use crate::modules::exams::service::ExamService;
use crate::modules::grades::model::{
    Grade, GradeEntry, GradeWithStudent, Gradebook, GradebookStudent, RecordGradeDto,
};
use crate::utils::errors::AppError;

const GRADE_COLUMNS: &str = "id, exam_id, student_id, marks_obtained, created_at, updated_at";

#[derive(FromRow)]
struct ExamScope {
    course_id: CourseId,
    max_marks: i32,
}

#[derive(FromRow)]
struct RosterRow {
    student_id: StudentId,
    name: String,
    class_id: ClassId,
    class_name: String,
}

#[derive(FromRow)]
struct GradeRow {
    student_id: StudentId,
    exam_id: ExamId,
    marks_obtained: i32,
}

pub struct GradeService;

impl GradeService {
    /// Locks the exam row and checks the caller and the marks against it.
    async fn check_grade(
        tx: &mut Transaction<'_, Postgres>,
        teacher_id: UserId,
        dto: &RecordGradeDto,
    ) -> Result<(), AppError> {
        let exam = sqlx::query_as::<_, ExamScope>(
            "SELECT course_id, max_marks FROM exams WHERE id = $1 FOR SHARE",
        )
        .bind(dto.exam_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Exam not found")))?;

        let assigned = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM teacher_courses WHERE teacher_id = $1 AND course_id = $2)",
        )
        .bind(teacher_id)
        .bind(exam.course_id)
        .fetch_one(&mut **tx)
        .await?;
        if !assigned {
            return Err(AppError::forbidden(
                "Access denied. You are not assigned to this course",
            ));
        }

        if dto.marks_obtained > exam.max_marks {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "marks_obtained must be between 0 and {}",
                exam.max_marks
            )));
        }

        let enrolled = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                 SELECT 1 FROM student_classes sc
                 JOIN class_courses cc ON cc.class_id = sc.class_id
                 WHERE sc.student_id = $1 AND cc.course_id = $2)"#,
        )
        .bind(dto.student_id)
        .bind(exam.course_id)
        .fetch_one(&mut **tx)
        .await?;
        if !enrolled {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Student {} does not take this course",
                dto.student_id
            )));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn record_grade(
        db: &PgPool,
        teacher_id: UserId,
        dto: RecordGradeDto,
    ) -> Result<Grade, AppError> {
        let mut tx = db.begin().await?;
        Self::check_grade(&mut tx, teacher_id, &dto).await?;

        let grade = sqlx::query_as::<_, Grade>(&format!(
            r#"INSERT INTO grades (exam_id, student_id, marks_obtained)
               VALUES ($1, $2, $3)
               RETURNING {GRADE_COLUMNS}"#
        ))
        .bind(dto.exam_id)
        .bind(dto.student_id)
        .bind(dto.marks_obtained)
        .fetch_one(&mut *tx)
        .await
        .or_conflict(
            "Grade already recorded for this student and exam",
            "Exam or student not found",
        )?;

        tx.commit().await?;
        Ok(grade)
    }

    #[instrument(skip(db))]
    pub async fn update_grade(
        db: &PgPool,
        teacher_id: UserId,
        dto: RecordGradeDto,
    ) -> Result<Grade, AppError> {
        let mut tx = db.begin().await?;
        Self::check_grade(&mut tx, teacher_id, &dto).await?;

        let grade = sqlx::query_as::<_, Grade>(&format!(
            r#"UPDATE grades SET marks_obtained = $3, updated_at = NOW()
               WHERE exam_id = $1 AND student_id = $2
               RETURNING {GRADE_COLUMNS}"#
        ))
        .bind(dto.exam_id)
        .bind(dto.student_id)
        .bind(dto.marks_obtained)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Grade not found")))?;

        tx.commit().await?;
        info!(grade_id = %grade.id, "Grade updated");
        Ok(grade)
    }

    #[instrument(skip(db))]
    pub async fn get_grades_by_exam(
        db: &PgPool,
        teacher_id: UserId,
        exam_id: ExamId,
    ) -> Result<Vec<GradeWithStudent>, AppError> {
        let exam = ExamService::get_exam(db, exam_id).await?;
        CourseService::ensure_teacher_assigned(db, teacher_id, exam.course_id).await?;

        let grades = sqlx::query_as::<_, GradeWithStudent>(
            r#"SELECT g.id, g.exam_id, g.student_id, s.name AS student_name,
                      g.marks_obtained, g.updated_at
               FROM grades g
               JOIN students s ON s.id = g.student_id
               WHERE g.exam_id = $1
               ORDER BY s.name"#,
        )
        .bind(exam_id)
        .fetch_all(db)
        .await?;

        Ok(grades)
    }

    /// Active students of every class taking the course, with their marks
    /// for each of the course's exams.
    #[instrument(skip(db))]
    pub async fn get_gradebook(
        db: &PgPool,
        teacher_id: UserId,
        course_id: CourseId,
    ) -> Result<Gradebook, AppError> {
        let course = CourseService::get_course(db, course_id).await?;
        CourseService::ensure_teacher_assigned(db, teacher_id, course_id).await?;
        let exams = ExamService::get_exams_by_course(db, course_id).await?;

        let roster = sqlx::query_as::<_, RosterRow>(
            r#"SELECT DISTINCT ON (s.id)
                 s.id AS student_id, s.name, c.id AS class_id, c.name AS class_name
               FROM class_courses cc
               JOIN classes c ON c.id = cc.class_id
               JOIN student_classes sc ON sc.class_id = c.id AND sc.status = 'active'
               JOIN students s ON s.id = sc.student_id
               WHERE cc.course_id = $1
               ORDER BY s.id, c.id"#,
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        let grades = sqlx::query_as::<_, GradeRow>(
            r#"SELECT g.student_id, g.exam_id, g.marks_obtained
               FROM grades g
               JOIN exams e ON e.id = g.exam_id
               WHERE e.course_id = $1
               ORDER BY e.date, e.id"#,
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        let mut by_student: BTreeMap<StudentId, Vec<GradeEntry>> = BTreeMap::new();
        for row in grades {
            by_student.entry(row.student_id).or_default().push(GradeEntry {
                exam_id: row.exam_id,
                marks_obtained: row.marks_obtained,
            });
        }

        let mut students: Vec<GradebookStudent> = roster
            .into_iter()
            .map(|row| GradebookStudent {
                grades: by_student.remove(&row.student_id).unwrap_or_default(),
                student_id: row.student_id,
                name: row.name,
                class_id: row.class_id,
                class_name: row.class_name,
            })
            .collect();
        students.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Gradebook {
            course,
            exams,
            students,
        })
    }
}
