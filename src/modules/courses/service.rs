use bridgeschool_auth::Role;
use bridgeschool_db::ConstraintExt;
use bridgeschool_models::{BranchId, CourseId, UserId};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::modules::branches::service::BranchService;
use crate::modules::courses::model::{Course, CourseAssignment, CreateCourseDto, TeacherCourse};
use crate::modules::sessions::service::SessionService;
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;

const COURSE_COLUMNS: &str = "id, name, branch_id, session_id, created_at";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        BranchService::ensure_exists(db, dto.branch_id).await?;
        SessionService::ensure_in_branch(db, dto.session_id, dto.branch_id).await?;

        let course = sqlx::query_as::<_, Course>(&format!(
            r#"INSERT INTO courses (name, branch_id, session_id)
               VALUES ($1, $2, $3)
               RETURNING {COURSE_COLUMNS}"#
        ))
        .bind(&dto.name)
        .bind(dto.branch_id)
        .bind(dto.session_id)
        .fetch_one(db)
        .await
        .or_conflict("Course already exists", "Branch or session not found")?;

        Ok(course)
    }

    #[instrument(skip(db))]
    pub async fn get_course(db: &PgPool, id: CourseId) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_courses_by_branch(
        db: &PgPool,
        branch_id: BranchId,
    ) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE branch_id = $1 ORDER BY name"
        ))
        .bind(branch_id)
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    /// Cascades to class links, teacher links and exams of the course.
    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, id: CourseId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }
        Ok(())
    }

    /// Links the course to every listed class and, where a teacher is given,
    /// links that teacher to the course for that class.
    ///
    /// Existing links are left untouched. The batch runs in one transaction:
    /// a missing class, a missing user or a non-teacher user fails the whole
    /// batch and nothing is written.
    #[instrument(skip(db, assignments), fields(pairs = assignments.len()))]
    pub async fn assign_course(
        db: &PgPool,
        course_id: CourseId,
        assignments: &[CourseAssignment],
    ) -> Result<Vec<CourseAssignment>, AppError> {
        let mut tx = db.begin().await?;

        // Row lock keeps the course alive until commit.
        let course_exists =
            sqlx::query_scalar::<_, CourseId>("SELECT id FROM courses WHERE id = $1 FOR SHARE")
                .bind(course_id)
                .fetch_optional(&mut *tx)
                .await?
                .is_some();
        if !course_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        for assignment in assignments {
            sqlx::query(
                r#"INSERT INTO class_courses (class_id, course_id)
                   VALUES ($1, $2)
                   ON CONFLICT (class_id, course_id) DO NOTHING"#,
            )
            .bind(assignment.class_id)
            .bind(course_id)
            .execute(&mut *tx)
            .await
            .or_conflict(
                "Class already linked",
                &format!("Class {} not found", assignment.class_id),
            )?;

            if let Some(teacher_id) = assignment.teacher_id {
                UserService::ensure_role(&mut *tx, teacher_id, Role::Teacher).await?;

                sqlx::query(
                    r#"INSERT INTO teacher_courses (teacher_id, course_id, class_id)
                       VALUES ($1, $2, $3)
                       ON CONFLICT DO NOTHING"#,
                )
                .bind(teacher_id)
                .bind(course_id)
                .bind(assignment.class_id)
                .execute(&mut *tx)
                .await
                .or_conflict("Teacher already linked", "Teacher not found")?;
            }
        }

        tx.commit().await?;
        info!(course_id = %course_id, "Course assignments committed");

        Self::get_course_assignments(db, course_id).await
    }

    /// Current (class, teacher) links of a course. A class without a teacher
    /// appears once with `teacher_id: null`.
    #[instrument(skip(db))]
    pub async fn get_course_assignments(
        db: &PgPool,
        course_id: CourseId,
    ) -> Result<Vec<CourseAssignment>, AppError> {
        let assignments = sqlx::query_as::<_, CourseAssignment>(
            r#"SELECT cc.class_id, tc.teacher_id
               FROM class_courses cc
               LEFT JOIN teacher_courses tc
                 ON tc.course_id = cc.course_id AND tc.class_id = cc.class_id
               WHERE cc.course_id = $1
               ORDER BY cc.class_id, tc.teacher_id"#,
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(assignments)
    }

    #[instrument(skip(db))]
    pub async fn get_teacher_courses(
        db: &PgPool,
        teacher_id: UserId,
    ) -> Result<Vec<TeacherCourse>, AppError> {
        let courses = sqlx::query_as::<_, TeacherCourse>(
            r#"SELECT
                c.id AS course_id,
                c.name AS course_name,
                tc.class_id,
                cl.name AS class_name,
                s.id AS session_id,
                s.name AS session_name,
                b.id AS branch_id,
                b.name AS branch_name
               FROM teacher_courses tc
               JOIN courses c ON c.id = tc.course_id
               JOIN sessions s ON s.id = c.session_id
               JOIN branches b ON b.id = c.branch_id
               LEFT JOIN classes cl ON cl.id = tc.class_id
               WHERE tc.teacher_id = $1
               ORDER BY c.name, cl.name"#,
        )
        .bind(teacher_id)
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    /// Fails with `Forbidden` unless the teacher is linked to the course.
    pub async fn ensure_teacher_assigned(
        db: &PgPool,
        teacher_id: UserId,
        course_id: CourseId,
    ) -> Result<(), AppError> {
        let assigned = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM teacher_courses WHERE teacher_id = $1 AND course_id = $2)",
        )
        .bind(teacher_id)
        .bind(course_id)
        .fetch_one(db)
        .await?;

        if !assigned {
            return Err(AppError::forbidden(
                "Access denied. You are not assigned to this course",
            ));
        }
        Ok(())
    }
}
