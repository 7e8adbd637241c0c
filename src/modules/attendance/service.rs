use bridgeschool_db::ConstraintExt;
use bridgeschool_models::{ClassId, StudentId, UserId};
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument};

use crate::modules::attendance::model::{
    AttendanceRecord, AttendanceStatus, ClassAttendanceDto, RecordAttendanceDto,
};
use crate::utils::errors::AppError;

const ATTENDANCE_COLUMNS: &str = "id, class_id, student_id, date, status, teacher_id, created_at";

pub struct AttendanceService;

impl AttendanceService {
    /// Fails with `Forbidden` unless the teacher is the homeroom teacher of
    /// the class or teaches a course in it.
    pub async fn ensure_teaches_class(
        conn: &mut PgConnection,
        teacher_id: UserId,
        class_id: ClassId,
    ) -> Result<(), AppError> {
        let class_teacher = sqlx::query_scalar::<_, Option<UserId>>(
            "SELECT class_teacher_id FROM classes WHERE id = $1",
        )
        .bind(class_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))?;

        if class_teacher == Some(teacher_id) {
            return Ok(());
        }

        let linked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM teacher_courses WHERE teacher_id = $1 AND class_id = $2)",
        )
        .bind(teacher_id)
        .bind(class_id)
        .fetch_one(&mut *conn)
        .await?;

        if !linked {
            return Err(AppError::forbidden(
                "Access denied. You do not teach this class",
            ));
        }
        Ok(())
    }

    async fn insert_record(
        conn: &mut PgConnection,
        teacher_id: UserId,
        class_id: ClassId,
        student_id: StudentId,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<AttendanceRecord, AppError> {
        let enrolled = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM student_classes WHERE student_id = $1 AND class_id = $2)",
        )
        .bind(student_id)
        .bind(class_id)
        .fetch_one(&mut *conn)
        .await?;
        if !enrolled {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Student {} is not enrolled in class {}",
                student_id,
                class_id
            )));
        }

        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"INSERT INTO attendance (class_id, student_id, date, status, teacher_id)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {ATTENDANCE_COLUMNS}"#
        ))
        .bind(class_id)
        .bind(student_id)
        .bind(date)
        .bind(status)
        .bind(teacher_id)
        .fetch_one(&mut *conn)
        .await
        .or_conflict(
            &format!("Attendance already recorded for student {} on {}", student_id, date),
            "Class or student not found",
        )?;

        Ok(record)
    }

    #[instrument(skip(db))]
    pub async fn record_attendance(
        db: &PgPool,
        teacher_id: UserId,
        dto: RecordAttendanceDto,
    ) -> Result<AttendanceRecord, AppError> {
        let mut conn = db.acquire().await?;
        Self::ensure_teaches_class(&mut conn, teacher_id, dto.class_id).await?;
        Self::insert_record(
            &mut conn,
            teacher_id,
            dto.class_id,
            dto.student_id,
            dto.date,
            dto.status,
        )
        .await
    }

    /// Records a whole register in one transaction. Any bad entry discards
    /// the batch.
    #[instrument(skip(db, dto), fields(class_id = %dto.class_id, records = dto.records.len()))]
    pub async fn record_class_attendance(
        db: &PgPool,
        teacher_id: UserId,
        dto: ClassAttendanceDto,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let mut tx = db.begin().await?;
        Self::ensure_teaches_class(&mut tx, teacher_id, dto.class_id).await?;

        let mut records = Vec::with_capacity(dto.records.len());
        for entry in &dto.records {
            let record = Self::insert_record(
                &mut tx,
                teacher_id,
                dto.class_id,
                entry.student_id,
                dto.date,
                entry.status,
            )
            .await?;
            records.push(record);
        }

        tx.commit().await?;
        info!(class_id = %dto.class_id, date = %dto.date, "Class register recorded");
        Ok(records)
    }

    #[instrument(skip(db))]
    pub async fn get_attendance(
        db: &PgPool,
        teacher_id: UserId,
        class_id: ClassId,
        date: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let mut conn = db.acquire().await?;
        Self::ensure_teaches_class(&mut conn, teacher_id, class_id).await?;

        let records = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"SELECT {ATTENDANCE_COLUMNS} FROM attendance
               WHERE class_id = $1 AND ($2::date IS NULL OR date = $2)
               ORDER BY date DESC, student_id"#
        ))
        .bind(class_id)
        .bind(date)
        .fetch_all(&mut *conn)
        .await?;

        Ok(records)
    }
}
