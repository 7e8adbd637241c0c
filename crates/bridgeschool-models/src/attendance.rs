//! Attendance models and DTOs.

use crate::ids::{AttendanceId, ClassId, StudentId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "attendance_status", rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub class_id: ClassId,
    pub student_id: StudentId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    /// Recording teacher, cleared when that user is deleted.
    pub teacher_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordAttendanceDto {
    pub class_id: ClassId,
    pub student_id: StudentId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceEntry {
    pub student_id: StudentId,
    pub status: AttendanceStatus,
}

/// A whole-class register for one day.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ClassAttendanceDto {
    pub class_id: ClassId,
    pub date: NaiveDate,
    #[validate(length(min = 1, max = 500))]
    pub records: Vec<AttendanceEntry>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceQuery {
    /// Restrict to one day (YYYY-MM-DD).
    pub date: Option<NaiveDate>,
}
