//! Enrollment (student in class) models and DTOs.

use crate::ids::{ClassId, EnrollmentId, StudentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "student_status", rename_all = "snake_case")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Graduated,
    Transferred,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub class_id: ClassId,
    pub status: StudentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EnrollStudentDto {
    pub student_id: StudentId,
    pub class_id: ClassId,
    #[serde(default)]
    pub status: StudentStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEnrollmentDto {
    pub status: StudentStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PromoteStudentsDto {
    #[validate(length(min = 1, max = 500))]
    pub student_ids: Vec<StudentId>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PromotionResponse {
    pub class_id: ClassId,
    pub promoted: usize,
    /// Previous active enrollments switched to `inactive`.
    pub deactivated: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_active() {
        let dto: EnrollStudentDto =
            serde_json::from_str(r#"{"student_id":4,"class_id":2}"#).unwrap();
        assert_eq!(dto.status, StudentStatus::Active);
    }

    #[test]
    fn test_status_names() {
        let status: StudentStatus = serde_json::from_str("\"transferred\"").unwrap();
        assert_eq!(status, StudentStatus::Transferred);
        assert!(serde_json::from_str::<StudentStatus>("\"expelled\"").is_err());
    }

    #[test]
    fn test_promotion_requires_students() {
        let dto = PromoteStudentsDto {
            student_ids: vec![],
        };
        assert!(dto.validate().is_err());
    }
}
