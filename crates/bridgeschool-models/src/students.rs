//! Student models and DTOs.

use crate::enrollments::StudentStatus;
use crate::ids::{BranchId, ClassId, EnrollmentId, StudentId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub branch_id: BranchId,
    pub created_at: DateTime<Utc>,
}

/// Branch roster row: the student plus their current active class, if any.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentWithClass {
    pub id: StudentId,
    pub name: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub branch_id: BranchId,
    pub class_id: Option<ClassId>,
    pub class_name: Option<String>,
}

/// A student as enrolled in one class.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClassStudent {
    pub enrollment_id: EnrollmentId,
    pub student_id: StudentId,
    pub name: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub status: StudentStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub dob: NaiveDate,
    #[validate(length(min = 1, max = 50))]
    pub gender: String,
    pub branch_id: BranchId,
    /// Optional class to enroll the new student into as `active`.
    pub class_id: Option<ClassId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_student_dto_validation() {
        let dto: CreateStudentDto = serde_json::from_str(
            r#"{"name":"Tobi Ade","dob":"2012-04-09","gender":"male","branch_id":1}"#,
        )
        .unwrap();
        assert!(dto.validate().is_ok());
        assert!(dto.class_id.is_none());

        let missing_gender = CreateStudentDto {
            gender: String::new(),
            ..dto
        };
        assert!(missing_gender.validate().is_err());
    }

    #[test]
    fn test_bad_date_is_rejected_on_parse() {
        let parsed = serde_json::from_str::<CreateStudentDto>(
            r#"{"name":"A","dob":"09/04/2012","gender":"f","branch_id":1}"#,
        );
        assert!(parsed.is_err());
    }
}
