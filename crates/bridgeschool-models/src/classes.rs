//! Class models and DTOs.

use crate::ids::{BranchId, ClassId, SessionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub branch_id: BranchId,
    pub session_id: SessionId,
    /// Homeroom teacher, cleared when that user is deleted.
    pub class_teacher_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// Class listing row with homeroom teacher name and active enrollment count.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClassWithDetails {
    pub id: ClassId,
    pub name: String,
    pub branch_id: BranchId,
    pub session_id: SessionId,
    pub session_name: String,
    pub class_teacher_id: Option<UserId>,
    pub class_teacher_name: Option<String>,
    pub student_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClassSummary {
    pub id: ClassId,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClassDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub branch_id: BranchId,
    pub session_id: SessionId,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignHomeroomTeacherDto {
    pub teacher_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_class_dto_validation() {
        let valid = CreateClassDto {
            name: "JSS 1A".to_string(),
            branch_id: BranchId(1),
            session_id: SessionId(1),
        };
        assert!(valid.validate().is_ok());

        let blank = CreateClassDto {
            name: "".to_string(),
            branch_id: BranchId(1),
            session_id: SessionId(1),
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_assign_homeroom_dto_parses_uuid() {
        let dto: AssignHomeroomTeacherDto = serde_json::from_str(
            r#"{"teacher_id":"67e55044-10b1-426f-9247-bb680e5fe0c8"}"#,
        )
        .unwrap();
        assert_eq!(
            dto.teacher_id.to_string(),
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
    }
}
