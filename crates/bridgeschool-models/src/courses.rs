//! Course models, course assignment DTOs and teacher course views.

use crate::ids::{BranchId, ClassId, CourseId, SessionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub branch_id: BranchId,
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub branch_id: BranchId,
    pub session_id: SessionId,
}

/// One (class, optional teacher) pair of a course assignment batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseAssignment {
    pub class_id: ClassId,
    #[serde(default)]
    pub teacher_id: Option<UserId>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignCourseDto {
    #[validate(length(max = 500))]
    pub assignments: Vec<CourseAssignment>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseAssignmentsResponse {
    pub course_id: CourseId,
    pub assignments: Vec<CourseAssignment>,
}

/// A course as seen by one of its teachers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeacherCourse {
    pub course_id: CourseId,
    pub course_name: String,
    pub class_id: Option<ClassId>,
    pub class_name: Option<String>,
    pub session_id: SessionId,
    pub session_name: String,
    pub branch_id: BranchId,
    pub branch_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_teacher_defaults_to_none() {
        let dto: AssignCourseDto = serde_json::from_str(
            r#"{"assignments":[{"class_id":1,"teacher_id":"67e55044-10b1-426f-9247-bb680e5fe0c8"},{"class_id":2},{"class_id":3,"teacher_id":null}]}"#,
        )
        .unwrap();
        assert_eq!(dto.assignments.len(), 3);
        assert!(dto.assignments[0].teacher_id.is_some());
        assert!(dto.assignments[1].teacher_id.is_none());
        assert!(dto.assignments[2].teacher_id.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_course_dto_validation() {
        let dto = CreateCourseDto {
            name: "x".repeat(256),
            branch_id: BranchId(1),
            session_id: SessionId(1),
        };
        assert!(dto.validate().is_err());
    }
}
