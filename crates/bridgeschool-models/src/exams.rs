//! Exam models and DTOs.

use crate::ids::{CourseId, ExamId, SessionId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Exam {
    pub id: ExamId,
    pub name: String,
    pub max_marks: i32,
    pub date: NaiveDate,
    pub course_id: CourseId,
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateExamDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 1, message = "max_marks must be positive"))]
    pub max_marks: i32,
    pub date: NaiveDate,
    pub course_id: CourseId,
    pub session_id: SessionId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_marks_must_be_positive() {
        let mut dto = CreateExamDto {
            name: "Midterm".to_string(),
            max_marks: 100,
            date: "2025-11-03".parse().unwrap(),
            course_id: CourseId(1),
            session_id: SessionId(1),
        };
        assert!(dto.validate().is_ok());

        dto.max_marks = 0;
        assert!(dto.validate().is_err());
    }
}
