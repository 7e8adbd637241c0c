//! Grade models, DTOs and the teacher gradebook view.

use crate::courses::Course;
use crate::exams::Exam;
use crate::ids::{ClassId, ExamId, GradeId, StudentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Grade {
    pub id: GradeId,
    pub exam_id: ExamId,
    pub student_id: StudentId,
    pub marks_obtained: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GradeWithStudent {
    pub id: GradeId,
    pub exam_id: ExamId,
    pub student_id: StudentId,
    pub student_name: String,
    pub marks_obtained: i32,
    pub updated_at: DateTime<Utc>,
}

/// Used for both recording a new grade and updating an existing one.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordGradeDto {
    pub exam_id: ExamId,
    pub student_id: StudentId,
    #[validate(range(min = 0, message = "marks_obtained must not be negative"))]
    pub marks_obtained: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GradeEntry {
    pub exam_id: ExamId,
    pub marks_obtained: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GradebookStudent {
    pub student_id: StudentId,
    pub name: String,
    pub class_id: ClassId,
    pub class_name: String,
    pub grades: Vec<GradeEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Gradebook {
    pub course: Course,
    pub exams: Vec<Exam>,
    pub students: Vec<GradebookStudent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_marks_rejected() {
        let dto = RecordGradeDto {
            exam_id: ExamId(1),
            student_id: StudentId(1),
            marks_obtained: -1,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_zero_marks_allowed() {
        let dto = RecordGradeDto {
            exam_id: ExamId(1),
            student_id: StudentId(1),
            marks_obtained: 0,
        };
        assert!(dto.validate().is_ok());
    }
}
