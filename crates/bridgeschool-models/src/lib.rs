//! # Bridge School Models
//!
//! Database rows, request DTOs and response shapes for every entity the
//! API manages. Rows derive [`sqlx::FromRow`], requests derive
//! [`validator::Validate`], and everything that crosses the wire derives
//! [`utoipa::ToSchema`] for the OpenAPI document.
//!
//! # Modules
//!
//! - [`ids`]: typed entity keys
//! - [`branches`], [`sessions`], [`classes`], [`courses`], [`students`]
//! - [`users`]: staff accounts
//! - [`enrollments`]: student membership in classes
//! - [`exams`], [`grades`], [`attendance`]
//! - [`auth`]: login request/response

pub mod attendance;
pub mod auth;
pub mod branches;
pub mod classes;
pub mod courses;
pub mod enrollments;
pub mod exams;
pub mod grades;
pub mod ids;
pub mod sessions;
pub mod students;
pub mod users;

pub use ids::{
    AttendanceId, BranchId, ClassId, CourseId, EnrollmentId, ExamId, GradeId, SessionId,
    StudentId, UserId,
};
