//! Staff user models and DTOs.
//!
//! Staff accounts (teachers, admins and super admins) authenticate against
//! the `users` table. Password hashes never leave the service layer: [`User`]
//! has no password field.

use crate::classes::ClassSummary;
use crate::courses::TeacherCourse;
use crate::ids::{BranchId, UserId};
use bridgeschool_auth::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub branch_id: Option<BranchId>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
    pub role: Role,
    pub branch_id: Option<BranchId>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BulkDeleteUsersDto {
    #[validate(length(min = 1, max = 500))]
    pub ids: Vec<UserId>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub deleted: u64,
}

/// A teacher with everything they are assigned to.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherDetails {
    #[serde(flatten)]
    pub teacher: User,
    pub courses: Vec<TeacherCourse>,
    pub homeroom_classes: Vec<ClassSummary>,
}
