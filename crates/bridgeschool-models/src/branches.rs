//! Branch models and DTOs.

use crate::ids::BranchId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBranchDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBranchDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_branch_dto_validation() {
        let valid = CreateBranchDto {
            name: "Main Campus".to_string(),
            address: Some("12 Harbour Road".to_string()),
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateBranchDto {
            name: "".to_string(),
            address: None,
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_update_branch_dto_allows_partial() {
        let dto = UpdateBranchDto {
            name: None,
            address: Some("New address".to_string()),
        };
        assert!(dto.validate().is_ok());
    }
}
