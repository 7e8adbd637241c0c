//! Academic session models and DTOs.

use crate::ids::{BranchId, SessionId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub branch_id: BranchId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_session_dates"))]
pub struct CreateSessionDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub branch_id: BranchId,
}

fn validate_session_dates(dto: &CreateSessionDto) -> Result<(), ValidationError> {
    if dto.end_date < dto.start_date {
        let mut err = ValidationError::new("date_range");
        err.message = Some("end_date must not be before start_date".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(start: &str, end: &str) -> CreateSessionDto {
        CreateSessionDto {
            name: "2025/2026".to_string(),
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
            branch_id: BranchId(1),
        }
    }

    #[test]
    fn test_session_dates_in_order() {
        assert!(dto("2025-09-01", "2026-07-15").validate().is_ok());
        assert!(dto("2025-09-01", "2025-09-01").validate().is_ok());
    }

    #[test]
    fn test_session_end_before_start_rejected() {
        assert!(dto("2026-07-15", "2025-09-01").validate().is_err());
    }
}
