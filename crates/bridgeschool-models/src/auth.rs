//! Login request and response models.

use crate::users::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let ok = LoginRequest {
            email: "admin@bridge.school".to_string(),
            password: "pw".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty_password = LoginRequest {
            email: "admin@bridge.school".to_string(),
            password: "".to_string(),
        };
        assert!(empty_password.validate().is_err());
    }
}
