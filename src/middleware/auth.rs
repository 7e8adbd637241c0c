use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use bridgeschool_auth::Claims;
use bridgeschool_models::UserId;

use crate::metrics::track_jwt_validation;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Verified identity of the caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The token subject as a staff user id.
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0
            .id
            .parse::<UserId>()
            .map_err(|_| AppError::unauthorized("Invalid token: user id is not a staff id"))
    }

    pub fn role(&self) -> Option<&str> {
        self.0.role()
    }
}

/// Pulls the raw token out of `Authorization: Bearer <token>`.
pub async fn bearer_token(parts: &mut Parts) -> Result<String, AppError> {
    TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, &())
        .await
        .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string())
        .map_err(|rejection| {
            if rejection.is_missing() {
                AppError::unauthorized("Missing authorization header")
            } else {
                AppError::unauthorized("Invalid authorization header format")
            }
        })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by the role guard for every protected route.
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let token = bearer_token(parts).await?;
        let claims = state.verifier.verify(&token);
        track_jwt_validation(claims.is_ok());

        Ok(AuthUser(claims?))
    }
}
