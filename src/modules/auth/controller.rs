use axum::{Json, extract::State};
use bridgeschool_auth::Claims;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

/// Exchange staff credentials for an access token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_user(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Claims of the calling admin
#[utoipa::path(
    get,
    path = "/api/v1/admin",
    responses(
        (status = 200, description = "Verified claims", body = Claims),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn admin_me(auth_user: AuthUser) -> Json<Claims> {
    Json(auth_user.0)
}

/// Claims of the calling teacher
#[utoipa::path(
    get,
    path = "/api/v1/teacher",
    responses(
        (status = 200, description = "Verified claims", body = Claims),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not a teacher", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn teacher_me(auth_user: AuthUser) -> Json<Claims> {
    Json(auth_user.0)
}
