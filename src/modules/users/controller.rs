use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bridgeschool_auth::Role;
use bridgeschool_models::{BranchId, UserId};
use tracing::instrument;

use crate::metrics::track_record_created;
use crate::modules::users::model::{
    BulkDeleteUsersDto, CreateUserDto, DeletedResponse, TeacherDetails, User,
};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/admin/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 404, description = "Branch not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = UserService::create_user(&state.db, dto).await?;
    track_record_created("user");
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/teachers/{branch_id}",
    params(("branch_id" = i32, Path, description = "Branch ID")),
    responses((status = 200, description = "Teachers of the branch", body = Vec<User>)),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_teachers(
    State(state): State<AppState>,
    Path(branch_id): Path<BranchId>,
) -> Result<Json<Vec<User>>, AppError> {
    let teachers = UserService::get_users_by_role(&state.db, branch_id, Role::Teacher).await?;
    Ok(Json(teachers))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/teacher_details/{branch_id}",
    params(("branch_id" = i32, Path, description = "Branch ID")),
    responses(
        (status = 200, description = "Teachers with course and homeroom assignments", body = Vec<TeacherDetails>)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_teacher_details(
    State(state): State<AppState>,
    Path(branch_id): Path<BranchId>,
) -> Result<Json<Vec<TeacherDetails>>, AppError> {
    let details = UserService::get_teacher_details(&state.db, branch_id).await?;
    Ok(Json(details))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<StatusCode, AppError> {
    UserService::delete_user(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/super_admin/users/bulk-delete",
    request_body = BulkDeleteUsersDto,
    responses(
        (status = 200, description = "All listed users deleted", body = DeletedResponse),
        (status = 404, description = "A listed user does not exist; nothing deleted", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn bulk_delete_users(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<BulkDeleteUsersDto>,
) -> Result<Json<DeletedResponse>, AppError> {
    let deleted = UserService::delete_users(&state.db, &dto.ids).await?;
    Ok(Json(DeletedResponse { deleted }))
}
