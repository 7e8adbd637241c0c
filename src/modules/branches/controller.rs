use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bridgeschool_models::BranchId;
use tracing::instrument;

use crate::metrics::track_record_created;
use crate::modules::branches::model::{Branch, CreateBranchDto, UpdateBranchDto};
use crate::modules::branches::service::BranchService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/admin/branches",
    responses(
        (status = 200, description = "All branches", body = Vec<Branch>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Branches",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_branches(State(state): State<AppState>) -> Result<Json<Vec<Branch>>, AppError> {
    let branches = BranchService::get_branches(&state.db).await?;
    Ok(Json(branches))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/branches/{id}",
    params(("id" = i32, Path, description = "Branch ID")),
    responses(
        (status = 200, description = "Branch details", body = Branch),
        (status = 404, description = "Branch not found", body = ErrorResponse)
    ),
    tag = "Branches",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_branch(
    State(state): State<AppState>,
    Path(id): Path<BranchId>,
) -> Result<Json<Branch>, AppError> {
    let branch = BranchService::get_branch(&state.db, id).await?;
    Ok(Json(branch))
}

#[utoipa::path(
    post,
    path = "/api/v1/super_admin/branches",
    request_body = CreateBranchDto,
    responses(
        (status = 201, description = "Branch created", body = Branch),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Super admin only", body = ErrorResponse)
    ),
    tag = "Branches",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_branch(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateBranchDto>,
) -> Result<(StatusCode, Json<Branch>), AppError> {
    let branch = BranchService::create_branch(&state.db, dto).await?;
    track_record_created("branch");
    Ok((StatusCode::CREATED, Json(branch)))
}

#[utoipa::path(
    put,
    path = "/api/v1/super_admin/branches/{id}",
    params(("id" = i32, Path, description = "Branch ID")),
    request_body = UpdateBranchDto,
    responses(
        (status = 200, description = "Branch updated", body = Branch),
        (status = 404, description = "Branch not found", body = ErrorResponse)
    ),
    tag = "Branches",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_branch(
    State(state): State<AppState>,
    Path(id): Path<BranchId>,
    ValidatedJson(dto): ValidatedJson<UpdateBranchDto>,
) -> Result<Json<Branch>, AppError> {
    let branch = BranchService::update_branch(&state.db, id, dto).await?;
    Ok(Json(branch))
}

#[utoipa::path(
    delete,
    path = "/api/v1/super_admin/branches/{id}",
    params(("id" = i32, Path, description = "Branch ID")),
    responses(
        (status = 204, description = "Branch and everything it owns deleted"),
        (status = 404, description = "Branch not found", body = ErrorResponse)
    ),
    tag = "Branches",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_branch(
    State(state): State<AppState>,
    Path(id): Path<BranchId>,
) -> Result<StatusCode, AppError> {
    BranchService::delete_branch(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
