use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bridgeschool_models::{BranchId, SessionId};
use tracing::instrument;

use crate::metrics::track_record_created;
use crate::modules::sessions::model::{CreateSessionDto, Session};
use crate::modules::sessions::service::SessionService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/admin/sessions",
    request_body = CreateSessionDto,
    responses(
        (status = 201, description = "Session created", body = Session),
        (status = 404, description = "Branch not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_session(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateSessionDto>,
) -> Result<(StatusCode, Json<Session>), AppError> {
    let session = SessionService::create_session(&state.db, dto).await?;
    track_record_created("session");
    Ok((StatusCode::CREATED, Json(session)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/sessions/{branch_id}",
    params(("branch_id" = i32, Path, description = "Branch ID")),
    responses((status = 200, description = "Sessions of the branch", body = Vec<Session>)),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_sessions(
    State(state): State<AppState>,
    Path(branch_id): Path<BranchId>,
) -> Result<Json<Vec<Session>>, AppError> {
    let sessions = SessionService::get_sessions_by_branch(&state.db, branch_id).await?;
    Ok(Json(sessions))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/session/{id}",
    params(("id" = i32, Path, description = "Session ID")),
    responses(
        (status = 204, description = "Session deleted with its classes, courses and exams"),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, AppError> {
    SessionService::delete_session(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
