use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bridgeschool_models::{BranchId, ClassId};
use tracing::instrument;

use crate::metrics::track_record_created;
use crate::modules::classes::model::{
    AssignHomeroomTeacherDto, Class, ClassStudent, ClassWithDetails, CreateClassDto,
};
use crate::modules::classes::service::ClassService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/admin/classes",
    request_body = CreateClassDto,
    responses(
        (status = 201, description = "Class created", body = Class),
        (status = 404, description = "Branch or session not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_class(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<(StatusCode, Json<Class>), AppError> {
    let class = ClassService::create_class(&state.db, dto).await?;
    track_record_created("class");
    Ok((StatusCode::CREATED, Json(class)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/classes/{branch_id}",
    params(("branch_id" = i32, Path, description = "Branch ID")),
    responses((status = 200, description = "Classes of the branch", body = Vec<ClassWithDetails>)),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_classes(
    State(state): State<AppState>,
    Path(branch_id): Path<BranchId>,
) -> Result<Json<Vec<ClassWithDetails>>, AppError> {
    let classes = ClassService::get_classes_by_branch(&state.db, branch_id).await?;
    Ok(Json(classes))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/class/{id}",
    params(("id" = i32, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class", body = Class),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<ClassId>,
) -> Result<Json<Class>, AppError> {
    let class = ClassService::get_class(&state.db, id).await?;
    Ok(Json(class))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/class/{id}/homeroom-teacher",
    params(("id" = i32, Path, description = "Class ID")),
    request_body = AssignHomeroomTeacherDto,
    responses(
        (status = 200, description = "Homeroom teacher set", body = Class),
        (status = 400, description = "User is not a teacher", body = ErrorResponse),
        (status = 404, description = "Class or user not found", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn assign_homeroom_teacher(
    State(state): State<AppState>,
    Path(id): Path<ClassId>,
    ValidatedJson(dto): ValidatedJson<AssignHomeroomTeacherDto>,
) -> Result<Json<Class>, AppError> {
    let class = ClassService::assign_homeroom_teacher(&state.db, id, dto.teacher_id).await?;
    Ok(Json(class))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/class/{id}/students",
    params(("id" = i32, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Enrolled students", body = Vec<ClassStudent>),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_class_students(
    State(state): State<AppState>,
    Path(id): Path<ClassId>,
) -> Result<Json<Vec<ClassStudent>>, AppError> {
    let students = ClassService::get_class_students(&state.db, id).await?;
    Ok(Json(students))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/class/{id}",
    params(("id" = i32, Path, description = "Class ID")),
    responses(
        (status = 204, description = "Class deleted"),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<ClassId>,
) -> Result<StatusCode, AppError> {
    ClassService::delete_class(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
