use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bridgeschool_models::{ClassId, EnrollmentId};
use tracing::instrument;

use crate::metrics::track_record_created;
use crate::modules::enrollments::model::{
    EnrollStudentDto, Enrollment, PromoteStudentsDto, PromotionResponse, UpdateEnrollmentDto,
};
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/admin/enrollments",
    request_body = EnrollStudentDto,
    responses(
        (status = 201, description = "Student enrolled", body = Enrollment),
        (status = 404, description = "Student or class not found", body = ErrorResponse),
        (status = 409, description = "Already enrolled", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn enroll_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<EnrollStudentDto>,
) -> Result<(StatusCode, Json<Enrollment>), AppError> {
    let enrollment = EnrollmentService::enroll_student(&state.db, dto).await?;
    track_record_created("enrollment");
    Ok((StatusCode::CREATED, Json(enrollment)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/enrollments/{id}",
    params(("id" = i32, Path, description = "Enrollment ID")),
    request_body = UpdateEnrollmentDto,
    responses(
        (status = 200, description = "Status updated", body = Enrollment),
        (status = 404, description = "Enrollment not found", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_enrollment(
    State(state): State<AppState>,
    Path(id): Path<EnrollmentId>,
    ValidatedJson(dto): ValidatedJson<UpdateEnrollmentDto>,
) -> Result<Json<Enrollment>, AppError> {
    let enrollment = EnrollmentService::update_status(&state.db, id, dto.status).await?;
    Ok(Json(enrollment))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/promote/{class_id}",
    params(("class_id" = i32, Path, description = "Target class ID")),
    request_body = PromoteStudentsDto,
    responses(
        (status = 200, description = "Students promoted", body = PromotionResponse),
        (status = 404, description = "Class or student not found; nothing changed", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn promote_students(
    State(state): State<AppState>,
    Path(class_id): Path<ClassId>,
    ValidatedJson(dto): ValidatedJson<PromoteStudentsDto>,
) -> Result<Json<PromotionResponse>, AppError> {
    let response =
        EnrollmentService::promote_students(&state.db, class_id, &dto.student_ids).await?;
    Ok(Json(response))
}
