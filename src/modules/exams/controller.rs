use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bridgeschool_models::{CourseId, ExamId};
use tracing::instrument;

use crate::metrics::track_record_created;
use crate::middleware::auth::AuthUser;
use crate::modules::courses::service::CourseService;
use crate::modules::exams::model::{CreateExamDto, Exam};
use crate::modules::exams::service::ExamService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/teacher/exams",
    request_body = CreateExamDto,
    responses(
        (status = 201, description = "Exam created", body = Exam),
        (status = 403, description = "Not assigned to the course", body = ErrorResponse),
        (status = 404, description = "Course or session not found", body = ErrorResponse)
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_exam(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateExamDto>,
) -> Result<(StatusCode, Json<Exam>), AppError> {
    let exam = ExamService::create_exam(&state.db, auth_user.user_id()?, dto).await?;
    track_record_created("exam");
    Ok((StatusCode::CREATED, Json(exam)))
}

#[utoipa::path(
    get,
    path = "/api/v1/teacher/exams/{course_id}",
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Exams of the course", body = Vec<Exam>),
        (status = 403, description = "Not assigned to the course", body = ErrorResponse)
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_exams(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<CourseId>,
) -> Result<Json<Vec<Exam>>, AppError> {
    CourseService::ensure_teacher_assigned(&state.db, auth_user.user_id()?, course_id).await?;
    let exams = ExamService::get_exams_by_course(&state.db, course_id).await?;
    Ok(Json(exams))
}

#[utoipa::path(
    delete,
    path = "/api/v1/teacher/exam/{id}",
    params(("id" = i32, Path, description = "Exam ID")),
    responses(
        (status = 204, description = "Exam and its grades deleted"),
        (status = 403, description = "Not assigned to the course", body = ErrorResponse),
        (status = 404, description = "Exam not found", body = ErrorResponse)
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_exam(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<ExamId>,
) -> Result<StatusCode, AppError> {
    ExamService::delete_exam(&state.db, auth_user.user_id()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
