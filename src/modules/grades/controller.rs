use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bridgeschool_models::{CourseId, ExamId};
use tracing::instrument;

use crate::metrics::track_record_created;
use crate::middleware::auth::AuthUser;
use crate::modules::grades::model::{Grade, GradeWithStudent, Gradebook, RecordGradeDto};
use crate::modules::grades::service::GradeService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/teacher/grades",
    request_body = RecordGradeDto,
    responses(
        (status = 201, description = "Grade recorded", body = Grade),
        (status = 400, description = "Student does not take the course", body = ErrorResponse),
        (status = 403, description = "Not assigned to the course", body = ErrorResponse),
        (status = 404, description = "Exam or student not found", body = ErrorResponse),
        (status = 409, description = "Grade already recorded", body = ErrorResponse),
        (status = 422, description = "Marks out of range", body = ErrorResponse)
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn record_grade(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<RecordGradeDto>,
) -> Result<(StatusCode, Json<Grade>), AppError> {
    let grade = GradeService::record_grade(&state.db, auth_user.user_id()?, dto).await?;
    track_record_created("grade");
    Ok((StatusCode::CREATED, Json(grade)))
}

#[utoipa::path(
    put,
    path = "/api/v1/teacher/grades",
    request_body = RecordGradeDto,
    responses(
        (status = 200, description = "Grade updated", body = Grade),
        (status = 403, description = "Not assigned to the course", body = ErrorResponse),
        (status = 404, description = "No grade recorded yet", body = ErrorResponse),
        (status = 422, description = "Marks out of range", body = ErrorResponse)
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_grade(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<RecordGradeDto>,
) -> Result<Json<Grade>, AppError> {
    let grade = GradeService::update_grade(&state.db, auth_user.user_id()?, dto).await?;
    Ok(Json(grade))
}

#[utoipa::path(
    get,
    path = "/api/v1/teacher/grades/{exam_id}",
    params(("exam_id" = i32, Path, description = "Exam ID")),
    responses(
        (status = 200, description = "Grades of the exam", body = Vec<GradeWithStudent>),
        (status = 403, description = "Not assigned to the course", body = ErrorResponse),
        (status = 404, description = "Exam not found", body = ErrorResponse)
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_grades(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(exam_id): Path<ExamId>,
) -> Result<Json<Vec<GradeWithStudent>>, AppError> {
    let grades = GradeService::get_grades_by_exam(&state.db, auth_user.user_id()?, exam_id).await?;
    Ok(Json(grades))
}

#[utoipa::path(
    get,
    path = "/api/v1/teacher/courses/{course_id}/gradebook",
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course gradebook", body = Gradebook),
        (status = 403, description = "Not assigned to the course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_gradebook(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<CourseId>,
) -> Result<Json<Gradebook>, AppError> {
    let gradebook = GradeService::get_gradebook(&state.db, auth_user.user_id()?, course_id).await?;
    Ok(Json(gradebook))
}
