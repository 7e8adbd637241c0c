use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use bridgeschool_models::ClassId;
use tracing::instrument;

use crate::metrics::track_record_created;
use crate::middleware::auth::AuthUser;
use crate::modules::attendance::model::{
    AttendanceQuery, AttendanceRecord, ClassAttendanceDto, RecordAttendanceDto,
};
use crate::modules::attendance::service::AttendanceService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/teacher/attendance",
    request_body = RecordAttendanceDto,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceRecord),
        (status = 400, description = "Student not enrolled in the class", body = ErrorResponse),
        (status = 403, description = "Caller does not teach the class", body = ErrorResponse),
        (status = 409, description = "Already recorded for that day", body = ErrorResponse)
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn record_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<RecordAttendanceDto>,
) -> Result<(StatusCode, Json<AttendanceRecord>), AppError> {
    let record = AttendanceService::record_attendance(&state.db, auth_user.user_id()?, dto).await?;
    track_record_created("attendance");
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    post,
    path = "/api/v1/teacher/attendance/batch",
    request_body = ClassAttendanceDto,
    responses(
        (status = 201, description = "Register recorded", body = Vec<AttendanceRecord>),
        (status = 403, description = "Caller does not teach the class", body = ErrorResponse),
        (status = 409, description = "An entry was already recorded", body = ErrorResponse)
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn record_class_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ClassAttendanceDto>,
) -> Result<(StatusCode, Json<Vec<AttendanceRecord>>), AppError> {
    let records =
        AttendanceService::record_class_attendance(&state.db, auth_user.user_id()?, dto).await?;
    for _ in &records {
        track_record_created("attendance");
    }
    Ok((StatusCode::CREATED, Json(records)))
}

#[utoipa::path(
    get,
    path = "/api/v1/teacher/attendance/{class_id}",
    params(
        ("class_id" = i32, Path, description = "Class ID"),
        AttendanceQuery
    ),
    responses(
        (status = 200, description = "Attendance of the class", body = Vec<AttendanceRecord>),
        (status = 403, description = "Caller does not teach the class", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(class_id): Path<ClassId>,
    Query(query): Query<AttendanceQuery>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let records =
        AttendanceService::get_attendance(&state.db, auth_user.user_id()?, class_id, query.date)
            .await?;
    Ok(Json(records))
}
