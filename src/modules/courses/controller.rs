use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bridgeschool_models::{BranchId, CourseId};
use tracing::instrument;

use crate::metrics::track_record_created;
use crate::middleware::auth::AuthUser;
use crate::modules::courses::model::{
    AssignCourseDto, Course, CourseAssignmentsResponse, CreateCourseDto, TeacherCourse,
};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/admin/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 404, description = "Branch or session not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create_course(&state.db, dto).await?;
    track_record_created("course");
    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/courses/{branch_id}",
    params(("branch_id" = i32, Path, description = "Branch ID")),
    responses((status = 200, description = "Courses of the branch", body = Vec<Course>)),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
    Path(branch_id): Path<BranchId>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::get_courses_by_branch(&state.db, branch_id).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/course/{id}",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
) -> Result<StatusCode, AppError> {
    CourseService::delete_course(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/assign_course/{course_id}",
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Current class and teacher links", body = CourseAssignmentsResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_course_assignments(
    State(state): State<AppState>,
    Path(course_id): Path<CourseId>,
) -> Result<Json<CourseAssignmentsResponse>, AppError> {
    CourseService::get_course(&state.db, course_id).await?;
    let assignments = CourseService::get_course_assignments(&state.db, course_id).await?;
    Ok(Json(CourseAssignmentsResponse {
        course_id,
        assignments,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/assign_course/{course_id}",
    params(("course_id" = i32, Path, description = "Course ID")),
    request_body = AssignCourseDto,
    responses(
        (status = 200, description = "All links committed", body = CourseAssignmentsResponse),
        (status = 400, description = "A listed user is not a teacher; nothing written", body = ErrorResponse),
        (status = 404, description = "Course, class or user not found; nothing written", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn assign_course(
    State(state): State<AppState>,
    Path(course_id): Path<CourseId>,
    ValidatedJson(dto): ValidatedJson<AssignCourseDto>,
) -> Result<Json<CourseAssignmentsResponse>, AppError> {
    let assignments = CourseService::assign_course(&state.db, course_id, &dto.assignments).await?;
    Ok(Json(CourseAssignmentsResponse {
        course_id,
        assignments,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/teacher/courses",
    responses(
        (status = 200, description = "Courses the caller teaches", body = Vec<TeacherCourse>),
        (status = 403, description = "Teachers only", body = ErrorResponse)
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_my_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<TeacherCourse>>, AppError> {
    let courses = CourseService::get_teacher_courses(&state.db, auth_user.user_id()?).await?;
    Ok(Json(courses))
}
