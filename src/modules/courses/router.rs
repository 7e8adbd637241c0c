use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{
    assign_course, create_course, delete_course, get_course_assignments, get_courses,
    get_my_courses,
};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/courses", post(create_course))
        .route("/courses/{branch_id}", get(get_courses))
        .route("/course/{id}", delete(delete_course))
        .route(
            "/assign_course/{course_id}",
            get(get_course_assignments).post(assign_course),
        )
}

pub fn init_teacher_courses_router() -> Router<AppState> {
    Router::new().route("/courses", get(get_my_courses))
}
