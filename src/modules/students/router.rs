use crate::modules::students::controller::{
    create_student, delete_student, get_student, get_students,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/students", post(create_student))
        .route("/students/{branch_id}", get(get_students))
        .route("/student/{id}", get(get_student).delete(delete_student))
}
