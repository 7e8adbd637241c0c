use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{create_exam, delete_exam, get_exams};

pub fn init_exams_router() -> Router<AppState> {
    Router::new()
        .route("/exams", post(create_exam))
        .route("/exams/{course_id}", get(get_exams))
        .route("/exam/{id}", delete(delete_exam))
}
