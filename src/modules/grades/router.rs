use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_gradebook, get_grades, record_grade, update_grade};

pub fn init_grades_router() -> Router<AppState> {
    Router::new()
        .route("/grades", post(record_grade).put(update_grade))
        .route("/grades/{exam_id}", get(get_grades))
        .route("/courses/{course_id}/gradebook", get(get_gradebook))
}
