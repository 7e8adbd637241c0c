use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_attendance, record_attendance, record_class_attendance};

pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/attendance", post(record_attendance))
        .route("/attendance/batch", post(record_class_attendance))
        .route("/attendance/{class_id}", get(get_attendance))
}
