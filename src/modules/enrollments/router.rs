use axum::{
    Router,
    routing::{patch, post},
};

use crate::state::AppState;

use super::controller::{enroll_student, promote_students, update_enrollment};

pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/enrollments", post(enroll_student))
        .route("/enrollments/{id}", patch(update_enrollment))
        .route("/promote/{class_id}", post(promote_students))
}
