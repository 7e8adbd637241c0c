use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    assign_homeroom_teacher, create_class, delete_class, get_class, get_class_students,
    get_classes,
};

pub fn init_classes_router() -> Router<AppState> {
    Router::new()
        .route("/classes", post(create_class))
        .route("/classes/{branch_id}", get(get_classes))
        .route("/class/{id}", get(get_class).delete(delete_class))
        .route("/class/{id}/homeroom-teacher", post(assign_homeroom_teacher))
        .route("/class/{id}/students", get(get_class_students))
}
