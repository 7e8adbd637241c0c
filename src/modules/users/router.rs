use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{
    bulk_delete_users, create_user, delete_user, get_teacher_details, get_teachers,
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/{id}", delete(delete_user))
        .route("/teachers/{branch_id}", get(get_teachers))
        .route("/teacher_details/{branch_id}", get(get_teacher_details))
}

pub fn init_user_management_router() -> Router<AppState> {
    Router::new().route("/users/bulk-delete", post(bulk_delete_users))
}
