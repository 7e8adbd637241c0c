use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{create_branch, delete_branch, get_branch, get_branches, update_branch};

/// Read access for admins.
pub fn init_branches_router() -> Router<AppState> {
    Router::new()
        .route("/branches", get(get_branches))
        .route("/branches/{id}", get(get_branch))
}

/// Branch lifecycle, super admins only.
pub fn init_branch_management_router() -> Router<AppState> {
    Router::new()
        .route("/branches", post(create_branch))
        .route("/branches/{id}", put(update_branch).delete(delete_branch))
}
