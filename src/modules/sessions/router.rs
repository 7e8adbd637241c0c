use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{create_session, delete_session, get_sessions};

pub fn init_sessions_router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/{branch_id}", get(get_sessions))
        .route("/session/{id}", delete(delete_session))
}
