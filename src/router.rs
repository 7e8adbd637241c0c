use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, extract::State, middleware, routing::get};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::role::{require_admin, require_super_admin, require_teacher};
use crate::modules::attendance::router::init_attendance_router;
use crate::modules::auth::controller::{admin_me, teacher_me};
use crate::modules::auth::router::init_auth_router;
use crate::modules::branches::router::{init_branch_management_router, init_branches_router};
use crate::modules::classes::router::init_classes_router;
use crate::modules::courses::router::{init_courses_router, init_teacher_courses_router};
use crate::modules::enrollments::router::init_enrollments_router;
use crate::modules::exams::router::init_exams_router;
use crate::modules::grades::router::init_grades_router;
use crate::modules::sessions::router::init_sessions_router;
use crate::modules::students::router::init_students_router;
use crate::modules::users::router::{init_user_management_router, init_users_router};
use crate::state::AppState;

async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": state.server_config.project_name,
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/swagger-ui",
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Every route under the API prefix. Each group but `/auth` sits behind a
/// single role guard.
fn api_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", get(admin_me))
        .merge(init_branches_router())
        .merge(init_sessions_router())
        .merge(init_classes_router())
        .merge(init_courses_router())
        .merge(init_users_router())
        .merge(init_students_router())
        .merge(init_enrollments_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let super_admin = Router::new()
        .merge(init_branch_management_router())
        .merge(init_user_management_router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_super_admin,
        ));

    let teacher = Router::new()
        .route("/", get(teacher_me))
        .merge(init_teacher_courses_router())
        .merge(init_exams_router())
        .merge(init_grades_router())
        .merge(init_attendance_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_teacher));

    Router::new()
        .nest("/auth", init_auth_router())
        .nest("/admin", admin)
        .nest("/super_admin", super_admin)
        .nest("/teacher", teacher)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let api = api_router(&state);
    let prefix = state.server_config.api_prefix.as_str();

    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health));
    // axum refuses to nest at the root path.
    let router = if prefix == "/" {
        router.merge(api)
    } else {
        router.nest(prefix, api)
    };

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
}
