#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use bridgeschool::modules::users::service::UserService;
use bridgeschool::router::init_router;
use bridgeschool::state::AppState;
use bridgeschool_auth::{Claims, Role, sign_token};
use bridgeschool_config::{CorsConfig, JwtConfig, ServerConfig};
use bridgeschool_models::users::{CreateUserDto, User};
use bridgeschool_models::{BranchId, ClassId, CourseId, SessionId, StudentId};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret-key-for-integration-tests";

pub fn jwt_config() -> JwtConfig {
    JwtConfig::with_secret(TEST_SECRET)
}

/// Router over a pool that never connects; only usable for requests that
/// are answered before any query runs.
pub fn lazy_app(jwt_config: JwtConfig) -> Router {
    init_router(AppState::lazy(jwt_config).unwrap())
}

pub fn db_app(pool: PgPool) -> Router {
    init_router(AppState::new(
        pool,
        jwt_config(),
        CorsConfig::from_lookup(|_| None),
        ServerConfig::from_lookup(|_| None),
    ))
}

pub fn token(id: &str, role: &str) -> String {
    let claims = Claims::new(id).with_role(role).expires_in(3600);
    sign_token(&claims, &jwt_config()).unwrap()
}

pub fn token_for(user: &User) -> String {
    token(&user.id.to_string(), user.role.as_str())
}

pub async fn send(app: Router, request: Request<Body>) -> (Response<Body>, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (Response::from_parts(parts, Body::empty()), json)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn unique_email() -> String {
    format!("test-{}@bridge.test", Uuid::new_v4())
}

pub async fn create_user(pool: &PgPool, role: Role, branch_id: Option<BranchId>) -> User {
    UserService::create_user(
        pool,
        CreateUserDto {
            email: unique_email(),
            password: "password123".to_string(),
            first_name: "Test".to_string(),
            last_name: format!("{}", role),
            role,
            branch_id,
        },
    )
    .await
    .unwrap()
}

/// A branch with one session, one class and one course.
pub struct Campus {
    pub branch_id: BranchId,
    pub session_id: SessionId,
    pub class_id: ClassId,
    pub course_id: CourseId,
}

pub async fn create_campus(pool: &PgPool) -> Campus {
    let branch_id: BranchId =
        sqlx::query_scalar("INSERT INTO branches (name) VALUES ('Main Campus') RETURNING id")
            .fetch_one(pool)
            .await
            .unwrap();
    let session_id: SessionId = sqlx::query_scalar(
        r#"INSERT INTO sessions (name, start_date, end_date, branch_id)
           VALUES ('2025/2026', '2025-09-01', '2026-07-31', $1) RETURNING id"#,
    )
    .bind(branch_id)
    .fetch_one(pool)
    .await
    .unwrap();
    let class_id: ClassId = sqlx::query_scalar(
        "INSERT INTO classes (name, branch_id, session_id) VALUES ('Grade 1', $1, $2) RETURNING id",
    )
    .bind(branch_id)
    .bind(session_id)
    .fetch_one(pool)
    .await
    .unwrap();
    let course_id: CourseId = sqlx::query_scalar(
        "INSERT INTO courses (name, branch_id, session_id) VALUES ('Mathematics', $1, $2) RETURNING id",
    )
    .bind(branch_id)
    .bind(session_id)
    .fetch_one(pool)
    .await
    .unwrap();

    Campus {
        branch_id,
        session_id,
        class_id,
        course_id,
    }
}

pub async fn create_student(pool: &PgPool, branch_id: BranchId, name: &str) -> StudentId {
    sqlx::query_scalar(
        "INSERT INTO students (name, dob, gender, branch_id) VALUES ($1, '2015-04-02', 'female', $2) RETURNING id",
    )
    .bind(name)
    .bind(branch_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn enroll(pool: &PgPool, student_id: StudentId, class_id: ClassId) {
    sqlx::query("INSERT INTO student_classes (student_id, class_id) VALUES ($1, $2)")
        .bind(student_id)
        .bind(class_id)
        .execute(pool)
        .await
        .unwrap();
}
