//! Router-level role guard.
//!
//! Each guarded router group is bound to exactly one [`RoleSet`]:
//!
//! ```rust,ignore
//! Router::new()
//!     .nest("/admin", admin_routes)
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use bridgeschool_auth::{RoleSet, authorize};
use tracing::debug;

use crate::metrics::{track_authorization_check, track_jwt_validation};
use crate::middleware::auth::{AuthUser, bearer_token};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Verifies the bearer token, authorizes its role against `allowed`, and
/// hands the claims to the handler through request extensions.
pub async fn require_roles(
    state: &AppState,
    req: Request,
    next: Next,
    allowed: RoleSet,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = bearer_token(&mut parts).await?;
    let claims = state.verifier.verify(&token);
    track_jwt_validation(claims.is_ok());
    let claims = claims?;

    let role = claims.role().unwrap_or("none").to_string();
    let claims = match authorize(claims, &allowed) {
        Ok(claims) => {
            track_authorization_check(true, &role);
            claims
        }
        Err(e) => {
            debug!(role = %role, allowed = %allowed, "Role guard denied request");
            track_authorization_check(false, &role);
            return Err(e);
        }
    };

    parts.extensions.insert(AuthUser(claims));
    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// admin or super_admin
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(&state, req, next, RoleSet::ADMINS).await
}

pub async fn require_super_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(&state, req, next, RoleSet::SUPER_ADMINS).await
}

pub async fn require_teacher(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(&state, req, next, RoleSet::TEACHERS).await
}
