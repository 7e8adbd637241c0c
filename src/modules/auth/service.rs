use bridgeschool_auth::{Claims, Role, sign_token};
use bridgeschool_config::JwtConfig;
use bridgeschool_models::BranchId;
use sqlx::{FromRow, PgPool};
use std::sync::OnceLock;
use tracing::{info, instrument, warn};

use crate::metrics::{track_jwt_issued, track_login};
use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::users::model::User;
use crate::utils::errors::AppError;
use crate::utils::password::{hash_password, verify_password};

/// Branch reported for a super admin who is not attached to any branch.
pub const DEFAULT_BRANCH: BranchId = BranchId(1);

const INVALID_CREDENTIALS: &str = "Invalid email or password";

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Hash checked for unknown emails so both failure paths pay one bcrypt verify.
fn dummy_hash() -> &'static str {
    DUMMY_HASH.get_or_init(|| hash_password("bridgeschool-unknown-user").unwrap_or_default())
}

#[derive(FromRow)]
struct UserWithPassword {
    #[sqlx(flatten)]
    user: User,
    password: String,
}

/// Identity claims carried by a staff user's access token.
pub fn claims_for(user: &User, expires_in: i64) -> Claims {
    let branch_id = match (user.role, user.branch_id) {
        (_, Some(branch)) => Some(branch.into_inner()),
        (Role::SuperAdmin, None) => Some(DEFAULT_BRANCH.into_inner()),
        (_, None) => None,
    };

    Claims {
        id: user.id.to_string(),
        role: Some(user.role.to_string()),
        first_name: Some(user.first_name.clone()),
        last_name: Some(user.last_name.clone()),
        branch_id,
        email: Some(user.email.clone()),
        name: Some(user.full_name()),
        ..Default::default()
    }
    .expires_in(expires_in)
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let email = dto.email.trim().to_lowercase();

        let found = sqlx::query_as::<_, UserWithPassword>(
            r#"SELECT id, email, first_name, last_name, role, branch_id, created_at, password
               FROM users WHERE lower(email) = $1"#,
        )
        .bind(&email)
        .fetch_optional(db)
        .await?;

        let Some(found) = found else {
            let _ = verify_password(&dto.password, dummy_hash());
            track_login(false);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &found.password)? {
            warn!(user_id = %found.user.id, "Password mismatch");
            track_login(false);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let claims = claims_for(&found.user, jwt_config.access_token_expiry);
        let access_token = sign_token(&claims, jwt_config)?;
        track_login(true);
        track_jwt_issued();
        info!(user_id = %found.user.id, role = %found.user.role, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_config.access_token_expiry,
            user: found.user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridgeschool_models::UserId;

    fn user(role: Role, branch_id: Option<BranchId>) -> User {
        User {
            id: UserId::new(),
            email: "ada@bridge.school".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Obi".to_string(),
            role,
            branch_id,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_claims_carry_identity() {
        let u = user(Role::Teacher, Some(BranchId(4)));
        let claims = claims_for(&u, 1800);

        assert_eq!(claims.id, u.id.to_string());
        assert_eq!(claims.role(), Some("teacher"));
        assert_eq!(claims.branch_id, Some(4));
        assert_eq!(claims.name.as_deref(), Some("Ada Obi"));
        assert_eq!(claims.exp.unwrap() - claims.iat.unwrap(), 1800);
    }

    #[test]
    fn test_unattached_super_admin_gets_default_branch() {
        let claims = claims_for(&user(Role::SuperAdmin, None), 60);
        assert_eq!(claims.branch_id, Some(1));
    }

    #[test]
    fn test_unattached_teacher_has_no_branch() {
        let claims = claims_for(&user(Role::Teacher, None), 60);
        assert!(claims.branch_id.is_none());
    }

    #[test]
    fn test_dummy_hash_is_valid_and_matches_nothing_submitted() {
        let hash = dummy_hash();
        assert!(hash.starts_with("$2"));
        assert!(!verify_password("password123", hash).unwrap());
        assert_eq!(dummy_hash(), hash);
    }
}
