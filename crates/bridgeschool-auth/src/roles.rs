use std::fmt;
use std::str::FromStr;

use bridgeschool_core::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::claims::Claims;

/// Staff roles. Stored in the `user_role` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum Role {
    Teacher,
    Admin,
    SuperAdmin,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(Role::Teacher),
            "admin" => Ok(Role::Admin),
            "super_admin" => Ok(Role::SuperAdmin),
            other => Err(AppError::bad_request(anyhow::anyhow!(
                "Unknown role: {}",
                other
            ))),
        }
    }
}

/// The roles allowed through one guarded route group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet(&'static [Role]);

impl RoleSet {
    pub const ADMINS: RoleSet = RoleSet(&[Role::Admin, Role::SuperAdmin]);
    pub const SUPER_ADMINS: RoleSet = RoleSet(&[Role::SuperAdmin]);
    pub const TEACHERS: RoleSet = RoleSet(&[Role::Teacher]);

    pub const fn new(roles: &'static [Role]) -> Self {
        Self(roles)
    }

    pub fn roles(&self) -> &'static [Role] {
        self.0
    }

    pub fn allows(&self, role: &str) -> bool {
        self.0.iter().any(|r| r.as_str() == role)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|r| r.as_str()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// Passes `claims` through unchanged when their role belongs to `allowed`.
pub fn authorize(claims: Claims, allowed: &RoleSet) -> Result<Claims, AppError> {
    match claims.role() {
        Some(role) if allowed.allows(role) => Ok(claims),
        _ => Err(AppError::forbidden(format!(
            "Access denied. Required roles: {}",
            allowed
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridgeschool_core::ErrorKind;

    #[test]
    fn test_role_string_round_trip() {
        for role in [Role::Teacher, Role::Admin, Role::SuperAdmin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("student".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_names() {
        assert_eq!(
            serde_json::to_string(&Role::SuperAdmin).unwrap(),
            "\"super_admin\""
        );
    }

    #[test]
    fn test_authorize_member_returns_claims_unchanged() {
        let claims = Claims::new("u1").with_role("super_admin").expires_in(60);
        let out = authorize(claims.clone(), &RoleSet::ADMINS).unwrap();
        assert_eq!(out, claims);
    }

    #[test]
    fn test_authorize_rejects_non_member() {
        let claims = Claims::new("u1").with_role("teacher");
        let err = authorize(claims, &RoleSet::ADMINS).unwrap_err();
        assert!(err.is(ErrorKind::Forbidden));
        assert_eq!(
            err.to_string(),
            "Access denied. Required roles: [admin, super_admin]"
        );
    }

    #[test]
    fn test_authorize_rejects_missing_role() {
        let err = authorize(Claims::new("u1"), &RoleSet::TEACHERS).unwrap_err();
        assert!(err.is(ErrorKind::Forbidden));
    }

    #[test]
    fn test_role_match_is_exact() {
        let claims = Claims::new("u1").with_role("Admin");
        assert!(authorize(claims, &RoleSet::ADMINS).is_err());
    }

    #[test]
    fn test_empty_set_denies_everyone() {
        const NOBODY: RoleSet = RoleSet::new(&[]);
        let claims = Claims::new("u1").with_role("super_admin");
        assert!(authorize(claims, &NOBODY).is_err());
    }
}
