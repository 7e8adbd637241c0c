use bridgeschool::middleware::auth::AuthUser;
use bridgeschool_auth::{Claims, Role, RoleSet, authorize};
use bridgeschool_core::ErrorKind;

fn claims(role: &str) -> Claims {
    Claims::new("00000000-0000-0000-0000-000000000007")
        .with_role(role)
        .expires_in(60)
}

#[test]
fn test_admin_set_accepts_both_admin_roles() {
    assert!(authorize(claims("admin"), &RoleSet::ADMINS).is_ok());
    assert!(authorize(claims("super_admin"), &RoleSet::ADMINS).is_ok());
    assert!(authorize(claims("teacher"), &RoleSet::ADMINS).is_err());
}

#[test]
fn test_super_admin_set_is_exclusive() {
    assert!(authorize(claims("super_admin"), &RoleSet::SUPER_ADMINS).is_ok());
    let err = authorize(claims("admin"), &RoleSet::SUPER_ADMINS).unwrap_err();
    assert!(err.is(ErrorKind::Forbidden));
    assert_eq!(err.to_string(), "Access denied. Required roles: [super_admin]");
}

#[test]
fn test_teacher_set_rejects_admins() {
    assert!(authorize(claims("teacher"), &RoleSet::TEACHERS).is_ok());
    assert!(authorize(claims("admin"), &RoleSet::TEACHERS).is_err());
}

#[test]
fn test_unknown_role_is_forbidden_everywhere() {
    for set in [RoleSet::ADMINS, RoleSet::SUPER_ADMINS, RoleSet::TEACHERS] {
        assert!(authorize(claims("student"), &set).is_err());
    }
}

#[test]
fn test_custom_role_set() {
    const STAFF: RoleSet = RoleSet::new(&[Role::Teacher, Role::Admin]);
    assert_eq!(STAFF.to_string(), "[teacher, admin]");
    assert!(authorize(claims("teacher"), &STAFF).is_ok());
    assert!(authorize(claims("super_admin"), &STAFF).is_err());
}

#[test]
fn test_auth_user_exposes_staff_id() {
    let user = AuthUser(claims("teacher"));
    assert_eq!(
        user.user_id().unwrap().to_string(),
        "00000000-0000-0000-0000-000000000007"
    );
    assert_eq!(user.role(), Some("teacher"));
}

#[test]
fn test_auth_user_with_non_uuid_id_is_unauthorized() {
    let user = AuthUser(Claims::new("42").with_role("teacher"));
    let err = user.user_id().unwrap_err();
    assert!(err.is(ErrorKind::Unauthorized));
}
