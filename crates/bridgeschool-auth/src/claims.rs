use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity attributes carried by a verified token.
///
/// Only `id` is mandatory. It defaults to empty on decode so that a token
/// without it is reported as a missing subject rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Stamps `iat` with the current time and `exp` with `iat + seconds`.
    pub fn expires_in(mut self, seconds: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        self.iat = Some(now);
        self.exp = Some(now + seconds);
        self
    }

    /// Role string with surrounding whitespace removed, if non-empty.
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref().map(str::trim).filter(|r| !r.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_decode_as_none() {
        let claims: Claims = serde_json::from_str(r#"{"id":"u1"}"#).unwrap();
        assert_eq!(claims.id, "u1");
        assert!(claims.role.is_none());
        assert!(claims.branch_id.is_none());
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_missing_id_decodes_as_empty() {
        let claims: Claims = serde_json::from_str(r#"{"role":"admin"}"#).unwrap();
        assert!(claims.id.is_empty());
    }

    #[test]
    fn test_full_claims_round_trip_fields() {
        let claims: Claims = serde_json::from_str(
            r#"{"id":"42","role":"teacher","first_name":"Ada","last_name":"Obi",
                "branch_id":3,"email":"ada@bridge.school","name":"Ada Obi",
                "iat":1700000000,"exp":1700003600}"#,
        )
        .unwrap();
        assert_eq!(claims.role(), Some("teacher"));
        assert_eq!(claims.branch_id, Some(3));
        assert_eq!(claims.exp, Some(1_700_003_600));
    }

    #[test]
    fn test_none_fields_are_not_serialized() {
        let json = serde_json::to_value(Claims::new("u1")).unwrap();
        assert_eq!(json, serde_json::json!({"id": "u1"}));
    }

    #[test]
    fn test_blank_role_is_treated_as_absent() {
        assert_eq!(Claims::new("u1").with_role("  ").role(), None);
    }
}
