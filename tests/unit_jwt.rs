use bridgeschool_auth::{Claims, TokenVerifier, sign_token};
use bridgeschool_config::{Algorithm, JwtConfig};
use bridgeschool_core::ErrorKind;

fn config() -> JwtConfig {
    JwtConfig::with_secret("unit-test-secret")
}

fn full_claims() -> Claims {
    Claims {
        id: "0c6f9a5e-2b7d-4f3e-9d1a-5e8b7c6d4a21".to_string(),
        role: Some("admin".to_string()),
        first_name: Some("Ngozi".to_string()),
        last_name: Some("Eze".to_string()),
        branch_id: Some(2),
        email: Some("ngozi@bridge.school".to_string()),
        name: Some("Ngozi Eze".to_string()),
        ..Default::default()
    }
    .expires_in(600)
}

#[test]
fn test_every_identity_field_survives_verification() {
    let claims = full_claims();
    let token = sign_token(&claims, &config()).unwrap();
    let verified = TokenVerifier::new(&config()).verify(&token).unwrap();
    assert_eq!(verified, claims);
}

#[test]
fn test_configured_algorithm_is_used_for_both_sides() {
    let hs384 = JwtConfig {
        algorithm: Algorithm::HS384,
        ..config()
    };
    let token = sign_token(&full_claims(), &hs384).unwrap();

    let verifier = TokenVerifier::new(&hs384);
    assert_eq!(verifier.algorithm(), Algorithm::HS384);
    assert!(verifier.verify(&token).is_ok());
}

#[test]
fn test_env_lookup_reads_secret_and_expiry() {
    let config = JwtConfig::from_lookup(|key| match key {
        "NEXTAUTH_SECRET" => Some("from-env".to_string()),
        "ACCESS_TOKEN_EXPIRE_MINUTES" => Some("15".to_string()),
        _ => None,
    });
    assert_eq!(config.secret.as_deref(), Some("from-env"));
    assert_eq!(config.access_token_expiry, 15 * 60);
}

#[test]
fn test_tampered_payload_is_rejected() {
    let token = sign_token(&full_claims(), &config()).unwrap();
    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    parts[1] = parts[1].chars().rev().collect();
    let tampered = parts.join(".");

    let err = TokenVerifier::new(&config()).verify(&tampered).unwrap_err();
    assert!(err.is(ErrorKind::Unauthorized));
}

#[test]
fn test_debug_output_hides_secret() {
    let rendered = format!("{:?} {:?}", config(), TokenVerifier::new(&config()));
    assert!(!rendered.contains("unit-test-secret"));
}
