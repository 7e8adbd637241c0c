use bridgeschool_config::JwtConfig;
use bridgeschool_core::AppError;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use tracing::{debug, instrument};

use crate::claims::Claims;

const MISSING_SECRET: &str = "NEXTAUTH_SECRET not configured";

/// Verifies bearer tokens against the configured shared secret.
///
/// Built once at startup from [`JwtConfig`] and shared through application
/// state, so no request reads configuration from the environment.
#[derive(Clone)]
pub struct TokenVerifier {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("configured", &self.key.is_some())
            .field("algorithms", &self.validation.algorithms)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(config.algorithm);
        // `exp` is optional in our tokens but enforced whenever present.
        validation.set_required_spec_claims(&[] as &[&str]);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            key: config
                .secret
                .as_ref()
                .map(|secret| DecodingKey::from_secret(secret.as_bytes())),
            validation,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.validation
            .algorithms
            .first()
            .copied()
            .unwrap_or(Algorithm::HS256)
    }

    /// Decodes and validates `token`.
    ///
    /// Checks run in a fixed order: secret configured, signature, expiry,
    /// subject id present.
    #[instrument(skip_all)]
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| AppError::misconfigured(MISSING_SECRET))?;

        let claims = decode::<Claims>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Invalid token: token has expired")
                    }
                    ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token: signature verification failed")
                    }
                    _ => AppError::unauthorized("Invalid token: malformed token"),
                }
            })?;

        // The decoder tolerates `exp == now`; the token must still be live.
        if let Some(exp) = claims.exp
            && exp <= chrono::Utc::now().timestamp()
        {
            return Err(AppError::unauthorized("Invalid token: token has expired"));
        }

        if claims.id.trim().is_empty() {
            return Err(AppError::unauthorized("Invalid token: missing user id"));
        }

        Ok(claims)
    }
}

/// Signs `claims` with the configured secret and algorithm.
pub fn sign_token(claims: &Claims, config: &JwtConfig) -> Result<String, AppError> {
    let secret = config
        .secret
        .as_ref()
        .ok_or_else(|| AppError::misconfigured(MISSING_SECRET))?;

    encode(
        &Header::new(config.algorithm),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to sign token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridgeschool_core::ErrorKind as AppErrorKind;

    fn config() -> JwtConfig {
        JwtConfig::with_secret("test-secret-key-for-testing")
    }

    #[test]
    fn test_verify_valid_token() {
        let config = config();
        let claims = Claims::new("u1").with_role("teacher").expires_in(3600);
        let token = sign_token(&claims, &config).unwrap();

        let verified = TokenVerifier::new(&config).verify(&token).unwrap();
        assert_eq!(verified, claims);
    }

    #[test]
    fn test_token_without_exp_is_accepted() {
        let config = config();
        let token = sign_token(&Claims::new("u1"), &config).unwrap();
        let verified = TokenVerifier::new(&config).verify(&token).unwrap();
        assert_eq!(verified.id, "u1");
        assert!(verified.exp.is_none());
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let config = config();
        let token = sign_token(&Claims::new("u1").expires_in(-10), &config).unwrap();
        let err = TokenVerifier::new(&config).verify(&token).unwrap_err();
        assert!(err.is(AppErrorKind::Unauthorized));
        assert!(err.to_string().contains("expired"));
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let token = sign_token(&Claims::new("u1").expires_in(3600), &config()).unwrap();
        let other = JwtConfig::with_secret("some-other-secret");
        let err = TokenVerifier::new(&other).verify(&token).unwrap_err();
        assert!(err.is(AppErrorKind::Unauthorized));
    }

    #[test]
    fn test_malformed_token_is_unauthorized() {
        let err = TokenVerifier::new(&config())
            .verify("not.a.token")
            .unwrap_err();
        assert!(err.is(AppErrorKind::Unauthorized));
    }

    #[test]
    fn test_missing_id_is_unauthorized() {
        let config = config();
        let token = sign_token(&Claims::new("").with_role("admin"), &config).unwrap();
        let err = TokenVerifier::new(&config).verify(&token).unwrap_err();
        assert!(err.is(AppErrorKind::Unauthorized));
        assert_eq!(err.to_string(), "Invalid token: missing user id");
    }

    #[test]
    fn test_missing_secret_is_misconfiguration() {
        let signed = sign_token(&Claims::new("u1"), &config()).unwrap();
        let unconfigured = JwtConfig {
            secret: None,
            ..config()
        };
        let verifier = TokenVerifier::new(&unconfigured);
        assert!(!verifier.is_configured());

        let err = verifier.verify(&signed).unwrap_err();
        assert!(err.is(AppErrorKind::ServerMisconfigured));
    }

    #[test]
    fn test_algorithm_mismatch_is_unauthorized() {
        let hs512 = JwtConfig {
            algorithm: Algorithm::HS512,
            ..config()
        };
        let token = sign_token(&Claims::new("u1"), &hs512).unwrap();
        let err = TokenVerifier::new(&config()).verify(&token).unwrap_err();
        assert!(err.is(AppErrorKind::Unauthorized));
    }
}
