use std::env;

use jsonwebtoken::Algorithm;

use crate::non_empty;

/// Token signing configuration.
///
/// `secret` stays optional here: a missing secret is reported when a token
/// is verified, as a server misconfiguration rather than a client error.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Option<String>,
    pub algorithm: Algorithm,
    /// Lifetime of tokens issued by the login endpoint, in seconds.
    pub access_token_expiry: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("algorithm", &self.algorithm)
            .field("access_token_expiry", &self.access_token_expiry)
            .finish()
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let algorithm = non_empty(&lookup, "JWT_ALGORITHM")
            .map(|name| parse_hmac_algorithm(&name))
            .unwrap_or(Algorithm::HS256);

        let expiry_minutes = non_empty(&lookup, "ACCESS_TOKEN_EXPIRE_MINUTES")
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|m| *m > 0)
            .unwrap_or(30);

        Self {
            secret: non_empty(&lookup, "NEXTAUTH_SECRET"),
            algorithm,
            access_token_expiry: expiry_minutes * 60,
        }
    }

    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            algorithm: Algorithm::HS256,
            access_token_expiry: 30 * 60,
        }
    }
}

/// Only shared-secret algorithms make sense with a single signing secret.
fn parse_hmac_algorithm(name: &str) -> Algorithm {
    match name.to_ascii_uppercase().as_str() {
        "HS256" => Algorithm::HS256,
        "HS384" => Algorithm::HS384,
        "HS512" => Algorithm::HS512,
        other => {
            tracing::warn!(algorithm = other, "Unsupported JWT_ALGORITHM, using HS256");
            Algorithm::HS256
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults_without_secret() {
        let config = JwtConfig::from_lookup(|_| None);
        assert!(config.secret.is_none());
        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.access_token_expiry, 1800);
    }

    #[test]
    fn test_blank_secret_counts_as_missing() {
        let config = JwtConfig::from_lookup(lookup_from(&[("NEXTAUTH_SECRET", "   ")]));
        assert!(config.secret.is_none());
    }

    #[test]
    fn test_reads_secret_algorithm_and_expiry() {
        let config = JwtConfig::from_lookup(lookup_from(&[
            ("NEXTAUTH_SECRET", "s3cret"),
            ("JWT_ALGORITHM", "hs512"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "5"),
        ]));
        assert_eq!(config.secret.as_deref(), Some("s3cret"));
        assert_eq!(config.algorithm, Algorithm::HS512);
        assert_eq!(config.access_token_expiry, 300);
    }

    #[test]
    fn test_asymmetric_algorithm_falls_back() {
        let config = JwtConfig::from_lookup(lookup_from(&[("JWT_ALGORITHM", "RS256")]));
        assert_eq!(config.algorithm, Algorithm::HS256);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::with_secret("top-secret");
        assert!(!format!("{:?}", config).contains("top-secret"));
    }
}
