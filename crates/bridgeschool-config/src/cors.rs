use std::env;

use crate::non_empty;

const DEFAULT_ORIGINS: &str = "https://localhost:3000,http://localhost:3001";

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins = non_empty(&lookup, "CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_origins() {
        let config = CorsConfig::from_lookup(|_| None);
        assert_eq!(
            config.allowed_origins,
            vec!["https://localhost:3000", "http://localhost:3001"]
        );
    }

    #[test]
    fn test_origins_are_trimmed_and_filtered() {
        let config = CorsConfig::from_lookup(|key| {
            (key == "CORS_ORIGINS").then(|| " https://a.school , ,https://b.school".to_string())
        });
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.school", "https://b.school"]
        );
    }
}
