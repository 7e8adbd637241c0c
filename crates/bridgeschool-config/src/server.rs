use std::env;

use crate::non_empty;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub metrics_bind_address: String,
    pub api_prefix: String,
    pub project_name: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut api_prefix =
            non_empty(&lookup, "API_V1_PREFIX").unwrap_or_else(|| "/api/v1".to_string());
        if !api_prefix.starts_with('/') {
            api_prefix.insert(0, '/');
        }
        while api_prefix.len() > 1 && api_prefix.ends_with('/') {
            api_prefix.pop();
        }

        Self {
            bind_address: non_empty(&lookup, "BIND_ADDRESS")
                .unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            metrics_bind_address: non_empty(&lookup, "METRICS_BIND_ADDRESS")
                .unwrap_or_else(|| "0.0.0.0:9100".to_string()),
            api_prefix,
            project_name: non_empty(&lookup, "PROJECT_NAME")
                .unwrap_or_else(|| "The Bridge School API".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.api_prefix, "/api/v1");
        assert_eq!(config.project_name, "The Bridge School API");
        assert_eq!(config.bind_address, "0.0.0.0:8000");
    }

    #[test]
    fn test_api_prefix_is_normalized() {
        let config = ServerConfig::from_lookup(|key| {
            (key == "API_V1_PREFIX").then(|| "api/v2/".to_string())
        });
        assert_eq!(config.api_prefix, "/api/v2");
    }
}
