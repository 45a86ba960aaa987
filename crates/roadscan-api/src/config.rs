use std::env;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("ROADSCAN_API_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(4000);

        let cors_origin = env::var("ROADSCAN_CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        Self { port, cors_origin }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_env();
        assert_eq!(config.port, 4000);
        assert_eq!(config.cors_origin, "http://localhost:5173");
    }
}
