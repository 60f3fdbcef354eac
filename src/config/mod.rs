use std::env;

/// Runtime configuration for the API
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Maximum upload size in bytes (default: 20 MB)
    pub max_file_size: usize,

    /// Directory where uploaded documents are stored
    pub upload_dir: String,

    /// JWT secret key (required in production)
    pub jwt_secret: String,

    /// Token lifetime in hours (default: 168 = 7 days)
    pub jwt_expiry_hours: i64,

    /// Allowed CORS origins (comma separated)
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_file_size: 20 * 1024 * 1024, // 20 MB
            upload_dir: "uploads".to_string(),
            jwt_secret: "secret".to_string(),
            jwt_expiry_hours: 168,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(), // Vite default
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_file_size),

            upload_dir: env::var("UPLOAD_DIR").unwrap_or(default.upload_dir),

            jwt_secret: env::var("JWT_SECRET").unwrap_or(default.jwt_secret),

            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.jwt_expiry_hours),

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(default.allowed_origins),
        }
    }

    /// Create config for development and tests (relaxed limits, fixed secret)
    pub fn development() -> Self {
        Self::default()
    }

    /// Create config for production (secret must be provided)
    pub fn production() -> Self {
        let mut config = Self::from_env();
        config.jwt_secret = env::var("JWT_SECRET").expect("CRITICAL: JWT_SECRET must be set");
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.max_file_size, 20 * 1024 * 1024);
        assert_eq!(config.upload_dir, "uploads");
        assert_eq!(config.jwt_expiry_hours, 168);
    }

    #[test]
    fn test_from_env_cors_fallback() {
        unsafe { env::remove_var("ALLOWED_ORIGINS") };
        let config = AppConfig::from_env();
        let default_config = AppConfig::default();
        assert_eq!(config.allowed_origins, default_config.allowed_origins);
        assert!(!config.allowed_origins.contains(&"*".to_string()));
    }
}
