/// Configuration management for Linkup Service
///
/// Loads configuration from environment variables with development defaults.
/// Misconfiguration that would be dangerous in production (missing token
/// secret, wildcard CORS) is rejected at startup instead of at request time.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Session token configuration
    pub auth: AuthConfig,
    /// Media storage (S3) configuration
    pub media: MediaConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Session token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify session tokens
    pub jwt_secret: String,
}

/// Media storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Custom S3-compatible endpoint (MinIO, localstack)
    pub endpoint: Option<String>,
    /// Public base URL (CDN) for uploaded objects; falls back to the
    /// bucket's virtual-hosted endpoint when unset
    pub public_base_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let is_production = app_env.eq_ignore_ascii_case("production");

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("LINKUP_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("LINKUP_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if is_production => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if is_production && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/linkup".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            auth: {
                let jwt_secret = match std::env::var("JWT_SECRET") {
                    Ok(value) if !value.trim().is_empty() => value,
                    Ok(_) | Err(_) if is_production => {
                        return Err("JWT_SECRET must be set in production".to_string())
                    }
                    _ => "dev-only-insecure-secret".to_string(),
                };

                AuthConfig { jwt_secret }
            },
            media: {
                let access_key_id = std::env::var("AWS_ACCESS_KEY_ID").unwrap_or_default();
                let secret_access_key =
                    std::env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default();

                if is_production && (access_key_id.is_empty() || secret_access_key.is_empty()) {
                    return Err(
                        "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set in production"
                            .to_string(),
                    );
                }

                MediaConfig {
                    bucket: std::env::var("S3_BUCKET_NAME")
                        .unwrap_or_else(|_| "linkup-media-dev".to_string()),
                    region: std::env::var("S3_REGION")
                        .unwrap_or_else(|_| "us-east-1".to_string()),
                    access_key_id,
                    secret_access_key,
                    endpoint: std::env::var("S3_ENDPOINT").ok().filter(|e| !e.is_empty()),
                    public_base_url: std::env::var("MEDIA_PUBLIC_BASE_URL")
                        .ok()
                        .filter(|e| !e.is_empty()),
                }
            },
        })
    }
}
