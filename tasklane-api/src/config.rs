/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct. A `.env` file is honored in
/// development.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string
///   (default: `postgresql://localhost:5432/tasklane`)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `API_HOST`: host to bind to (default: 0.0.0.0)
/// - `API_PORT`: port to bind to (default: 8080)
/// - `JWT_SECRET`: secret key for token signing (defaults to a development
///   placeholder; a warning is logged when the default is in use)
/// - `JWT_ALGORITHM`: HS256, HS384, or HS512 (default: HS256)
/// - `ACCESS_TOKEN_EXPIRE_MINUTES`: token lifetime (default: 30)
/// - `CORS_ORIGINS`: comma-separated allowed origins (default: `*`)
/// - `RUST_LOG`: log filter (default: info-level for this crate)
///
/// # Example
///
/// ```no_run
/// use tasklane_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use chrono::Duration;
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Development-only fallback signing secret.
const DEV_JWT_SECRET: &str = "tasklane-dev-secret-change-me-in-production";

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Token signing configuration
    pub auth: AuthConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` means permissive
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

/// Token signing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing. Should be at least 32 bytes;
    /// generate with `openssl rand -hex 32`.
    pub secret: String,

    /// HMAC signing algorithm (HS256, HS384, or HS512)
    pub algorithm: Algorithm,

    /// Access-token lifetime in minutes
    pub token_ttl_minutes: i64,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed, or
    /// if `JWT_ALGORITHM` names a non-HMAC algorithm.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgresql://localhost:5432/tasklane".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                tracing::warn!(
                    "JWT_SECRET is not set; using the development placeholder. \
                     Set JWT_SECRET before deploying."
                );
                DEV_JWT_SECRET.to_string()
            }
        };

        let algorithm_name = env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string());
        let algorithm = Algorithm::from_str(&algorithm_name)
            .map_err(|_| anyhow::anyhow!("Unknown JWT_ALGORITHM: {}", algorithm_name))?;

        // The token format is fixed to a shared-secret symmetric scheme.
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            anyhow::bail!("JWT_ALGORITHM must be one of HS256, HS384, HS512");
        }

        let token_ttl_minutes = env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .unwrap_or_else(|_| {
                tasklane_shared::auth::jwt::DEFAULT_TOKEN_TTL_MINUTES.to_string()
            })
            .parse::<i64>()?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            auth: AuthConfig {
                secret: jwt_secret,
                algorithm,
                token_ttl_minutes,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Returns the configured token lifetime
    pub fn token_ttl(&self) -> Duration {
        Duration::minutes(self.auth.token_ttl_minutes)
    }
}
