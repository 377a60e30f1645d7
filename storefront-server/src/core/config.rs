//! Server configuration
//!
//! All settings come from environment variables with sensible defaults.
//!
//! | Env var | Default | Meaning |
//! |---------|---------|---------|
//! | HTTP_PORT | 5000 | HTTP API port |
//! | DATA_DIR | ./data | Database and log files |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | FRONTEND_URL | (permissive CORS) | Allowed CORS origin |
//! | JWT_SECRET / JWT_ISSUER / JWT_AUDIENCE | — | Credential verification |
//! | MERCHANT_UPI_VPA | storefront@upi | UPI payee address |
//! | MERCHANT_UPI_NAME | Storefront | UPI payee display name |

use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Fixed merchant identity used to build UPI deep links
#[derive(Debug, Clone)]
pub struct MerchantConfig {
    pub upi_vpa: String,
    pub upi_name: String,
}

impl MerchantConfig {
    fn from_env() -> Self {
        Self {
            upi_vpa: std::env::var("MERCHANT_UPI_VPA")
                .unwrap_or_else(|_| "storefront@upi".into()),
            upi_name: std::env::var("MERCHANT_UPI_NAME").unwrap_or_else(|_| "Storefront".into()),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Data directory (database, logs)
    pub data_dir: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Allowed CORS origin for the storefront frontend
    pub frontend_url: Option<String>,
    /// JWT verification config
    pub jwt: JwtConfig,
    /// UPI merchant identity
    pub merchant: MerchantConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            frontend_url: std::env::var("FRONTEND_URL").ok(),
            jwt: JwtConfig::default(),
            merchant: MerchantConfig::from_env(),
        }
    }

    /// Override data dir and port (test scenarios)
    pub fn with_overrides(data_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.data_dir = data_dir.into();
        config.http_port = http_port;
        config
    }

    /// Database path inside the data directory
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("storefront.db")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
