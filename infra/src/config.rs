//! Configuration management for infrastructure services.
//!
//! Settings load from the environment with an `OTP` prefix and `__` as the
//! section separator, e.g. `OTP__DATABASE__URL` or `OTP__CACHE__URL`. A
//! `.env` file is honoured when present.

use config::{Config, Environment};
use serde::{Deserialize, Serialize};

use crate::InfrastructureError;

/// Infrastructure configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfrastructureConfig {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Redis cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Outbound mail configuration
    #[serde(default)]
    pub email: EmailConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Redis cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,
    /// Default TTL for cache entries in seconds
    #[serde(default = "default_ttl_seconds")]
    pub default_ttl_seconds: u64,
}

/// Outbound mail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Mail provider API endpoint
    pub api_url: String,
    /// Mail provider API key
    pub api_key: String,
    /// Sender address for OTP mail
    pub from_address: String,
}

fn default_max_connections() -> u32 {
    10
}

fn default_ttl_seconds() -> u64 {
    300
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mysql://localhost:3306/bankingportal".to_string(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            default_ttl_seconds: default_ttl_seconds(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.mail.example/v1/send".to_string(),
            api_key: String::new(),
            from_address: "noreply@bankingportal.example".to_string(),
        }
    }
}

impl Default for InfrastructureConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            email: EmailConfig::default(),
        }
    }
}

impl InfrastructureConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, InfrastructureError> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(Environment::with_prefix("OTP").separator("__"))
            .build()
            .map_err(|e| InfrastructureError::Config(e.to_string()))?;

        // Missing sections are filled in from defaults rather than erroring.
        match config.try_deserialize::<InfrastructureConfig>() {
            Ok(loaded) => Ok(loaded),
            Err(config::ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(InfrastructureError::Config(e.to_string())),
        }
    }
}
