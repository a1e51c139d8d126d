//! Application configuration loaded from environment variables.

use std::env;

use quill_core::OwnershipPolicy;
use quill_infra::DatabaseConfig;
use quill_infra::JwtConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub ownership_policy: OwnershipPolicy,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut config = DatabaseConfig::new(url);
            if let Some(max) = env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
            {
                config.max_connections = max;
            }
            if let Some(min) = env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
            {
                config.min_connections = min;
            }
            config
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            ownership_policy: Self::parse_ownership_policy(env::var("OWNERSHIP_POLICY").ok()),
            jwt: JwtConfig::from_env(),
        }
    }

    /// Unknown values fall back to the enforced policy.
    fn parse_ownership_policy(raw: Option<String>) -> OwnershipPolicy {
        match raw {
            None => OwnershipPolicy::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{e}; falling back to '{}'", OwnershipPolicy::default());
                OwnershipPolicy::default()
            }),
        }
    }
}
