//! Application configuration loaded from environment variables.
//!
//! Values are read once at startup; a `.env` file is honoured for local
//! development.

use crate::models::PreferredWeekdays;
use std::env;

/// Where plans and profiles are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Firestore,
    /// Process-local, lost on restart
    Memory,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Storage backend for plans and users
    pub storage: StorageBackend,
    /// Weekdays used when neither request nor profile specify any
    pub default_preferred_weekdays: PreferredWeekdays,
    /// Fixed seed for the workout shuffle (reproducible plans)
    pub plan_shuffle_seed: Option<u64>,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            storage: StorageBackend::Memory,
            default_preferred_weekdays: PreferredWeekdays::default(),
            plan_shuffle_seed: Some(42),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let storage = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "firestore".to_string())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "firestore" => StorageBackend::Firestore,
            "memory" => StorageBackend::Memory,
            _ => return Err(ConfigError::Invalid("STORAGE_BACKEND")),
        };

        let default_preferred_weekdays = match env::var("DEFAULT_PREFERRED_WEEKDAYS") {
            Ok(raw) => PreferredWeekdays::parse_list(&raw)
                .map_err(|_| ConfigError::Invalid("DEFAULT_PREFERRED_WEEKDAYS"))?,
            Err(_) => PreferredWeekdays::default(),
        };

        let plan_shuffle_seed = env::var("PLAN_SHUFFLE_SEED")
            .ok()
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::Invalid("PLAN_SHUFFLE_SEED"))
            })
            .transpose()?;

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            storage,
            default_preferred_weekdays,
            plan_shuffle_seed,
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    // All env mutations live in this one test.
    #[test]
    fn test_config_from_env() {
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::set_var("STORAGE_BACKEND", "memory");
        env::set_var("DEFAULT_PREFERRED_WEEKDAYS", "0,1,2,4,5,6");
        env::set_var("PLAN_SHUFFLE_SEED", "7");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.default_preferred_weekdays.days(), &[0, 1, 2, 4, 5, 6]);
        assert_eq!(config.plan_shuffle_seed, Some(7));
        assert_eq!(config.jwt_signing_key, b"test_jwt_key_32_bytes_minimum!!");

        env::set_var("DEFAULT_PREFERRED_WEEKDAYS", "");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("DEFAULT_PREFERRED_WEEKDAYS"))
        ));

        env::set_var("DEFAULT_PREFERRED_WEEKDAYS", "0,1");
        env::set_var("STORAGE_BACKEND", "postgres");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("STORAGE_BACKEND"))
        ));

        env::remove_var("STORAGE_BACKEND");
        env::remove_var("DEFAULT_PREFERRED_WEEKDAYS");
        env::remove_var("PLAN_SHUFFLE_SEED");
    }
}
