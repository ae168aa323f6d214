//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TROLLEY_STORAGE_PATH` - File backing the local key-value store
//!   (default: `.trolley/local-storage.json`)
//! - `TROLLEY_STORAGE_KEY` - Key holding the serialized cart (default: `cart`)

use std::path::PathBuf;

use thiserror::Error;

use crate::store::DEFAULT_STORAGE_KEY;

/// Default location of the file-backed store.
pub const DEFAULT_STORAGE_PATH: &str = ".trolley/local-storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// File backing the local key-value store
    pub storage_path: PathBuf,
    /// Key holding the serialized cart
    pub storage_key: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unusable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_path = lookup("TROLLEY_STORAGE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);
        if storage_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "TROLLEY_STORAGE_PATH".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let storage_key =
            lookup("TROLLEY_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        if storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "TROLLEY_STORAGE_KEY".to_string(),
                "must not be blank".to_string(),
            ));
        }

        Ok(Self {
            storage_path,
            storage_key,
        })
    }
}
