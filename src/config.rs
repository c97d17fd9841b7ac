use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    /// JSON price book resource; builtin book when absent.
    pub price_book_path: Option<String>,
    /// JSON package catalog resource; builtin catalog when absent.
    pub package_catalog_path: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let price_book_path = env_map
            .get("PRICE_BOOK_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let package_catalog_path = env_map
            .get("PACKAGE_CATALOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Config {
            port,
            database_path,
            price_book_path,
            package_catalog_path,
        })
    }
}
