//! Configuration module for the careers backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to sign session tokens. Generated per process when unset.
    pub auth_secret: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Mark the session cookie as `Secure`
    pub secure_cookies: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AddrParseError> {
        dotenvy::dotenv().ok();

        let auth_secret = env::var("CAREERS_AUTH_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        let db_path = env::var("CAREERS_DB_PATH")
            .unwrap_or_else(|_| "./data/careers.sqlite".to_string())
            .into();

        let bind_addr = env::var("CAREERS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()?;

        let log_level = env::var("CAREERS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let secure_cookies = env::var("CAREERS_SECURE_COOKIES")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            auth_secret,
            db_path,
            bind_addr,
            log_level,
            secure_cookies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("CAREERS_AUTH_SECRET");
        env::remove_var("CAREERS_DB_PATH");
        env::remove_var("CAREERS_BIND_ADDR");
        env::remove_var("CAREERS_LOG_LEVEL");
        env::remove_var("CAREERS_SECURE_COOKIES");

        let config = Config::from_env().unwrap();

        assert!(config.auth_secret.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/careers.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert!(!config.secure_cookies);
    }
}
