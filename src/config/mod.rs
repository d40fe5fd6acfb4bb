//! Configuration module for the quiz backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key expected from the fronting gateway (dev mode when unset)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
    /// Principal ids holding the administrative claim
    pub admin_ids: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AddrParseError> {
        dotenvy::dotenv().ok();

        let api_psk = env::var("QUIZ_API_PSK").ok().filter(|s| !s.is_empty());

        let db_path = env::var("QUIZ_DB_PATH")
            .unwrap_or_else(|_| "./data/quiz.sqlite".to_string())
            .into();

        let bind_addr = env::var("QUIZ_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()?;

        let log_level = env::var("QUIZ_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("QUIZ_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let admin_ids = env::var("QUIZ_ADMIN_IDS")
            .map(|raw| parse_id_list(&raw))
            .unwrap_or_default();

        Ok(Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
            log_format,
            admin_ids,
        })
    }

    /// Whether the given principal id carries the administrative claim.
    pub fn is_admin(&self, principal_id: &str) -> bool {
        self.admin_ids.iter().any(|id| id == principal_id)
    }
}

fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("QUIZ_API_PSK");
        env::remove_var("QUIZ_DB_PATH");
        env::remove_var("QUIZ_BIND_ADDR");
        env::remove_var("QUIZ_LOG_LEVEL");
        env::remove_var("QUIZ_LOG_FORMAT");
        env::remove_var("QUIZ_ADMIN_IDS");

        let config = Config::from_env().unwrap();

        assert!(config.api_psk.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/quiz.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.admin_ids.is_empty());
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("admin, ops ,,"), vec!["admin", "ops"]);
        assert!(parse_id_list("").is_empty());
    }
}
