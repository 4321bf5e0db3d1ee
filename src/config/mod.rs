//! Configuration module for the menu backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

pub const DEFAULT_ADMIN_USERNAME: &str = "matin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "1025";

/// Deployment environment; production hides internals and restricts CORS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// Admin username for Basic auth
    pub admin_username: String,
    /// Admin password for Basic auth
    pub admin_password: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Deployment environment
    pub environment: Environment,
    /// Origins allowed to call the API in production
    pub allowed_origins: Vec<String>,
    /// Load the starter menu into an empty store
    pub seed: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url = env::var("MENU_DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let admin_username = env::var("MENU_ADMIN_USERNAME")
            .unwrap_or_else(|_| DEFAULT_ADMIN_USERNAME.to_string());

        let admin_password = env::var("MENU_ADMIN_PASSWORD")
            .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string());

        let bind_addr = env::var("MENU_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .expect("Invalid MENU_BIND_ADDR format");

        let log_level = env::var("MENU_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let environment = Environment::parse(
            &env::var("MENU_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let allowed_origins = env::var("MENU_ALLOWED_ORIGINS")
            .map(|raw| parse_list(&raw))
            .unwrap_or_default();

        let seed = env::var("MENU_SEED")
            .map(|raw| !matches!(raw.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        Self {
            database_url,
            admin_username,
            admin_password,
            bind_addr,
            log_level,
            environment,
            allowed_origins,
            seed,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Whether the admin account still uses the built-in defaults.
    pub fn uses_default_credentials(&self) -> bool {
        self.admin_username == DEFAULT_ADMIN_USERNAME && self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}

fn parse_list(raw: &str) -> Vec<String> {
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
        env::remove_var("MENU_DATABASE_URL");
        env::remove_var("MENU_ADMIN_USERNAME");
        env::remove_var("MENU_ADMIN_PASSWORD");
        env::remove_var("MENU_BIND_ADDR");
        env::remove_var("MENU_LOG_LEVEL");
        env::remove_var("MENU_ENV");
        env::remove_var("MENU_ALLOWED_ORIGINS");
        env::remove_var("MENU_SEED");

        let config = Config::from_env();

        assert!(config.database_url.is_none());
        assert_eq!(config.admin_username, "matin");
        assert_eq!(config.admin_password, "1025");
        assert!(config.uses_default_credentials());
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.environment, Environment::Development);
        assert!(config.allowed_origins.is_empty());
        assert!(config.seed);
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list(" https://a.example , ,https://b.example"),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("PRODUCTION"), Environment::Production);
        assert_eq!(Environment::parse("staging"), Environment::Development);
    }
}
