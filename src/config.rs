use std::env;

use crate::auth::password::DEFAULT_ITERATIONS;
use crate::util::normalize_email;

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub admin_email: String,
    pub admin_password: String,
    /// Empty means any origin is accepted.
    pub allowed_origins: Vec<String>,
    pub password_hash_iterations: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://app.db?mode=rwc".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3002),
            admin_email: normalize_email(
                &env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@eventmate.local".to_string()),
            ),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "change-me".to_string()),
            allowed_origins: parse_origins(&env::var("CORS_ORIGIN").unwrap_or_default()),
            password_hash_iterations: env::var("PASSWORD_HASH_ITERATIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_ITERATIONS),
        }
    }

    /// Config for tests: in-memory database, fixed admin, cheap hashing.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            admin_email: "admin@example.com".to_string(),
            admin_password: "secret".to_string(),
            allowed_origins: Vec::new(),
            password_hash_iterations: 1_000,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .map(|o| o.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_filtered() {
        assert_eq!(
            parse_origins(" http://a.dk, ,http://b.dk "),
            vec!["http://a.dk".to_string(), "http://b.dk".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }
}
