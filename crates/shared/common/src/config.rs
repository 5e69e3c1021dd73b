//! Shared configuration structures.

use std::env;

use domain::{
    UserRole, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, DEFAULT_JWT_EXPIRATION_HOURS,
    DEFAULT_USER_PASSWORD, DEFAULT_USER_USERNAME, MAX_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default SQLite database file, created on first connect.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://inventory.db?mode=rwc";

/// Secret used by debug builds when `JWT_SECRET` is unset.
const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Configuration loading errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Read an environment variable, falling back through the given names in order.
pub fn env_any(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| env::var(name).ok())
}

/// Parse an optional environment variable, using `default` when it is unset.
pub fn env_parse<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            min_connections: 1,
        }
    }
}

impl DatabaseConfig {
    /// Database configuration for the given URL with default pool sizes.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Load from `INVENTORY_DATABASE_URL` / `DATABASE_URL` and pool size variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            url: env_any(&["INVENTORY_DATABASE_URL", "DATABASE_URL"]).unwrap_or(defaults.url),
            max_connections: env_parse("DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: env_parse("DATABASE_MIN_CONNECTIONS", defaults.min_connections)?,
        })
    }
}

/// JWT configuration for session tokens.
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    #[serde(skip_serializing)]
    pub secret: String,
    pub expiration_hours: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
        }
    }
}

impl JwtConfig {
    /// Build a config from an explicit secret, checking its length.
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::Invalid {
                name: "JWT_SECRET",
                reason: format!("must be at least {} characters long", MIN_JWT_SECRET_LENGTH),
            });
        }
        if !(1..=MAX_JWT_EXPIRATION_HOURS).contains(&expiration_hours) {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRATION_HOURS",
                reason: format!("must be between 1 and {}", MAX_JWT_EXPIRATION_HOURS),
            });
        }
        Ok(Self {
            secret,
            expiration_hours,
        })
    }

    /// Load from `JWT_SECRET` and `JWT_EXPIRATION_HOURS`.
    ///
    /// Debug builds fall back to a development secret with a warning;
    /// release builds require the secret to be set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => return Err(ConfigError::Missing("JWT_SECRET")),
        };
        let expiration_hours = env_parse("JWT_EXPIRATION_HOURS", DEFAULT_JWT_EXPIRATION_HOURS)?;
        Self::new(secret, expiration_hours)
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

/// An account created when the user table is first initialized.
#[derive(Clone, Deserialize, Serialize)]
pub struct SeedAccount {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: UserRole,
}

impl std::fmt::Debug for SeedAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedAccount")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

impl SeedAccount {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: UserRole) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }
}

/// The administrator and standard accounts seeded into an empty user table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedAccounts {
    pub admin: SeedAccount,
    pub user: SeedAccount,
}

impl Default for SeedAccounts {
    fn default() -> Self {
        Self {
            admin: SeedAccount::new(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD, UserRole::Admin),
            user: SeedAccount::new(DEFAULT_USER_USERNAME, DEFAULT_USER_PASSWORD, UserRole::Standard),
        }
    }
}

impl SeedAccounts {
    /// Load from `SEED_ADMIN_*` / `SEED_USER_*`, defaulting each field.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            admin: SeedAccount::new(
                env::var("SEED_ADMIN_USERNAME").unwrap_or(defaults.admin.username),
                env::var("SEED_ADMIN_PASSWORD").unwrap_or(defaults.admin.password),
                UserRole::Admin,
            ),
            user: SeedAccount::new(
                env::var("SEED_USER_USERNAME").unwrap_or(defaults.user.username),
                env::var("SEED_USER_PASSWORD").unwrap_or(defaults.user.password),
                UserRole::Standard,
            ),
        }
    }

    /// Both accounts, administrator first
    pub fn accounts(&self) -> [&SeedAccount; 2] {
        [&self.admin, &self.user]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_jwt_secret_rejected() {
        assert!(matches!(
            JwtConfig::new("short", 24),
            Err(ConfigError::Invalid { name: "JWT_SECRET", .. })
        ));
    }

    #[test]
    fn test_expiration_must_be_in_range() {
        assert!(JwtConfig::new(DEV_JWT_SECRET, 0).is_err());
        assert!(JwtConfig::new(DEV_JWT_SECRET, 1).is_ok());
        assert!(JwtConfig::new(DEV_JWT_SECRET, MAX_JWT_EXPIRATION_HOURS).is_ok());
        assert!(matches!(
            JwtConfig::new(DEV_JWT_SECRET, MAX_JWT_EXPIRATION_HOURS + 1),
            Err(ConfigError::Invalid { name: "JWT_EXPIRATION_HOURS", .. })
        ));
        assert!(JwtConfig::new(DEV_JWT_SECRET, i64::MAX).is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let jwt = JwtConfig::new(DEV_JWT_SECRET, 24).unwrap();
        assert!(!format!("{:?}", jwt).contains(DEV_JWT_SECRET));

        let seeds = SeedAccounts::default();
        assert!(!format!("{:?}", seeds).contains("admin123"));
    }

    #[test]
    fn test_default_seed_accounts() {
        let seeds = SeedAccounts::default();
        assert_eq!(seeds.admin.username, "admin");
        assert_eq!(seeds.admin.role, UserRole::Admin);
        assert_eq!(seeds.user.username, "user");
        assert_eq!(seeds.user.role, UserRole::Standard);
    }

    #[test]
    fn test_database_config_with_url() {
        let config = DatabaseConfig::with_url("sqlite::memory:");
        assert_eq!(config.url, "sqlite::memory:");
        assert_eq!(config.max_connections, DatabaseConfig::default().max_connections);
    }
}
