//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from `.env` and the process environment.
//! It provides thread-safe access and mutation for testing or overrides.

use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock, RwLockReadGuard};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    /// Origin embedded in every check-in URL, e.g. `https://hmpti.example.org`.
    pub public_origin: String,
    /// Brand mark composited into QR codes. Empty disables the logo.
    pub qr_logo_url: String,
    pub qr_size: u32,
    pub sheets_timeout_secs: u64,
    /// `any-failure` or `transport-only`.
    pub sheets_fallback: String,
}

/// The logging subset of the configuration.
///
/// Readable before [`AppConfig`] so the subscriber is installed first and
/// the fallback warnings of [`AppConfig::from_env`] are recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub file: String,
    pub to_stdout: bool,
}

impl LogSettings {
    /// Loads `.env` and reads `LOG_LEVEL`, `LOG_FILE` and `LOG_TO_STDOUT`.
    /// Never panics: no required key is involved.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into()),
            file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
        }
    }
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Panics if `DATABASE_PATH` or `JWT_SECRET` is missing. Numeric values that
    /// fail to parse fall back to their defaults.
    pub fn from_env() -> Self {
        let log = LogSettings::from_env();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "hmpti-attendance".into()),
            log_level: log.level,
            log_file: log.file,
            log_to_stdout: log.to_stdout,
            database_path: env::var("DATABASE_PATH").expect("DATABASE_PATH is required"),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: parse_or("PORT", 3000),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET is required"),
            jwt_duration_minutes: parse_or("JWT_DURATION_MINUTES", 60),
            public_origin: env::var("PUBLIC_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
            qr_logo_url: env::var("QR_LOGO_URL").unwrap_or_default(),
            qr_size: parse_or("QR_SIZE", 600),
            sheets_timeout_secs: parse_or("SHEETS_TIMEOUT_SECS", 30),
            sheets_fallback: env::var("SHEETS_FALLBACK").unwrap_or_else(|_| "any-failure".into()),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock
                .write()
                .expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value.into());
    }

    pub fn set_public_origin(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.public_origin = value.into());
    }

    pub fn set_qr_logo_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.qr_logo_url = value.into());
    }

    pub fn set_qr_size(value: u32) {
        AppConfig::set_field(|cfg| cfg.qr_size = value);
    }

    pub fn set_sheets_timeout_secs(value: u64) {
        AppConfig::set_field(|cfg| cfg.sheets_timeout_secs = value);
    }

    pub fn set_sheets_fallback(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.sheets_fallback = value.into());
    }
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {key} value {raw:?}, using default {default}");
            default
        }),
        Err(_) => default,
    }
}
