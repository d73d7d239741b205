//! Configuration utilities

use digibank_business::{TransferPolicy, DEFAULT_HISTORY_LIMIT};
use digibank_persistence::PoolSettings;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_busy_timeout_secs: u64,
    pub allow_self_transfer: bool,
    pub dashboard_history_limit: u32,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "sqlite:digibank.db".to_string(),
            db_max_connections: 5,
            db_busy_timeout_secs: 5,
            allow_self_transfer: false,
            dashboard_history_limit: DEFAULT_HISTORY_LIMIT,
            log_level: "info".to_string(),
        }
    }
}

/// Đọc biến môi trường, fallback về default nếu thiếu hoặc parse lỗi
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load config từ environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_or("HOST", defaults.host),
            port: env_or("PORT", defaults.port),
            database_url: env_or("DATABASE_URL", defaults.database_url),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", defaults.db_max_connections),
            db_busy_timeout_secs: env_or("DB_BUSY_TIMEOUT_SECS", defaults.db_busy_timeout_secs),
            allow_self_transfer: env_or("ALLOW_SELF_TRANSFER", defaults.allow_self_transfer),
            dashboard_history_limit: env_or(
                "DASHBOARD_HISTORY_LIMIT",
                defaults.dashboard_history_limit,
            ),
            log_level: env_or("LOG_LEVEL", defaults.log_level),
        }
    }

    /// Lấy địa chỉ bind đầy đủ
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            busy_timeout: Duration::from_secs(self.db_busy_timeout_secs),
        }
    }

    pub fn transfer_policy(&self) -> TransferPolicy {
        TransferPolicy {
            allow_self_transfer: self.allow_self_transfer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8080);
        assert!(!config.allow_self_transfer);
        assert_eq!(config.dashboard_history_limit, 10);
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_pool_settings() {
        let config = AppConfig {
            db_max_connections: 2,
            db_busy_timeout_secs: 1,
            ..AppConfig::default()
        };
        let settings = config.pool_settings();
        assert_eq!(settings.max_connections, 2);
        assert_eq!(settings.busy_timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_env_or_falls_back_on_bad_value() {
        assert_eq!(env_or("DIGIBANK_TEST_UNSET_VAR", 42u16), 42);
    }
}
