use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use chrono::Duration;

use crate::workflows::pipeline::GatewayMode;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let gateway_mode = match env::var("APP_GATEWAY_MODE") {
            Ok(raw) => parse_gateway_mode(&raw)?,
            Err(_) => GatewayMode::Legacy,
        };

        let notification_ttl_secs = env::var("APP_NOTIFICATION_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_NOTIFICATION_TTL_SECS.to_string())
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidNotificationTtl)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            dashboard: DashboardConfig {
                gateway_mode,
                notification_ttl_secs,
            },
        })
    }
}

pub const DEFAULT_NOTIFICATION_TTL_SECS: u32 = 5;

/// Parse a gateway mode name as accepted by `APP_GATEWAY_MODE` and the CLI.
pub fn parse_gateway_mode(raw: &str) -> Result<GatewayMode, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "legacy" | "mock" => Ok(GatewayMode::Legacy),
        "strict" => Ok(GatewayMode::Strict),
        _ => Err(ConfigError::InvalidGatewayMode {
            value: raw.to_string(),
        }),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Dashboard session defaults.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub gateway_mode: GatewayMode,
    pub notification_ttl_secs: u32,
}

impl DashboardConfig {
    pub fn notification_ttl(&self) -> Duration {
        Duration::seconds(i64::from(self.notification_ttl_secs))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidGatewayMode { value: String },
    InvalidNotificationTtl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidGatewayMode { value } => write!(
                f,
                "APP_GATEWAY_MODE must be 'legacy' or 'strict' (got '{value}')"
            ),
            ConfigError::InvalidNotificationTtl => {
                write!(f, "APP_NOTIFICATION_TTL_SECS must be a whole number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidGatewayMode { .. }
            | ConfigError::InvalidNotificationTtl => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_GATEWAY_MODE");
        env::remove_var("APP_NOTIFICATION_TTL_SECS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.dashboard.gateway_mode, GatewayMode::Legacy);
        assert_eq!(config.dashboard.notification_ttl(), Duration::seconds(5));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_dashboard_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_GATEWAY_MODE", "Strict");
        env::set_var("APP_NOTIFICATION_TTL_SECS", "12");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.dashboard.gateway_mode, GatewayMode::Strict);
        assert_eq!(config.dashboard.notification_ttl_secs, 12);
        reset_env();
    }

    #[test]
    fn rejects_unknown_gateway_mode() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_GATEWAY_MODE", "optimistic");
        let err = AppConfig::load().expect_err("unknown mode rejected");
        assert!(matches!(err, ConfigError::InvalidGatewayMode { .. }));
        reset_env();
    }
}
