use std::env;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Aggregated runtime settings, sourced from the process environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Reads `.env` (when present) and the `APP_*` variables, falling back
    /// to development defaults for anything unset.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: AppEnvironment::parse(&var_or("APP_ENV", "development")),
            server: ServerConfig::from_env()?,
            telemetry: TelemetryConfig::from_env(),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let host = var_or("APP_HOST", "127.0.0.1");
        let raw_port = var_or("APP_PORT", "3000");
        let port = raw_port
            .parse::<u16>()
            .map_err(|_| ConfigError::BadPort { raw: raw_port })?;

        Ok(Self { host, port })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        // "localhost" is accepted as an alias for loopback.
        let ip: IpAddr = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host.parse().map_err(|source| ConfigError::BadHost {
                raw: self.host.clone(),
                source,
            })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl TelemetryConfig {
    fn from_env() -> Self {
        Self {
            log_level: var_or("APP_LOG_LEVEL", "info"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT '{raw}' is not a valid port number")]
    BadPort { raw: String },
    #[error("APP_HOST '{raw}' is neither an IP address nor 'localhost'")]
    BadHost {
        raw: String,
        #[source]
        source: std::net::AddrParseError,
    },
}
