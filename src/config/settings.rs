//! Process settings read from the environment.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    /// Local development (the default).
    Development,
    /// Automated tests and CI.
    Test,
    /// Live deployment.
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
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
    /// Deployment stage, from `APP_ENV`.
    pub environment: AppEnvironment,
    /// HTTP binding.
    pub server: ServerConfig,
    /// Log filtering.
    pub telemetry: TelemetryConfig,
    /// Pricing and distance sources.
    pub quoting: QuoteSettings,
}

impl AppConfig {
    /// Loads `.env` if present, then reads settings from the environment.
    pub fn load() -> EngineResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`, which returns a variable's value.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment =
            AppEnvironment::parse(&lookup("APP_ENV").unwrap_or_else(|| "development".to_string()));

        let host = lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match lookup("APP_PORT") {
            Some(raw) => parse_setting::<u16>("APP_PORT", &raw, "must be a valid u16")?,
            None => 3000,
        };

        let log_level = lookup("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let pricing_config = lookup("PRICING_CONFIG")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let fixed_distance_miles = match lookup("QUOTE_FIXED_DISTANCE_MILES") {
            Some(raw) if !raw.trim().is_empty() => {
                let miles = parse_setting::<Decimal>(
                    "QUOTE_FIXED_DISTANCE_MILES",
                    &raw,
                    "must be a decimal number of miles",
                )?;
                if miles.is_sign_negative() && !miles.is_zero() {
                    return Err(EngineError::InvalidSetting {
                        key: "QUOTE_FIXED_DISTANCE_MILES".to_string(),
                        message: "must not be negative".to_string(),
                    });
                }
                Some(miles)
            }
            _ => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            quoting: QuoteSettings {
                pricing_config,
                fixed_distance_miles,
            },
        })
    }
}

fn parse_setting<T: FromStr>(key: &str, raw: &str, message: &str) -> EngineResult<T> {
    raw.trim().parse::<T>().map_err(|_| EngineError::InvalidSetting {
        key: key.to_string(),
        message: format!("{} (got '{}')", message, raw),
    })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host or IP address to bind, from `APP_HOST`.
    pub host: String,
    /// Port to bind, from `APP_PORT`.
    pub port: u16,
}

impl ServerConfig {
    /// Resolves the bind address. `localhost` maps to `127.0.0.1`.
    pub fn socket_addr(&self) -> EngineResult<SocketAddr> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self.host.parse().map_err(|_| EngineError::InvalidSetting {
            key: "APP_HOST".to_string(),
            message: format!("'{}' is not an IPv4 or IPv6 address", self.host),
        })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub log_level: String,
}

/// Where quotes get their pricing rules and distances from.
#[derive(Debug, Clone, Default)]
pub struct QuoteSettings {
    /// Pricing YAML to seed the rule store with. `None` starts empty.
    pub pricing_config: Option<PathBuf>,
    /// Replaces the random estimator with a fixed distance when set.
    pub fixed_distance_miles: Option<Decimal>,
}
