use crate::costing::{RaiseTiming, ReportOptions, StepLayout};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub costing: CostingConfig,
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

        let include_grand_total = match env::var("COSTING_GRAND_TOTAL") {
            Ok(value) => parse_flag(&value).ok_or(ConfigError::InvalidFlag {
                name: "COSTING_GRAND_TOTAL",
                value,
            })?,
            Err(_) => false,
        };

        let raise_timing = match env::var("COSTING_RAISE_TIMING") {
            Ok(value) => RaiseTiming::parse(&value).ok_or(ConfigError::InvalidRaiseTiming(value))?,
            Err(_) => RaiseTiming::default(),
        };

        let export_filename = env::var("COSTING_EXPORT_FILENAME")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            costing: CostingConfig {
                include_grand_total,
                raise_timing,
                export_filename,
            },
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub const DEFAULT_EXPORT_FILENAME: &str = "contract_costs.csv";

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

/// Report defaults applied when a scenario leaves them unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostingConfig {
    pub include_grand_total: bool,
    pub raise_timing: RaiseTiming,
    pub export_filename: String,
}

impl CostingConfig {
    pub fn report_defaults(&self) -> ReportOptions {
        ReportOptions {
            include_grand_total: self.include_grand_total,
            raise_timing: self.raise_timing,
            step_layout: StepLayout::default(),
        }
    }
}

impl Default for CostingConfig {
    fn default() -> Self {
        Self {
            include_grand_total: false,
            raise_timing: RaiseTiming::default(),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFlag { name: &'static str, value: String },
    InvalidRaiseTiming(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be true or false, got '{value}'")
            }
            ConfigError::InvalidRaiseTiming(value) => write!(
                f,
                "COSTING_RAISE_TIMING must be first_year or second_year, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidFlag { .. }
            | ConfigError::InvalidRaiseTiming(_) => None,
        }
    }
}
