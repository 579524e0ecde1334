use crate::cases::ExpiryAlertPolicy;
use chrono::Duration;
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::PathBuf;

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
    pub data: DataConfig,
    pub alerts: AlertConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let cases_csv = env::var("APP_CASES_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let cooldown_days = match env::var("APP_ALERT_COOLDOWN_DAYS") {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|days| *days >= 0)
                .ok_or(ConfigError::InvalidCooldown)?,
            Err(_) => AlertConfig::DEFAULT_COOLDOWN_DAYS,
        };

        let windows = match env::var("APP_ALERT_WINDOWS") {
            Ok(raw) => parse_windows(&raw)?,
            Err(_) => AlertConfig::default_windows(),
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw).ok_or(ConfigError::InvalidLogFormat(raw))?,
            Err(_) => LogFormat::default_for(environment),
        };

        Ok(Self {
            environment,
            data: DataConfig { cases_csv },
            alerts: AlertConfig {
                cooldown_days,
                windows,
            },
            telemetry: TelemetryConfig { log_level, format },
        })
    }
}

/// Where case records come from. `None` selects the bundled sample dataset.
#[derive(Debug, Clone, Default)]
pub struct DataConfig {
    pub cases_csv: Option<PathBuf>,
}

/// Expiry alert windows per visa type and the cooldown between repeat alerts.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    pub cooldown_days: i64,
    pub windows: BTreeMap<String, i64>,
}

impl AlertConfig {
    pub const DEFAULT_COOLDOWN_DAYS: i64 = ExpiryAlertPolicy::DEFAULT_COOLDOWN_DAYS;

    pub fn default_windows() -> BTreeMap<String, i64> {
        ExpiryAlertPolicy::standard_windows()
    }

    pub fn policy(&self) -> ExpiryAlertPolicy {
        ExpiryAlertPolicy::new(self.windows.clone(), Duration::days(self.cooldown_days))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    /// Pretty output while developing; compact lines everywhere else.
    pub fn default_for(environment: AppEnvironment) -> Self {
        match environment {
            AppEnvironment::Development => Self::Pretty,
            AppEnvironment::Test | AppEnvironment::Production => Self::Compact,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Parses `TYPE=DAYS` pairs separated by commas, e.g. `H-1B=210,J-1=120`.
fn parse_windows(raw: &str) -> Result<BTreeMap<String, i64>, ConfigError> {
    let mut windows = BTreeMap::new();
    for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let invalid = || ConfigError::InvalidAlertWindow(entry.to_string());
        let (visa_type, days) = entry.split_once('=').ok_or_else(invalid)?;
        let visa_type = visa_type.trim();
        let days = days
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|days| *days >= 0)
            .ok_or_else(invalid)?;
        if visa_type.is_empty() {
            return Err(invalid());
        }
        windows.insert(visa_type.to_string(), days);
    }
    Ok(windows)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidCooldown,
    InvalidAlertWindow(String),
    InvalidLogFormat(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCooldown => {
                write!(f, "APP_ALERT_COOLDOWN_DAYS must be a non-negative integer")
            }
            ConfigError::InvalidAlertWindow(entry) => write!(
                f,
                "APP_ALERT_WINDOWS entry '{}' must look like VISA_TYPE=DAYS",
                entry
            ),
            ConfigError::InvalidLogFormat(value) => write!(
                f,
                "APP_LOG_FORMAT '{}' must be either 'compact' or 'pretty'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
