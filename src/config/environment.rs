//! Environment configuration
//!
//! Read once at startup, validated, then injected through `AppState`.
//! Handlers never touch `std::env` themselves.

use std::env;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SUMMARY_DAYS: u32 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GAS_URL is not a valid URL ({value}): {reason}")]
    InvalidGatewayUrl { value: String, reason: String },

    #[error("{name} must be a positive number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub host: String,
    pub port: u16,
    /// Base address of the Apps Script gateway. `None` keeps the server up
    /// but every gateway-backed route answers 500.
    pub gas_url: Option<Url>,
    pub gateway_timeout: Duration,
    pub cors_origins: Vec<String>,
    pub summary_days: u32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            gas_url: None,
            gateway_timeout: Duration::from_secs(DEFAULT_GATEWAY_TIMEOUT_SECS),
            cors_origins: Vec::new(),
            summary_days: DEFAULT_SUMMARY_DAYS,
        }
    }
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let gas_url = match non_empty_var("GAS_URL") {
            Some(value) => Some(parse_gateway_url(&value)?),
            None => None,
        };

        Ok(Self {
            host: non_empty_var("HOST").unwrap_or(defaults.host),
            port: parse_number("PORT", defaults.port)?,
            gas_url,
            gateway_timeout: Duration::from_secs(parse_number(
                "GATEWAY_TIMEOUT_SECS",
                DEFAULT_GATEWAY_TIMEOUT_SECS,
            )?),
            cors_origins: non_empty_var("CORS_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or_default(),
            summary_days: parse_number("SUMMARY_DAYS", defaults.summary_days)?,
        })
    }

    pub fn is_gateway_configured(&self) -> bool {
        self.gas_url.is_some()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn parse_gateway_url(value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|e| ConfigError::InvalidGatewayUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match non_empty_var(name) {
        None => Ok(default),
        Some(value) => match value.parse::<T>() {
            Ok(n) if n > T::default() => Ok(n),
            _ => Err(ConfigError::InvalidNumber { name, value }),
        },
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_url_must_parse() {
        assert!(parse_gateway_url("https://script.google.com/macros/s/abc/exec").is_ok());
        assert!(matches!(
            parse_gateway_url("not a url"),
            Err(ConfigError::InvalidGatewayUrl { .. })
        ));
    }

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            split_origins(" https://a.example , ,https://b.example"),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn defaults_leave_gateway_unconfigured() {
        let config = EnvironmentConfig::default();
        assert!(!config.is_gateway_configured());
        assert_eq!(config.summary_days, 30);
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
    }
}
