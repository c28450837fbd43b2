//! # Configuration
//!
//! Process-wide settings, built once at startup and handed to the components
//! that need them. Values come from environment variables; anything unset
//! falls back to the defaults below.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::str::FromStr;

/// Anchor used to derive every pay period from its number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayPeriodAnchor {
    pub date: NaiveDate,
    pub pp_number: i64,
}

impl Default for PayPeriodAnchor {
    fn default() -> Self {
        Self {
            // PP 17 starts Monday 2025-08-04
            date: NaiveDate::from_ymd_opt(2025, 8, 4).unwrap_or_default(),
            pp_number: 17,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub cors_origins: Vec<String>,
    pub anchor: PayPeriodAnchor,
    pub reminder_days_ahead: i64,
    /// Zero disables the background sweep
    pub reminder_sweep_interval_secs: u64,
    pub snowball_monthly_payment: Decimal,
    pub reconcile_keywords: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:autobudget.db".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            anchor: PayPeriodAnchor::default(),
            reminder_days_ahead: 3,
            reminder_sweep_interval_secs: 0,
            snowball_monthly_payment: Decimal::from(300),
            reconcile_keywords: vec!["rent".to_string(), "grocer".to_string()],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}' ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl AppConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(addr) = get("BIND_ADDR") {
            config.bind_addr = parse_value("BIND_ADDR", &addr)?;
        }
        if let Some(origins) = get("CORS_ORIGINS") {
            config.cors_origins = split_list(&origins);
        }
        if let Some(date) = get("PAY_PERIOD_ANCHOR_DATE") {
            config.anchor.date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
                ConfigError::InvalidValue {
                    var: "PAY_PERIOD_ANCHOR_DATE",
                    value: date.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        if let Some(pp) = get("PAY_PERIOD_ANCHOR_PP") {
            config.anchor.pp_number = parse_value("PAY_PERIOD_ANCHOR_PP", &pp)?;
        }
        if let Some(days) = get("REMINDER_DAYS_AHEAD") {
            let days: i64 = parse_value("REMINDER_DAYS_AHEAD", &days)?;
            if days < 0 {
                return Err(ConfigError::InvalidValue {
                    var: "REMINDER_DAYS_AHEAD",
                    value: days.to_string(),
                    reason: "must not be negative".to_string(),
                });
            }
            config.reminder_days_ahead = days;
        }
        if let Some(secs) = get("REMINDER_SWEEP_INTERVAL_SECS") {
            config.reminder_sweep_interval_secs = parse_value("REMINDER_SWEEP_INTERVAL_SECS", &secs)?;
        }
        if let Some(payment) = get("SNOWBALL_MONTHLY_PAYMENT") {
            config.snowball_monthly_payment = parse_value("SNOWBALL_MONTHLY_PAYMENT", &payment)?;
        }
        if let Some(keywords) = get("RECONCILE_KEYWORDS") {
            config.reconcile_keywords = split_list(&keywords);
        }

        Ok(config)
    }
}

fn parse_value<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
