//! Runtime configuration, read from environment variables.

use std::time::Duration;

use crate::domain::Error;

pub const DEFAULT_ACCRUAL_ADDRESS: &str = "localhost:8081";
pub const DEFAULT_PULL_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_ACCRUAL_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_CYCLE_DEADLINE_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Accrual authority, `host:port` or a full URL (env: ACCRUAL_SYSTEM_ADDRESS)
    pub accrual_address: String,
    /// Pause between reconciliation cycles (env: PULL_INTERVAL, seconds)
    pub pull_interval: Duration,
    /// Bound on a single authority request (env: ACCRUAL_TIMEOUT, seconds)
    pub accrual_timeout: Duration,
    /// Bound on one reconciliation cycle (env: CYCLE_DEADLINE, seconds)
    pub cycle_deadline: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let accrual_address = lookup("ACCRUAL_SYSTEM_ADDRESS")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ACCRUAL_ADDRESS.to_string());

        Ok(Self {
            accrual_address,
            pull_interval: seconds(&lookup, "PULL_INTERVAL", DEFAULT_PULL_INTERVAL_SECS)?,
            accrual_timeout: seconds(&lookup, "ACCRUAL_TIMEOUT", DEFAULT_ACCRUAL_TIMEOUT_SECS)?,
            cycle_deadline: seconds(&lookup, "CYCLE_DEADLINE", DEFAULT_CYCLE_DEADLINE_SECS)?,
        })
    }

    /// Base URL of the accrual authority without a trailing slash.
    pub fn accrual_base_url(&self) -> String {
        let address = self.accrual_address.trim_end_matches('/');
        if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else {
            format!("http://{address}")
        }
    }
}

fn seconds<F>(lookup: &F, name: &str, default: u64) -> Result<Duration, Error>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| {
                Error::Config(format!(
                    "{name} must be a whole number of seconds, got {raw:?}"
                ))
            }),
        None => Ok(Duration::from_secs(default)),
    }
}
