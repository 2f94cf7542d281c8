use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{ParseTimeError, TimeOfDay, WorkingWindow};

pub const ENV_WORK_START: &str = "HOTDESK_WORK_START";
pub const ENV_WORK_END: &str = "HOTDESK_WORK_END";
pub const ENV_METRICS_PORT: &str = "HOTDESK_METRICS_PORT";
pub const ENV_SEED: &str = "HOTDESK_SEED";
pub const ENV_DATE: &str = "HOTDESK_DATE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: {source}")]
    Time {
        var: &'static str,
        #[source]
        source: ParseTimeError,
    },
    #[error("{var}: invalid port {value:?}")]
    Port { var: &'static str, value: String },
    #[error("{var}: invalid date {value:?}, expected YYYY-MM-DD")]
    Date { var: &'static str, value: String },
    #[error("working window {start}-{end} is empty")]
    EmptyWindow { start: TimeOfDay, end: TimeOfDay },
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub window: WorkingWindow,
    pub metrics_port: Option<u16>,
    pub seed_path: Option<PathBuf>,
    /// Day to report on; today when unset.
    pub date: Option<NaiveDate>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = WorkingWindow::default();
        let time = |var: &'static str, default: TimeOfDay| -> Result<TimeOfDay, ConfigError> {
            match lookup(var) {
                Some(raw) => raw.trim().parse().map_err(|source| ConfigError::Time { var, source }),
                None => Ok(default),
            }
        };
        let start = time(ENV_WORK_START, defaults.start())?;
        let end = time(ENV_WORK_END, defaults.end())?;
        let window = WorkingWindow::new(start, end).ok_or(ConfigError::EmptyWindow { start, end })?;

        let metrics_port = lookup(ENV_METRICS_PORT)
            .map(|raw| {
                raw.trim().parse::<u16>().map_err(|_| ConfigError::Port {
                    var: ENV_METRICS_PORT,
                    value: raw,
                })
            })
            .transpose()?;

        let date = lookup(ENV_DATE)
            .map(|raw| {
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ConfigError::Date {
                    var: ENV_DATE,
                    value: raw,
                })
            })
            .transpose()?;

        Ok(Self {
            window,
            metrics_port,
            seed_path: lookup(ENV_SEED).map(PathBuf::from),
            date,
        })
    }
}
