//! Runtime configuration resolved from environment variables.
//!
//! # Responsibility
//! - Decide where schedule data and logs live and how verbose logs are.
//!
//! # Invariants
//! - Resolved directories are absolute (the logger rejects relative ones).
//! - Resolution reads the environment only through the provided lookup.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "SCHEDULE_DATA_DIR";
pub const LOG_DIR_ENV: &str = "SCHEDULE_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "SCHEDULE_LOG_LEVEL";

const DEFAULT_DATA_DIR: &str = "data";
const LOG_SUBDIR: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl ScheduleConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::resolve(&cwd, |key| std::env::var(key).ok()))
    }

    /// Resolves configuration from `lookup`, anchoring relative paths at `cwd`.
    ///
    /// Blank values count as unset.
    pub fn resolve(cwd: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let data_dir = absolutize(
            cwd,
            value(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
        );
        let log_dir = match value(LOG_DIR_ENV) {
            Some(raw) => absolutize(cwd, raw),
            None => data_dir.join(LOG_SUBDIR),
        };
        let log_level =
            value(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string());

        Self {
            data_dir,
            log_dir,
            log_level,
        }
    }
}

fn absolutize(cwd: &Path, raw: String) -> PathBuf {
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cwd() -> PathBuf {
        std::env::temp_dir().join("schedule-config")
    }

    #[test]
    fn defaults_live_under_cwd() {
        let config = ScheduleConfig::resolve(&cwd(), |_| None);

        assert_eq!(config.data_dir, cwd().join("data"));
        assert_eq!(config.log_dir, cwd().join("data").join("logs"));
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let absolute_logs = std::env::temp_dir().join("schedule-logs");
        let env = HashMap::from([
            (DATA_DIR_ENV, "my-week".to_string()),
            (LOG_DIR_ENV, absolute_logs.display().to_string()),
            (LOG_LEVEL_ENV, " warn ".to_string()),
        ]);
        let config = ScheduleConfig::resolve(&cwd(), |key| env.get(key).cloned());

        assert_eq!(config.data_dir, cwd().join("my-week"));
        assert_eq!(config.log_dir, absolute_logs);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = ScheduleConfig::resolve(&cwd(), |_| Some("   ".to_string()));
        assert_eq!(config.data_dir, cwd().join("data"));
    }
}
