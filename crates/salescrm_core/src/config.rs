//! Process configuration resolved from environment variables.
//!
//! # Invariants
//! - Blank values behave exactly like unset values.
//! - Resolution never fails; unusable values fall back to defaults and are
//!   rejected later by the component that consumes them.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "SALESCRM_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "SALESCRM_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "SALESCRM_LOG_DIR";

const DEFAULT_DB_PATH: &str = "data/crm.db";

/// Startup settings for the CRM core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrmConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Rolling log directory. File logging is skipped when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CrmConfig {
    /// Reads `SALESCRM_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: read(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}
