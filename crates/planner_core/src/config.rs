//! Runtime configuration resolved from the process environment.
//!
//! # Invariants
//! - `from_env` never fails; unusable values fall back to defaults and are
//!   logged at warn.

use crate::logging::{default_log_level, normalize_level};
use crate::view::pool::PoolSizing;
use log::warn;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "PLANNER_DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "PLANNER_LOG_LEVEL";
pub const POOL_CAPACITY_ENV: &str = "PLANNER_POOL_CAPACITY";
pub const DEFAULT_DOCUMENT_FILE_NAME: &str = "planner_data.json";

const APP_DIR_NAME: &str = "planner";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub data_dir: PathBuf,
    pub document_file_name: String,
    pub log_level: &'static str,
    pub pool_sizing: PoolSizing,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            document_file_name: DEFAULT_DOCUMENT_FILE_NAME.to_string(),
            log_level: default_log_level(),
            pool_sizing: PoolSizing::FitToData,
        }
    }
}

impl PlannerConfig {
    /// Reads the `PLANNER_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup` instead of the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = non_blank(lookup(DATA_DIR_ENV)) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = non_blank(lookup(LOG_LEVEL_ENV)) {
            match normalize_level(&raw) {
                Ok(level) => config.log_level = level,
                Err(err) => warn!(
                    "event=config_load module=config status=fallback key={} error={}",
                    LOG_LEVEL_ENV, err
                ),
            }
        }

        if let Some(raw) = non_blank(lookup(POOL_CAPACITY_ENV)) {
            config.pool_sizing = parse_pool_sizing(&raw);
        }

        config
    }

    /// Full path of the persisted planner document.
    pub fn document_path(&self) -> PathBuf {
        self.data_dir.join(&self.document_file_name)
    }

    /// Directory handed to `init_logging` by hosts without their own.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

fn parse_pool_sizing(raw: &str) -> PoolSizing {
    match raw.trim().parse::<usize>() {
        Ok(capacity) if capacity > 0 => PoolSizing::Fixed(capacity),
        _ => {
            warn!(
                "event=config_load module=config status=fallback key={} sizing=fit_to_data",
                POOL_CAPACITY_ENV
            );
            PoolSizing::FitToData
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}
