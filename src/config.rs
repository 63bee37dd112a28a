//! Runtime configuration.
//!
//! Values come from the process environment (optionally seeded from a `.env`
//! file); CLI flags are applied on top by `crate::app`.

use std::path::{Path, PathBuf};

use crate::error::{AppError, ErrorKind};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_PRICES_FILE: &str = "historical_silver_price.csv";
pub const DEFAULT_PURCHASES_FILE: &str = "state_wise_silver_purchased_kg.csv";
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub prices_file: PathBuf,
    pub purchases_file: PathBuf,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            prices_file: PathBuf::from(DEFAULT_PRICES_FILE),
            purchases_file: PathBuf::from(DEFAULT_PURCHASES_FILE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
        }
    }
}

impl DashboardConfig {
    /// Read configuration from the environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let log_level = non_empty("SILVER_LOG")
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or(defaults.log_level);
        if !LOG_LEVELS.contains(&log_level.as_str()) {
            return Err(AppError::new(
                ErrorKind::Config,
                format!(
                    "Invalid SILVER_LOG '{log_level}'. Expected one of: {}.",
                    LOG_LEVELS.join(", ")
                ),
            ));
        }

        Ok(Self {
            data_dir: non_empty("SILVER_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            prices_file: non_empty("SILVER_PRICES_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.prices_file),
            purchases_file: non_empty("SILVER_PURCHASES_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.purchases_file),
            log_level,
            log_file: non_empty("SILVER_LOG_FILE").map(PathBuf::from),
        })
    }

    pub fn prices_path(&self) -> PathBuf {
        resolve(&self.data_dir, &self.prices_file)
    }

    pub fn purchases_path(&self) -> PathBuf {
        resolve(&self.data_dir, &self.purchases_file)
    }
}

fn resolve(dir: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        dir.join(file)
    }
}
