//! Runtime configuration read from the environment (and `.env`).

use std::path::PathBuf;

use crate::records::Grain;

pub const DATA_DIR_VAR: &str = "DASHBOARD_DATA_DIR";
pub const FALLBACK_DATA_DIR_VAR: &str = "DASHBOARD_FALLBACK_DATA_DIR";
pub const BIND_ADDR_VAR: &str = "DASHBOARD_BIND_ADDR";

const DEFAULT_DATA_DIR: &str = "../data";
const DEFAULT_FALLBACK_DATA_DIR: &str = "data";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Directory tried first for `hour.csv` / `day.csv`.
    pub data_dir: PathBuf,
    /// Directory tried when a file is missing from `data_dir`.
    pub fallback_data_dir: PathBuf,
    pub bind_addr: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            fallback_data_dir: PathBuf::from(DEFAULT_FALLBACK_DATA_DIR),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            data_dir: lookup(DATA_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            fallback_data_dir: lookup(FALLBACK_DATA_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.fallback_data_dir),
            bind_addr: lookup(BIND_ADDR_VAR).unwrap_or(defaults.bind_addr),
        }
    }

    /// Candidate locations for a table, in resolution order.
    pub fn candidates(&self, grain: Grain) -> [PathBuf; 2] {
        [
            self.data_dir.join(grain.file_name()),
            self.fallback_data_dir.join(grain.file_name()),
        ]
    }
}
