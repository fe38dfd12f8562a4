use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How many rows each ranked table keeps and where exports go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub top_cities: usize,
    pub top_states: usize,
    pub top_payment_types: usize,
    pub top_rfm: usize,
    pub output_dir: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_cities: 5,
            top_states: 5,
            top_payment_types: 4,
            top_rfm: 5,
            output_dir: PathBuf::from("."),
        }
    }
}

impl DashboardConfig {
    /// Missing keys fall back to their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
