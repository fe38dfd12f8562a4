//! Command-line interface definitions and argument parsing

use crate::config::DashboardConfig;
use crate::error::Result;
use crate::util::parse_date;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Summary tables and state-level RFM analysis for an e-commerce order export
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the cleaned order CSV
    #[arg(short, long, default_value = "all_data.csv")]
    pub input: PathBuf,

    /// First purchase date to include (YYYY-MM-DD); defaults to the earliest order
    #[arg(short, long)]
    pub start: Option<String>,

    /// Last purchase date to include (YYYY-MM-DD); defaults to the latest order
    #[arg(short, long)]
    pub end: Option<String>,

    /// JSON file with top-N sizes and output directory
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for exported tables, overrides the config file
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Rows shown per table in the console preview
    #[arg(long, default_value = "5")]
    pub preview_rows: usize,

    /// Keep prompting for new date ranges after the first report
    #[arg(long)]
    pub interactive: bool,
}

impl Args {
    pub fn start_date(&self) -> Result<Option<NaiveDate>> {
        self.start.as_deref().map(parse_date).transpose()
    }

    pub fn end_date(&self) -> Result<Option<NaiveDate>> {
        self.end.as_deref().map(parse_date).transpose()
    }

    /// Config file (or defaults) with command-line overrides applied.
    pub fn resolve_config(&self) -> Result<DashboardConfig> {
        let mut cfg = match &self.config {
            Some(path) => DashboardConfig::from_json_file(path)?,
            None => DashboardConfig::default(),
        };
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = dir.clone();
        }
        Ok(cfg)
    }
}
