//! E-commerce order dashboard core.
//!
//! Loads a flat order/payment table once and derives, for any civil-date
//! range, the ranked customer/order counts by city and state, payment-type
//! popularity, and a state-level RFM table with its averages.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod rank;
pub mod rfm;
pub mod types;
pub mod util;

pub use cli::Args;
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use filter::DateRange;
pub use pipeline::Dashboard;
pub use types::{DashboardTables, GroupCount, OrderRecord, RfmRow, RfmSummary};
