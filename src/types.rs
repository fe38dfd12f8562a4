use crate::filter::DateRange;
use crate::util::format_number;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One CSV row as it comes off disk. Every field is optional so a single bad
/// cell is counted as a reject instead of aborting the whole read.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    pub customer_id: Option<String>,
    pub customer_city: Option<String>,
    pub customer_state: Option<String>,
    pub order_id: Option<String>,
    pub payment_type: Option<String>,
    pub payment_value: Option<String>,
    pub order_purchase_timestamp: Option<String>,
}

/// A cleaned order/payment row. Several rows may share an `order_id` (one per
/// payment split) and several may share a `customer_id` (repeat purchases).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub customer_id: String,
    pub customer_city: String,
    pub customer_state: String,
    pub order_id: String,
    pub payment_type: String,
    pub payment_value: f64,
    pub order_purchase_timestamp: NaiveDateTime,
}

impl OrderRecord {
    /// Civil date of the purchase, time-of-day discarded.
    pub fn purchase_date(&self) -> NaiveDate {
        self.order_purchase_timestamp.date()
    }
}

/// `(group_key, metric_value)` where the metric is a distinct count.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq, Eq)]
pub struct GroupCount {
    #[serde(rename = "Group")]
    #[tabled(rename = "Group")]
    pub group: String,
    #[serde(rename = "Count")]
    #[tabled(rename = "Count")]
    pub count: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct RfmRow {
    #[serde(rename = "State")]
    #[tabled(rename = "State")]
    pub state: String,
    #[serde(rename = "RecencyDays")]
    #[tabled(rename = "RecencyDays")]
    pub recency_days: i64,
    #[serde(rename = "Frequency")]
    #[tabled(rename = "Frequency")]
    pub frequency: usize,
    #[serde(rename = "Monetary")]
    #[tabled(rename = "Monetary", display_with = "display_money")]
    pub monetary: f64,
}

fn display_money(v: &f64) -> String {
    format_number(*v, 2)
}

/// Means over the full RFM table. `None` means there were no rows to average.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct RfmSummary {
    pub states: usize,
    pub mean_recency_days: Option<f64>,
    pub mean_frequency: Option<f64>,
    pub mean_monetary: Option<f64>,
}

/// Everything one recompute produces. Ranked tables are already truncated to
/// their configured top-N; `rfm` is the full, unranked table.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardTables {
    pub range: DateRange,
    pub filtered: Vec<OrderRecord>,
    pub customers_by_city: Vec<GroupCount>,
    pub customers_by_state: Vec<GroupCount>,
    pub orders_by_city: Vec<GroupCount>,
    pub orders_by_state: Vec<GroupCount>,
    pub payment_types: Vec<GroupCount>,
    pub rfm: Vec<RfmRow>,
    pub rfm_by_recency: Vec<RfmRow>,
    pub rfm_by_frequency: Vec<RfmRow>,
    pub rfm_by_monetary: Vec<RfmRow>,
    pub rfm_summary: RfmSummary,
}
