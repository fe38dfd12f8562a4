use crate::error::{DashboardError, Result};
use crate::types::{OrderRecord, RawRow};
use crate::util::{parse_f64_safe, parse_timestamp_safe};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 7] = [
    "customer_id",
    "customer_city",
    "customer_state",
    "order_id",
    "payment_type",
    "payment_value",
    "order_purchase_timestamp",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
}

pub fn load_orders(path: impl AsRef<Path>) -> Result<(Vec<OrderRecord>, LoadReport)> {
    let path = path.as_ref();
    log::info!("loading orders from {}", path.display());
    let file = std::fs::File::open(path)?;
    read_orders(file)
}

/// Reads, cleans and sorts the order table by purchase time. Rows with a
/// missing identifier, an unparsable timestamp or a bad payment value are
/// skipped and counted in `parse_errors`.
pub fn read_orders<R: Read>(reader: R) -> Result<(Vec<OrderRecord>, LoadReport)> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(DashboardError::MissingColumn(missing.to_string()));
    }

    let mut total_rows = 0usize;
    let mut parse_errors = 0usize;
    let mut records: Vec<OrderRecord> = Vec::new();

    for result in rdr.deserialize::<RawRow>() {
        total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                log::debug!("row {total_rows}: {e}");
                parse_errors += 1;
                continue;
            }
        };

        let Some(order_purchase_timestamp) = parse_timestamp_safe(row.order_purchase_timestamp.as_deref()) else {
            parse_errors += 1;
            continue;
        };
        let payment_value = match parse_f64_safe(row.payment_value.as_deref()) {
            Some(v) if v >= 0.0 => v,
            _ => {
                parse_errors += 1;
                continue;
            }
        };
        let (Some(customer_id), Some(order_id)) = (non_empty(row.customer_id), non_empty(row.order_id)) else {
            parse_errors += 1;
            continue;
        };

        records.push(OrderRecord {
            customer_id,
            order_id,
            customer_city: non_empty(row.customer_city).unwrap_or_else(|| "unknown".to_string()),
            customer_state: non_empty(row.customer_state).unwrap_or_else(|| "unknown".to_string()),
            payment_type: non_empty(row.payment_type).unwrap_or_else(|| "not_defined".to_string()),
            payment_value,
            order_purchase_timestamp,
        });
    }

    // Stable, so rows sharing a timestamp keep their file order.
    records.sort_by_key(|r| r.order_purchase_timestamp);

    if parse_errors > 0 {
        log::warn!("skipped {parse_errors} of {total_rows} rows that failed validation");
    }
    let report = LoadReport {
        total_rows,
        loaded_rows: records.len(),
        parse_errors,
    };
    log::info!("loaded {} order rows", report.loaded_rows);
    Ok((records, report))
}

fn non_empty(s: Option<String>) -> Option<String> {
    let s = s?.trim().to_string();
    (!s.is_empty()).then_some(s)
}
