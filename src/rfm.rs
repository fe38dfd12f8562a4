//! Recency / frequency / monetary reduction keyed by customer state.
//!
//! Recency is measured against the latest purchase date in the *filtered*
//! window, not wall-clock time, so a historical window still has a state at
//! zero days.

use crate::types::{OrderRecord, RfmRow, RfmSummary};
use crate::util::mean;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// One row per state present in `data`, in first-seen order.
pub fn derive_rfm(data: &[OrderRecord]) -> Vec<RfmRow> {
    struct Acc<'a> {
        state: &'a str,
        last_order: NaiveDate,
        orders: HashSet<&'a str>,
        monetary: f64,
    }

    let Some(global_max) = data.iter().map(OrderRecord::purchase_date).max() else {
        return Vec::new();
    };

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut states: Vec<Acc> = Vec::new();
    for r in data {
        let date = r.purchase_date();
        let slot = *index.entry(r.customer_state.as_str()).or_insert_with(|| {
            states.push(Acc {
                state: &r.customer_state,
                last_order: date,
                orders: HashSet::new(),
                monetary: 0.0,
            });
            states.len() - 1
        });
        let acc = &mut states[slot];
        acc.last_order = acc.last_order.max(date);
        acc.orders.insert(&r.order_id);
        acc.monetary += r.payment_value;
    }

    states
        .into_iter()
        .map(|acc| RfmRow {
            state: acc.state.to_string(),
            recency_days: (global_max - acc.last_order).num_days(),
            frequency: acc.orders.len(),
            monetary: acc.monetary,
        })
        .collect()
}

/// Means over every row of the RFM table, independent of any top-N cut.
pub fn summarize_rfm(rows: &[RfmRow]) -> RfmSummary {
    let recency: Vec<f64> = rows.iter().map(|r| r.recency_days as f64).collect();
    let frequency: Vec<f64> = rows.iter().map(|r| r.frequency as f64).collect();
    let monetary: Vec<f64> = rows.iter().map(|r| r.monetary).collect();
    RfmSummary {
        states: rows.len(),
        mean_recency_days: mean(&recency),
        mean_frequency: mean(&frequency),
        mean_monetary: mean(&monetary),
    }
}
