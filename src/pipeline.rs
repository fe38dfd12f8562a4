//! The dashboard pipeline: one immutable order table, recomputed in full for
//! every requested date range.

use crate::aggregate;
use crate::config::DashboardConfig;
use crate::filter::{filter_by_purchase_date, purchase_date_bounds, DateRange};
use crate::rank::{rank_group_counts, rank_rfm, RfmMetric};
use crate::rfm::{derive_rfm, summarize_rfm};
use crate::types::{DashboardTables, OrderRecord};

pub struct Dashboard {
    records: Vec<OrderRecord>,
    config: DashboardConfig,
}

impl Dashboard {
    pub fn new(records: Vec<OrderRecord>, config: DashboardConfig) -> Self {
        Self { records, config }
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Min/max purchase date of the loaded table; the default range.
    pub fn bounds(&self) -> Option<DateRange> {
        purchase_date_bounds(&self.records)
    }

    /// Filters once, then derives every table from that same filtered set.
    /// An empty window produces empty tables and "no data" means.
    pub fn recompute(&self, range: DateRange) -> DashboardTables {
        let filtered = filter_by_purchase_date(&self.records, &range);
        log::debug!(
            "recompute {range}: {} of {} rows in window",
            filtered.len(),
            self.records.len()
        );
        if filtered.is_empty() {
            log::info!("no orders between {range}");
        }

        let cfg = &self.config;
        let rfm = derive_rfm(&filtered);
        let rfm_summary = summarize_rfm(&rfm);

        DashboardTables {
            range,
            customers_by_city: rank_group_counts(&aggregate::customers_by_city(&filtered), cfg.top_cities),
            customers_by_state: rank_group_counts(&aggregate::customers_by_state(&filtered), cfg.top_states),
            orders_by_city: rank_group_counts(&aggregate::orders_by_city(&filtered), cfg.top_cities),
            orders_by_state: rank_group_counts(&aggregate::orders_by_state(&filtered), cfg.top_states),
            payment_types: rank_group_counts(
                &aggregate::orders_by_payment_type(&filtered),
                cfg.top_payment_types,
            ),
            rfm_by_recency: rank_rfm(&rfm, RfmMetric::Recency, cfg.top_rfm),
            rfm_by_frequency: rank_rfm(&rfm, RfmMetric::Frequency, cfg.top_rfm),
            rfm_by_monetary: rank_rfm(&rfm, RfmMetric::Monetary, cfg.top_rfm),
            rfm_summary,
            rfm,
            filtered,
        }
    }
}
