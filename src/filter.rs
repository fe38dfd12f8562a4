//! Civil-date range filtering over the loaded order table.

use crate::error::{DashboardError, Result};
use crate::types::OrderRecord;
use chrono::NaiveDate;
use std::fmt;

/// Closed interval `[start, end]` of civil dates. Construction rejects
/// `start > end`, so every value of this type is a valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// True if `self` lies entirely within `outer`.
    pub fn is_within(&self, outer: &DateRange) -> bool {
        outer.start <= self.start && self.end <= outer.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Rows whose purchase date falls inside `range`, in input order. Time of day
/// is ignored, so anything placed on `start` or `end` is included.
pub fn filter_by_purchase_date(records: &[OrderRecord], range: &DateRange) -> Vec<OrderRecord> {
    records
        .iter()
        .filter(|r| range.contains(r.purchase_date()))
        .cloned()
        .collect()
}

/// Earliest and latest purchase date in the table, or `None` when it is empty.
pub fn purchase_date_bounds(records: &[OrderRecord]) -> Option<DateRange> {
    let mut dates = records.iter().map(OrderRecord::purchase_date);
    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some(DateRange { start: min, end: max })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order(id: &str, ts: &str) -> OrderRecord {
        OrderRecord {
            customer_id: format!("c-{id}"),
            customer_city: "sao paulo".to_string(),
            customer_state: "SP".to_string(),
            order_id: id.to_string(),
            payment_type: "credit_card".to_string(),
            payment_value: 10.0,
            order_purchase_timestamp: chrono::NaiveDateTime::parse_from_str(
                ts,
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
        }
    }

    #[test]
    fn rejects_inverted_range() {
        let err = DateRange::new(date(2018, 2, 1), date(2018, 1, 1)).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRange { .. }));
        assert!(DateRange::new(date(2018, 1, 1), date(2018, 1, 1)).is_ok());
    }

    #[test]
    fn bounds_are_inclusive_and_ignore_time_of_day() {
        let records = vec![
            order("a", "2017-12-31 23:59:59"),
            order("b", "2018-01-01 00:00:00"),
            order("c", "2018-01-15 12:00:00"),
            order("d", "2018-01-31 23:59:59"),
            order("e", "2018-02-01 00:00:00"),
        ];
        let range = DateRange::new(date(2018, 1, 1), date(2018, 1, 31)).unwrap();
        let kept: Vec<_> = filter_by_purchase_date(&records, &range)
            .into_iter()
            .map(|r| r.order_id)
            .collect();
        assert_eq!(kept, vec!["b", "c", "d"]);
    }

    #[test]
    fn membership_matches_civil_date_test() {
        let records: Vec<_> = (1..=28)
            .map(|d| order(&d.to_string(), &format!("2018-02-{d:02} 18:30:00")))
            .collect();
        let range = DateRange::new(date(2018, 2, 10), date(2018, 2, 20)).unwrap();
        let kept = filter_by_purchase_date(&records, &range);
        for r in &records {
            let inside = kept.iter().any(|k| k.order_id == r.order_id);
            assert_eq!(inside, range.contains(r.purchase_date()));
        }
        assert_eq!(kept.len(), 11);
    }

    #[test]
    fn empty_when_nothing_matches() {
        let records = vec![order("a", "2018-01-01 10:00:00")];
        let range = DateRange::new(date(2019, 1, 1), date(2019, 12, 31)).unwrap();
        assert!(filter_by_purchase_date(&records, &range).is_empty());
    }

    #[test]
    fn reports_table_bounds() {
        assert_eq!(purchase_date_bounds(&[]), None);
        let records = vec![
            order("a", "2018-03-01 10:00:00"),
            order("b", "2017-09-04 08:00:00"),
            order("c", "2018-08-29 15:00:00"),
        ];
        let bounds = purchase_date_bounds(&records).unwrap();
        assert_eq!(bounds.start(), date(2017, 9, 4));
        assert_eq!(bounds.end(), date(2018, 8, 29));
        let inner = DateRange::new(date(2018, 1, 1), date(2018, 2, 1)).unwrap();
        assert!(inner.is_within(&bounds));
        let outer = DateRange::new(date(2016, 1, 1), date(2018, 2, 1)).unwrap();
        assert!(!outer.is_within(&bounds));
    }
}
