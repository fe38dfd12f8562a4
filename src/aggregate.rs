//! Group-and-count reductions over the filtered order set.
//!
//! Each grouping yields one [`GroupCount`] per distinct group key present in
//! the input, in the order the keys were first seen. Counts are distinct
//! identifier counts, never row counts.

use crate::types::{GroupCount, OrderRecord};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    City,
    State,
    PaymentType,
}

impl GroupField {
    fn key<'a>(&self, r: &'a OrderRecord) -> &'a str {
        match self {
            GroupField::City => &r.customer_city,
            GroupField::State => &r.customer_state,
            GroupField::PaymentType => &r.payment_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetField {
    Customer,
    Order,
}

impl TargetField {
    fn value<'a>(&self, r: &'a OrderRecord) -> &'a str {
        match self {
            TargetField::Customer => &r.customer_id,
            TargetField::Order => &r.order_id,
        }
    }
}

/// Distinct count of `target` values per `group` value, in first-seen order.
pub fn distinct_counts(data: &[OrderRecord], group: GroupField, target: TargetField) -> Vec<GroupCount> {
    struct Acc<'a> {
        key: &'a str,
        seen: HashSet<&'a str>,
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Acc> = Vec::new();
    for r in data {
        let key = group.key(r);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Acc {
                key,
                seen: HashSet::new(),
            });
            groups.len() - 1
        });
        groups[slot].seen.insert(target.value(r));
    }

    groups
        .into_iter()
        .map(|acc| GroupCount {
            group: acc.key.to_string(),
            count: acc.seen.len(),
        })
        .collect()
}

pub fn customers_by_city(data: &[OrderRecord]) -> Vec<GroupCount> {
    distinct_counts(data, GroupField::City, TargetField::Customer)
}

pub fn customers_by_state(data: &[OrderRecord]) -> Vec<GroupCount> {
    distinct_counts(data, GroupField::State, TargetField::Customer)
}

pub fn orders_by_city(data: &[OrderRecord]) -> Vec<GroupCount> {
    distinct_counts(data, GroupField::City, TargetField::Order)
}

pub fn orders_by_state(data: &[OrderRecord]) -> Vec<GroupCount> {
    distinct_counts(data, GroupField::State, TargetField::Order)
}

pub fn orders_by_payment_type(data: &[OrderRecord]) -> Vec<GroupCount> {
    distinct_counts(data, GroupField::PaymentType, TargetField::Order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(customer: &str, city: &str, state: &str, order: &str, payment: &str) -> OrderRecord {
        OrderRecord {
            customer_id: customer.to_string(),
            customer_city: city.to_string(),
            customer_state: state.to_string(),
            order_id: order.to_string(),
            payment_type: payment.to_string(),
            payment_value: 1.0,
            order_purchase_timestamp: NaiveDate::from_ymd_opt(2018, 1, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    fn sample() -> Vec<OrderRecord> {
        vec![
            // o1 is paid in two splits.
            row("c1", "campinas", "SP", "o1", "credit_card"),
            row("c1", "campinas", "SP", "o1", "voucher"),
            row("c2", "rio de janeiro", "RJ", "o2", "boleto"),
            // c1 buys again.
            row("c1", "campinas", "SP", "o3", "credit_card"),
            row("c3", "sao paulo", "SP", "o4", "credit_card"),
            row("c4", "niteroi", "RJ", "o5", "voucher"),
        ]
    }

    fn pairs(rows: &[GroupCount]) -> Vec<(&str, usize)> {
        rows.iter().map(|g| (g.group.as_str(), g.count)).collect()
    }

    #[test]
    fn customers_are_counted_once_per_group() {
        let data = sample();
        assert_eq!(
            pairs(&customers_by_city(&data)),
            vec![("campinas", 1), ("rio de janeiro", 1), ("sao paulo", 1), ("niteroi", 1)]
        );
        assert_eq!(pairs(&customers_by_state(&data)), vec![("SP", 2), ("RJ", 2)]);
    }

    #[test]
    fn orders_are_counted_once_per_group() {
        let data = sample();
        assert_eq!(
            pairs(&orders_by_city(&data)),
            vec![("campinas", 2), ("rio de janeiro", 1), ("sao paulo", 1), ("niteroi", 1)]
        );
        assert_eq!(pairs(&orders_by_state(&data)), vec![("SP", 3), ("RJ", 2)]);
    }

    #[test]
    fn split_payments_count_under_each_payment_type() {
        let data = sample();
        assert_eq!(
            pairs(&orders_by_payment_type(&data)),
            vec![("credit_card", 3), ("voucher", 2), ("boleto", 1)]
        );
    }

    #[test]
    fn counts_never_exceed_group_rows() {
        let data = sample();
        for g in distinct_counts(&data, GroupField::State, TargetField::Customer) {
            let rows = data.iter().filter(|r| r.customer_state == g.group);
            let unique: HashSet<_> = rows.clone().map(|r| r.customer_id.as_str()).collect();
            assert!(g.count <= rows.count());
            assert_eq!(g.count, unique.len());
        }
    }

    #[test]
    fn empty_input_gives_empty_tables() {
        assert!(customers_by_city(&[]).is_empty());
        assert!(orders_by_payment_type(&[]).is_empty());
    }
}
