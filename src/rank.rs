//! Stable top-N selection used by every ranked table.

use crate::types::{GroupCount, RfmRow};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfmMetric {
    Recency,
    Frequency,
    Monetary,
}

impl RfmMetric {
    /// Smallest recency is best; for the other two, largest is best.
    pub fn best_first(&self) -> Direction {
        match self {
            RfmMetric::Recency => Direction::Ascending,
            RfmMetric::Frequency | RfmMetric::Monetary => Direction::Descending,
        }
    }

    fn value(&self, row: &RfmRow) -> f64 {
        match self {
            RfmMetric::Recency => row.recency_days as f64,
            RfmMetric::Frequency => row.frequency as f64,
            RfmMetric::Monetary => row.monetary,
        }
    }
}

/// At most `n` rows sorted by `key` in `direction`. Equal keys keep their
/// input order, so repeated calls on the same rows agree.
pub fn top_n<T, K, F>(rows: &[T], key: F, n: usize, direction: Direction) -> Vec<T>
where
    T: Clone,
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let mut sorted: Vec<T> = rows.to_vec();
    // `sort_by` is stable.
    sorted.sort_by(|a, b| {
        let ord = key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal);
        match direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    });
    sorted.truncate(n);
    sorted
}

/// Highest counts first.
pub fn rank_group_counts(rows: &[GroupCount], n: usize) -> Vec<GroupCount> {
    top_n(rows, |g| g.count, n, Direction::Descending)
}

pub fn rank_rfm(rows: &[RfmRow], metric: RfmMetric, n: usize) -> Vec<RfmRow> {
    top_n(rows, |r| metric.value(r), n, metric.best_first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, count: usize) -> GroupCount {
        GroupCount {
            group: name.to_string(),
            count,
        }
    }

    fn rfm(state: &str, recency_days: i64, frequency: usize, monetary: f64) -> RfmRow {
        RfmRow {
            state: state.to_string(),
            recency_days,
            frequency,
            monetary,
        }
    }

    fn names(rows: &[GroupCount]) -> Vec<&str> {
        rows.iter().map(|g| g.group.as_str()).collect()
    }

    #[test]
    fn descending_with_stable_ties() {
        let rows = vec![
            group("a", 3),
            group("b", 7),
            group("c", 3),
            group("d", 7),
            group("e", 1),
            group("f", 3),
        ];
        let top = rank_group_counts(&rows, 5);
        assert_eq!(names(&top), vec!["b", "d", "a", "c", "f"]);
    }

    #[test]
    fn ascending_with_stable_ties() {
        let rows = vec![group("x", 2), group("y", 1), group("z", 2), group("w", 1)];
        let top = top_n(&rows, |g| g.count, 10, Direction::Ascending);
        assert_eq!(names(&top), vec!["y", "w", "x", "z"]);
    }

    #[test]
    fn never_returns_more_than_n() {
        let rows: Vec<_> = (0..10).map(|i| group(&i.to_string(), i)).collect();
        assert_eq!(rank_group_counts(&rows, 4).len(), 4);
        assert_eq!(rank_group_counts(&rows[..2], 4).len(), 2);
        assert!(rank_group_counts(&[], 4).is_empty());
        assert!(rank_group_counts(&rows, 0).is_empty());
    }

    #[test]
    fn result_is_sorted_in_requested_direction() {
        let rows: Vec<_> = [5, 9, 1, 9, 4, 6, 2]
            .iter()
            .enumerate()
            .map(|(i, c)| group(&format!("g{i}"), *c))
            .collect();
        let top = rank_group_counts(&rows, 5);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        let bottom = top_n(&rows, |g| g.count, 5, Direction::Ascending);
        assert!(bottom.windows(2).all(|w| w[0].count <= w[1].count));
    }

    #[test]
    fn rfm_metrics_pick_their_best_end() {
        let rows = vec![
            rfm("SP", 4, 10, 500.0),
            rfm("RJ", 0, 3, 900.0),
            rfm("MG", 2, 12, 120.0),
        ];
        let by_recency = rank_rfm(&rows, RfmMetric::Recency, 2);
        assert_eq!(by_recency[0].state, "RJ");
        assert_eq!(by_recency[1].state, "MG");

        let by_frequency = rank_rfm(&rows, RfmMetric::Frequency, 5);
        let states: Vec<_> = by_frequency.iter().map(|r| r.state.as_str()).collect();
        assert_eq!(states, vec!["MG", "SP", "RJ"]);

        let by_monetary = rank_rfm(&rows, RfmMetric::Monetary, 1);
        assert_eq!(by_monetary[0].state, "RJ");
    }

    #[test]
    fn repeated_calls_agree() {
        let rows = vec![rfm("A", 1, 1, 1.0), rfm("B", 1, 1, 1.0), rfm("C", 1, 1, 1.0)];
        assert_eq!(
            rank_rfm(&rows, RfmMetric::Monetary, 5),
            rank_rfm(&rows, RfmMetric::Monetary, 5)
        );
        assert_eq!(rank_rfm(&rows, RfmMetric::Recency, 5), rows);
    }
}
