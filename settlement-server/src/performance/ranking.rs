//! Ranking Engine
//!
//! Orders a cohort by delivery count (descending), then average delivery
//! time (ascending), then courier id. Couriers without finished orders sort
//! after everyone with the same count.

use std::cmp::Ordering;

use super::PeriodMetrics;

/// One cohort member's ranking inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CohortEntry {
    pub courier_id: i64,
    pub delivery_count: i64,
    /// Minutes; `+∞` without finished orders
    pub average_time: f64,
}

impl CohortEntry {
    pub fn from_metrics(courier_id: i64, metrics: &PeriodMetrics) -> Self {
        Self {
            courier_id,
            delivery_count: metrics.delivery_count,
            average_time: if metrics.has_finished_orders() {
                metrics.average_delivery_time
            } else {
                f64::INFINITY
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingResult {
    /// 1-based
    pub position: u32,
    pub cohort_size: u32,
}

fn compare(a: &CohortEntry, b: &CohortEntry) -> Ordering {
    b.delivery_count
        .cmp(&a.delivery_count)
        .then_with(|| a.average_time.total_cmp(&b.average_time))
        .then_with(|| a.courier_id.cmp(&b.courier_id))
}

/// Cohort in ranking order
pub fn sorted(cohort: &[CohortEntry]) -> Vec<CohortEntry> {
    let mut entries = cohort.to_vec();
    entries.sort_by(compare);
    entries
}

/// Position of `me` inside `cohort`
///
/// `me` replaces any cohort entry with the same courier id, or is added.
pub fn rank(me: CohortEntry, cohort: &[CohortEntry]) -> RankingResult {
    let mut entries: Vec<CohortEntry> = cohort
        .iter()
        .filter(|e| e.courier_id != me.courier_id)
        .copied()
        .collect();
    entries.push(me);

    let entries = sorted(&entries);
    let index = entries
        .iter()
        .position(|e| e.courier_id == me.courier_id)
        .unwrap_or(entries.len() - 1);

    RankingResult {
        position: index as u32 + 1,
        cohort_size: entries.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(courier_id: i64, delivery_count: i64, average_time: f64) -> CohortEntry {
        CohortEntry {
            courier_id,
            delivery_count,
            average_time,
        }
    }

    fn example_cohort() -> Vec<CohortEntry> {
        vec![entry(1, 10, 20.0), entry(2, 10, 15.0), entry(3, 5, 30.0)]
    }

    #[test]
    fn test_count_then_time() {
        let cohort = example_cohort();
        assert_eq!(rank(cohort[1], &cohort).position, 1);
        assert_eq!(rank(cohort[0], &cohort).position, 2);
        assert_eq!(
            rank(cohort[2], &cohort),
            RankingResult {
                position: 3,
                cohort_size: 3
            }
        );
    }

    #[test]
    fn test_positions_are_a_permutation() {
        let cohort = vec![
            entry(4, 3, f64::INFINITY),
            entry(1, 3, 12.0),
            entry(7, 0, f64::INFINITY),
            entry(2, 3, 12.0),
            entry(9, 8, 40.0),
        ];
        let mut positions: Vec<u32> = cohort.iter().map(|e| rank(*e, &cohort).position).collect();
        positions.sort_unstable();
        assert_eq!(positions, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_courier_is_added_when_missing() {
        let cohort = example_cohort();
        let result = rank(entry(42, 11, 50.0), &cohort);
        assert_eq!(result.position, 1);
        assert_eq!(result.cohort_size, 4);
    }

    #[test]
    fn test_no_finished_orders_sorts_last_within_count() {
        let metrics = PeriodMetrics {
            delivery_count: 10,
            ..Default::default()
        };
        let idle = CohortEntry::from_metrics(5, &metrics);
        assert!(idle.average_time.is_infinite());

        let cohort = example_cohort();
        assert_eq!(rank(idle, &cohort).position, 3);
    }

    #[test]
    fn test_tie_broken_by_courier_id() {
        let cohort = vec![entry(8, 4, 10.0), entry(3, 4, 10.0)];
        assert_eq!(rank(cohort[1], &cohort).position, 1);
        assert_eq!(rank(cohort[0], &cohort).position, 2);
    }
}
