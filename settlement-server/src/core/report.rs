//! Batch run reporting

use serde::Serialize;

/// Result of one courier inside a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum CourierOutcome {
    /// Row computed and written
    Written,
    /// Error or timeout; the batch carried on
    Failed(String),
}

/// Per-courier outcomes of one batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub job: &'static str,
    pub period: String,
    pub outcomes: Vec<(i64, CourierOutcome)>,
}

impl BatchReport {
    pub fn new(job: &'static str, period: impl Into<String>) -> Self {
        Self {
            job,
            period: period.into(),
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, courier_id: i64, outcome: CourierOutcome) {
        self.outcomes.push((courier_id, outcome));
    }

    pub fn processed(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, CourierOutcome::Written))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, CourierOutcome::Failed(_)))
    }

    /// Courier ids that failed
    pub fn failed_ids(&self) -> Vec<i64> {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, CourierOutcome::Failed(_)))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn outcome_of(&self, courier_id: i64) -> Option<&CourierOutcome> {
        self.outcomes
            .iter()
            .find(|(id, _)| *id == courier_id)
            .map(|(_, o)| o)
    }

    pub fn log_summary(&self) {
        tracing::info!(
            job = self.job,
            period = %self.period,
            processed = self.processed(),
            succeeded = self.succeeded(),
            failed = self.failed(),
            "Batch finished"
        );
    }

    fn count(&self, pred: impl Fn(&CourierOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut report = BatchReport::new("performance", "2024-03");
        report.record(1, CourierOutcome::Written);
        report.record(2, CourierOutcome::Failed("boom".into()));
        report.record(4, CourierOutcome::Written);

        assert_eq!(report.processed(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failed_ids(), vec![2]);
        assert_eq!(report.outcome_of(4), Some(&CourierOutcome::Written));
    }
}
