//! Reduces attempt outcomes into a [`Report`]

use super::outcome::Outcome;
use crate::models::Report;
use std::time::Duration;

/// Running totals for a load run
#[derive(Debug, Default, Clone)]
pub struct ReportAggregator {
    success: usize,
    cancelled: usize,
    errors: usize,
    success_secs: f64,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one recorded outcome
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success { latency } => {
                self.success += 1;
                self.success_secs += latency.as_secs_f64();
            }
            Outcome::Error => self.errors += 1,
            Outcome::Cancelled => self.cancelled += 1,
        }
    }

    /// Outcomes recorded so far
    pub fn recorded(&self) -> usize {
        self.success + self.cancelled + self.errors
    }

    pub fn finish(self) -> Report {
        Report {
            success: self.success,
            cancelled: self.cancelled,
            errors: self.errors,
            all: self.recorded(),
            avg_response_time: average_response_time(self.success, self.success_secs),
        }
    }
}

impl Extend<Outcome> for ReportAggregator {
    fn extend<I: IntoIterator<Item = Outcome>>(&mut self, outcomes: I) {
        for outcome in outcomes {
            self.record(outcome);
        }
    }
}

impl FromIterator<Outcome> for Report {
    fn from_iter<I: IntoIterator<Item = Outcome>>(outcomes: I) -> Self {
        let mut aggregator = ReportAggregator::new();
        aggregator.extend(outcomes);
        aggregator.finish()
    }
}

/// Mean of the successful latencies rounded to whole seconds; zero without successes
pub fn average_response_time(success: usize, total_secs: f64) -> Duration {
    if success == 0 {
        return Duration::ZERO;
    }

    Duration::from_secs((total_secs / success as f64).round() as u64)
}
