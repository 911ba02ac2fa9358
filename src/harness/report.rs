/*!
 * Run Reports
 * Per-repetition timings and derived throughput
 */

use super::scenario::Scenario;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Timing of one repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepetitionSample {
    pub index: usize,
    pub elapsed: Duration,
    pub reads: usize,
    pub writes: usize,
}

impl RepetitionSample {
    pub fn tasks(&self) -> usize {
        self.reads + self.writes
    }
}

/// Outcome of one scenario against one strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub strategy: String,
    pub scenario: Scenario,
    pub samples: Vec<RepetitionSample>,
    /// Counter value after the last repetition joined
    pub final_count: u64,
}

impl RunReport {
    pub fn new(strategy: impl Into<String>, scenario: Scenario) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            strategy: strategy.into(),
            samples: Vec::with_capacity(scenario.repetitions),
            scenario,
            final_count: 0,
        }
    }

    pub fn total_elapsed(&self) -> Duration {
        self.samples.iter().map(|s| s.elapsed).sum()
    }

    pub fn mean_elapsed(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        self.total_elapsed() / self.samples.len() as u32
    }

    pub fn min_elapsed(&self) -> Option<Duration> {
        self.samples.iter().map(|s| s.elapsed).min()
    }

    pub fn max_elapsed(&self) -> Option<Duration> {
        self.samples.iter().map(|s| s.elapsed).max()
    }

    /// Completed lock operations per second across all repetitions
    pub fn ops_per_sec(&self) -> f64 {
        let secs = self.total_elapsed().as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        let ops: usize = self.samples.iter().map(|s| s.tasks()).sum();
        ops as f64 / secs
    }

    /// Final counter matches writes × repetitions
    pub fn is_consistent(&self) -> bool {
        self.final_count == self.scenario.expected_count()
    }

    /// One aligned table row
    pub fn summary_line(&self) -> String {
        format!(
            "{:<12} {:<8} {:>8} {:>8} {:>5} {:>12.3?} {:>12.3?} {:>12.3?} {:>14.0}",
            self.scenario.name,
            self.strategy,
            self.scenario.reads,
            self.scenario.writes,
            self.samples.len(),
            self.mean_elapsed(),
            self.min_elapsed().unwrap_or_default(),
            self.max_elapsed().unwrap_or_default(),
            self.ops_per_sec(),
        )
    }

    pub fn table_header() -> String {
        format!(
            "{:<12} {:<8} {:>8} {:>8} {:>5} {:>12} {:>12} {:>12} {:>14}",
            "scenario", "lock", "reads", "writes", "reps", "mean", "min", "max", "ops/sec"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn report_with(elapsed_ms: &[u64]) -> RunReport {
        let mut report = RunReport::new("mutex", Scenario::new("t", 90, 10, elapsed_ms.len()));
        for (index, ms) in elapsed_ms.iter().enumerate() {
            report.samples.push(RepetitionSample {
                index,
                elapsed: Duration::from_millis(*ms),
                reads: 90,
                writes: 10,
            });
        }
        report
    }

    #[test]
    fn test_statistics() {
        let report = report_with(&[10, 20, 30]);
        assert_eq!(report.total_elapsed(), Duration::from_millis(60));
        assert_eq!(report.mean_elapsed(), Duration::from_millis(20));
        assert_eq!(report.min_elapsed(), Some(Duration::from_millis(10)));
        assert_eq!(report.max_elapsed(), Some(Duration::from_millis(30)));
        // 300 ops in 60ms
        assert!((report.ops_per_sec() - 5_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_report() {
        let report = report_with(&[]);
        assert_eq!(report.mean_elapsed(), Duration::ZERO);
        assert_eq!(report.min_elapsed(), None);
        assert_eq!(report.ops_per_sec(), 0.0);
    }

    #[test]
    fn test_consistency() {
        let mut report = report_with(&[1, 1]);
        assert!(!report.is_consistent());
        report.final_count = 20;
        assert!(report.is_consistent());
    }

    #[test]
    fn test_json_contains_samples() {
        let report = report_with(&[5]);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["strategy"], "mutex");
        assert_eq!(value["samples"].as_array().map(|a| a.len()), Some(1));
        assert_eq!(value["scenario"]["reads"], 90);
    }
}
