/*!
 * Contention Harness
 *
 * Drives repetitions of a scenario against a lock strategy and collects
 * per-repetition wall-clock timings.
 */

use super::config::HarnessConfig;
use super::group::TaskGroup;
use super::report::{RepetitionSample, RunReport};
use super::scenario::{Scenario, ScenarioMatrix};
use crate::core::errors::{HarnessError, HarnessResult};
use crate::core::sync::{LockKind, LockStrategy, SharedCounter};
use std::time::Duration;
use tracing::{debug, info, info_span};

/// Benchmark harness
///
/// # Example
///
/// ```
/// use lock_contention::core::sync::LockKind;
/// use lock_contention::harness::{ContentionHarness, HarnessConfig, Scenario};
///
/// let harness = ContentionHarness::new(HarnessConfig::pooled(4)).unwrap();
/// let report = harness
///     .run_kind(LockKind::ReadWrite, &Scenario::new("demo", 100, 10, 2))
///     .unwrap();
///
/// assert_eq!(report.final_count, 20);
/// assert_eq!(report.samples.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ContentionHarness {
    config: HarnessConfig,
}

impl ContentionHarness {
    pub fn new(config: HarnessConfig) -> HarnessResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Pooled harness with one worker per CPU
    pub fn with_defaults() -> Self {
        Self {
            config: HarnessConfig::default(),
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run a single repetition of `reads` + `writes` tasks
    ///
    /// Reported as repetition 0 in any error.
    pub fn run_repetition<S>(
        &self,
        strategy: &S,
        reads: usize,
        writes: usize,
    ) -> HarnessResult<Duration>
    where
        S: LockStrategy + ?Sized,
    {
        if reads.checked_add(writes).is_none() {
            return Err(HarnessError::InvalidScenario {
                name: "single_repetition".into(),
                reason: "task count overflows".into(),
            });
        }
        TaskGroup::new(strategy, &self.config).execute(reads, writes, 0)
    }

    /// Run every repetition of `scenario` against `strategy`
    ///
    /// The strategy is not reset between repetitions, so the final count is
    /// writes × repetitions on a fresh counter.
    pub fn run<S>(&self, strategy: &S, scenario: &Scenario) -> HarnessResult<RunReport>
    where
        S: LockStrategy + ?Sized,
    {
        scenario.validate()?;

        let span = info_span!(
            "contention_run",
            strategy = strategy.name(),
            scenario = %scenario.name,
            reads = scenario.reads,
            writes = scenario.writes,
        );
        let _enter = span.enter();

        let group = TaskGroup::new(strategy, &self.config);
        let mut report = RunReport::new(strategy.name(), scenario.clone());

        for index in 0..scenario.repetitions {
            let elapsed = group.execute(scenario.reads, scenario.writes, index)?;
            debug!(
                repetition = index,
                elapsed_us = elapsed.as_micros() as u64,
                "Repetition complete"
            );
            report.samples.push(RepetitionSample {
                index,
                elapsed,
                reads: scenario.reads,
                writes: scenario.writes,
            });
        }

        report.final_count = strategy.current();
        info!(
            run_id = %report.run_id,
            mean_us = report.mean_elapsed().as_micros() as u64,
            ops_per_sec = report.ops_per_sec() as u64,
            final_count = report.final_count,
            "Run complete"
        );

        Ok(report)
    }

    /// Run `scenario` against a fresh counter of `kind`
    pub fn run_kind(&self, kind: LockKind, scenario: &Scenario) -> HarnessResult<RunReport> {
        let counter = SharedCounter::new(kind);
        self.run(&counter, scenario)
    }

    /// Run every (kind, scenario) case, stopping at the first failure
    pub fn run_matrix(&self, matrix: &ScenarioMatrix) -> HarnessResult<Vec<RunReport>> {
        info!(cases = matrix.len(), "Running scenario matrix");
        matrix
            .cases()
            .map(|(kind, scenario)| self.run_kind(kind, scenario))
            .collect()
    }
}

impl Default for ContentionHarness {
    fn default() -> Self {
        Self::with_defaults()
    }
}
