/*!
 * Contention Harness
 *
 * Launches concurrent read and write tasks against a lock strategy,
 * joins them on a completion latch and reports elapsed time per repetition.
 */

mod config;
mod group;
mod report;
mod runner;
mod scenario;

pub use config::{
    cpu_count, DriverConfig, HarnessConfig, OutputFormat, TaskMode, DEFAULT_REPETITIONS,
    DEFAULT_SCALE, DEFAULT_TASK_STACK,
};
pub use report::{RepetitionSample, RunReport};
pub use runner::ContentionHarness;
pub use scenario::{Scenario, ScenarioMatrix, WorkloadClass};
