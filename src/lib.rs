/*!
 * Lock Contention Benchmark Library
 * Exclusive vs read/write lock strategies under configurable read:write mixes
 */

pub mod core;
pub mod harness;
pub mod monitoring;

// Re-exports
pub use crate::core::errors::{HarnessError, HarnessResult};
pub use crate::core::sync::{
    ExclusiveLock, LockKind, LockStrategy, OccupancyProbe, RwCounter, SharedCounter,
};
pub use harness::{ContentionHarness, HarnessConfig, RunReport, Scenario, ScenarioMatrix};
pub use monitoring::init_tracing;
