/*!
 * Harness Configuration
 *
 * Runtime configuration for task execution and the benchmark driver
 */

use crate::core::errors::{HarnessError, HarnessResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default stack for task threads; tasks only touch the lock
pub const DEFAULT_TASK_STACK: usize = 64 * 1024;

/// Default task multiplier for the scenario matrix
pub const DEFAULT_SCALE: usize = 100;

/// Default repetitions per scenario for the driver
pub const DEFAULT_REPETITIONS: usize = 5;

/// How the tasks of a repetition are scheduled onto OS threads
///
/// In `Pooled` mode at most `workers` tasks hold the guard at once, so
/// readers can only overlap when there are more workers than one. Measuring
/// read concurrency of K readers needs `Dedicated` or `workers >= K`; the
/// default pool on a single-CPU host runs every read one after another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TaskMode {
    /// Tasks queued and drained by a fixed set of worker threads
    Pooled { workers: usize },
    /// One OS thread per task
    Dedicated,
}

impl TaskMode {
    /// Pooled mode with one worker per available CPU
    pub fn pooled() -> Self {
        TaskMode::Pooled {
            workers: cpu_count(),
        }
    }
}

impl Default for TaskMode {
    fn default() -> Self {
        Self::pooled()
    }
}

/// Harness configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    pub task_mode: TaskMode,
    /// Stack size for every spawned thread
    pub stack_size: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            task_mode: TaskMode::default(),
            stack_size: DEFAULT_TASK_STACK,
        }
    }
}

impl HarnessConfig {
    /// One OS thread per task, the closest match to fire-and-forget tasks
    pub fn dedicated() -> Self {
        Self {
            task_mode: TaskMode::Dedicated,
            ..Default::default()
        }
    }

    /// Fixed worker pool of `workers` threads
    pub fn pooled(workers: usize) -> Self {
        Self {
            task_mode: TaskMode::Pooled { workers },
            ..Default::default()
        }
    }

    pub fn validate(&self) -> HarnessResult<()> {
        if let TaskMode::Pooled { workers: 0 } = self.task_mode {
            return Err(HarnessError::InvalidConfig(
                "pooled mode needs at least one worker".into(),
            ));
        }
        if self.stack_size == 0 {
            return Err(HarnessError::InvalidConfig(
                "stack size must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Report rendering for the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Table,
    /// One JSON report per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Driver configuration assembled from `CONTENTION_*` environment variables
///
/// Environment variables:
/// - CONTENTION_SCALE: task multiplier for the matrix (default: 100)
/// - CONTENTION_REPETITIONS: repetitions per scenario (default: 5)
/// - CONTENTION_TASK_MODE: `pooled` or `dedicated` (default: pooled)
/// - CONTENTION_WORKERS: worker count in pooled mode (default: CPU count)
/// - CONTENTION_OUTPUT: `table` or `json` (default: table)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub harness: HarnessConfig,
    pub scale: usize,
    pub repetitions: usize,
    pub output: OutputFormat,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            harness: HarnessConfig::default(),
            scale: DEFAULT_SCALE,
            repetitions: DEFAULT_REPETITIONS,
            output: OutputFormat::Table,
        }
    }
}

impl DriverConfig {
    /// Read the process environment
    pub fn from_env() -> HarnessResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> HarnessResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(scale) = parse_var(&lookup, "CONTENTION_SCALE")? {
            config.scale = scale;
        }
        if let Some(repetitions) = parse_var(&lookup, "CONTENTION_REPETITIONS")? {
            config.repetitions = repetitions;
        }
        if let Some(output) = parse_var(&lookup, "CONTENTION_OUTPUT")? {
            config.output = output;
        }

        let workers: Option<usize> = parse_var(&lookup, "CONTENTION_WORKERS")?;
        let mode = lookup("CONTENTION_TASK_MODE").map(|v| v.trim().to_ascii_lowercase());
        config.harness.task_mode = match (mode.as_deref(), workers) {
            (Some("dedicated"), _) => TaskMode::Dedicated,
            (None | Some("pooled"), Some(workers)) => TaskMode::Pooled { workers },
            (None | Some("pooled"), None) => TaskMode::pooled(),
            (Some(other), _) => {
                return Err(HarnessError::InvalidConfig(format!(
                    "CONTENTION_TASK_MODE: unknown mode '{}'",
                    other
                )))
            }
        };

        config.harness.validate()?;
        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> HarnessResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| HarnessError::InvalidConfig(format!("{}: {}", key, e))),
    }
}

/// Available CPU count, 8 when undetectable
#[inline]
pub fn cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or_else(|_| {
            tracing::warn!("Failed to detect CPU count, defaulting to 8");
            8
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = DriverConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.scale, DEFAULT_SCALE);
        assert_eq!(config.repetitions, DEFAULT_REPETITIONS);
        assert_eq!(config.output, OutputFormat::Table);
        assert!(matches!(config.harness.task_mode, TaskMode::Pooled { workers } if workers > 0));
    }

    #[test]
    fn test_env_overrides() {
        let config = DriverConfig::from_lookup(lookup(&[
            ("CONTENTION_SCALE", "10"),
            ("CONTENTION_REPETITIONS", "2"),
            ("CONTENTION_WORKERS", "3"),
            ("CONTENTION_OUTPUT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.scale, 10);
        assert_eq!(config.repetitions, 2);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.harness.task_mode, TaskMode::Pooled { workers: 3 });
    }

    #[test]
    fn test_dedicated_mode() {
        let config =
            DriverConfig::from_lookup(lookup(&[("CONTENTION_TASK_MODE", "dedicated")])).unwrap();
        assert_eq!(config.harness.task_mode, TaskMode::Dedicated);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = DriverConfig::from_lookup(lookup(&[("CONTENTION_SCALE", "lots")])).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::InvalidConfig(msg) if msg.contains("CONTENTION_SCALE")
        ));

        let err = DriverConfig::from_lookup(lookup(&[("CONTENTION_WORKERS", "0")])).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidConfig(_)));

        let err =
            DriverConfig::from_lookup(lookup(&[("CONTENTION_TASK_MODE", "green")])).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_stack_size() {
        let config = HarnessConfig {
            stack_size: 0,
            ..HarnessConfig::dedicated()
        };
        assert!(config.validate().is_err());
        assert!(HarnessConfig::pooled(1).validate().is_ok());
    }
}
