/*!
 * Benchmark Scenarios
 *
 * Read/write task mixes and the standard evaluation matrix
 */

use crate::core::errors::{HarnessError, HarnessResult};
use crate::core::sync::LockKind;
use serde::{Deserialize, Serialize};

/// Workload class of the evaluation matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadClass {
    /// Many reads, few writes (favors the read/write lock)
    ReadHeavy,
    /// Few reads, many writes
    WriteHeavy,
    /// Equal mix, the crossover case
    Balanced,
}

impl WorkloadClass {
    pub const ALL: [WorkloadClass; 3] = [
        WorkloadClass::ReadHeavy,
        WorkloadClass::WriteHeavy,
        WorkloadClass::Balanced,
    ];

    /// Unscaled (reads, writes) ratio
    pub const fn base_ratio(self) -> (usize, usize) {
        match self {
            WorkloadClass::ReadHeavy => (1000, 10),
            WorkloadClass::WriteHeavy => (10, 1000),
            WorkloadClass::Balanced => (500, 500),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            WorkloadClass::ReadHeavy => "read_heavy",
            WorkloadClass::WriteHeavy => "write_heavy",
            WorkloadClass::Balanced => "balanced",
        }
    }
}

/// One benchmark configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Read tasks launched per repetition
    pub reads: usize,
    /// Write tasks launched per repetition
    pub writes: usize,
    pub repetitions: usize,
}

impl Scenario {
    pub fn new(name: impl Into<String>, reads: usize, writes: usize, repetitions: usize) -> Self {
        Self {
            name: name.into(),
            reads,
            writes,
            repetitions,
        }
    }

    /// Scenario for `class` with its base ratio multiplied by `scale`
    pub fn for_class(class: WorkloadClass, scale: usize, repetitions: usize) -> Self {
        let (reads, writes) = class.base_ratio();
        Self::new(
            class.name(),
            reads.saturating_mul(scale),
            writes.saturating_mul(scale),
            repetitions,
        )
    }

    /// Tasks launched per repetition
    pub fn tasks_per_repetition(&self) -> usize {
        self.reads + self.writes
    }

    /// Counter value expected once every repetition has joined
    pub fn expected_count(&self) -> u64 {
        (self.writes as u64).saturating_mul(self.repetitions as u64)
    }

    pub fn validate(&self) -> HarnessResult<()> {
        if self.repetitions == 0 {
            return Err(HarnessError::InvalidScenario {
                name: self.name.clone(),
                reason: "repetition count must be at least 1".into(),
            });
        }
        if self.reads.checked_add(self.writes).is_none() {
            return Err(HarnessError::InvalidScenario {
                name: self.name.clone(),
                reason: "task count overflows".into(),
            });
        }
        Ok(())
    }
}

/// Cross product of lock kinds and scenarios
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioMatrix {
    pub kinds: Vec<LockKind>,
    pub scenarios: Vec<Scenario>,
}

impl ScenarioMatrix {
    pub fn new(kinds: Vec<LockKind>, scenarios: Vec<Scenario>) -> Self {
        Self { kinds, scenarios }
    }

    /// Read-heavy, write-heavy and balanced against both disciplines
    pub fn standard(scale: usize, repetitions: usize) -> Self {
        Self::new(
            LockKind::ALL.to_vec(),
            WorkloadClass::ALL
                .iter()
                .map(|class| Scenario::for_class(*class, scale, repetitions))
                .collect(),
        )
    }

    /// (kind, scenario) pairs, each scenario run against every kind in turn
    pub fn cases(&self) -> impl Iterator<Item = (LockKind, &Scenario)> + '_ {
        self.scenarios
            .iter()
            .flat_map(move |scenario| self.kinds.iter().map(move |kind| (*kind, scenario)))
    }

    pub fn len(&self) -> usize {
        self.kinds.len() * self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
