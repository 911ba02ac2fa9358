/*!
 * Task Group
 *
 * Structured launch of one repetition's read and write tasks.
 *
 * Every task runs on a scoped thread, so no task can outlive the repetition
 * that launched it. The timer stops only after the completion latch has
 * seen every task finish.
 */

use super::config::{HarnessConfig, TaskMode};
use crate::core::errors::{HarnessError, HarnessResult};
use crate::core::sync::{CompletionLatch, LatchOutcome, LockStrategy};
use crossbeam_queue::SegQueue;
use std::hint::black_box;
use std::iter;
use std::thread::{self, Scope, ScopedJoinHandle};
use std::time::{Duration, Instant};

/// A single lock invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Read,
    Write,
}

impl Task {
    #[inline(always)]
    fn run<S: LockStrategy + ?Sized>(self, strategy: &S) {
        match self {
            Task::Read => {
                black_box(strategy.read());
            }
            Task::Write => strategy.write(),
        }
    }
}

/// Tasks of one repetition: all reads, then all writes
fn plan(reads: usize, writes: usize) -> impl Iterator<Item = Task> {
    iter::repeat(Task::Read)
        .take(reads)
        .chain(iter::repeat(Task::Write).take(writes))
}

/// Launches one repetition's tasks against a strategy and joins them
pub(crate) struct TaskGroup<'a, S: LockStrategy + ?Sized> {
    strategy: &'a S,
    config: &'a HarnessConfig,
}

impl<'a, S: LockStrategy + ?Sized> TaskGroup<'a, S> {
    pub(crate) fn new(strategy: &'a S, config: &'a HarnessConfig) -> Self {
        Self { strategy, config }
    }

    /// Run `reads` + `writes` tasks and return the wall-clock time until
    /// the last one completed
    pub(crate) fn execute(
        &self,
        reads: usize,
        writes: usize,
        repetition: usize,
    ) -> HarnessResult<Duration> {
        let total = reads + writes;
        let latch = CompletionLatch::new(total);
        let queue = SegQueue::new();

        let start = Instant::now();
        if let TaskMode::Pooled { .. } = self.config.task_mode {
            for task in plan(reads, writes) {
                queue.push(task);
            }
        }

        thread::scope(|scope| {
            let (handles, spawn_error) = match self.config.task_mode {
                TaskMode::Pooled { workers } => self.launch_pooled(scope, &queue, &latch, workers),
                TaskMode::Dedicated => self.launch_dedicated(scope, &latch, reads, writes),
            };

            let outcome = latch.wait();
            let elapsed = start.elapsed();

            let mut panicked = None;
            for handle in handles {
                if let Err(payload) = handle.join() {
                    panicked.get_or_insert_with(|| {
                        HarnessError::from_panic(repetition, payload.as_ref())
                    });
                }
            }

            if let Some(err) = spawn_error {
                return Err(err);
            }
            if let Some(err) = panicked {
                return Err(err);
            }
            match outcome {
                LatchOutcome::Completed => Ok(elapsed),
                LatchOutcome::Abandoned => Err(HarnessError::TaskPanicked {
                    repetition,
                    message: "completion latch abandoned".into(),
                }),
            }
        })
    }

    fn launch_pooled<'scope, 'env>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        queue: &'scope SegQueue<Task>,
        latch: &'scope CompletionLatch,
        workers: usize,
    ) -> (Vec<ScopedJoinHandle<'scope, ()>>, Option<HarnessError>)
    where
        'a: 'scope,
    {
        let workers = workers.min(queue.len());
        let mut handles = Vec::with_capacity(workers);
        let strategy = self.strategy;

        for id in 0..workers {
            let spawned = thread::Builder::new()
                .name(format!("contention-worker-{}", id))
                .stack_size(self.config.stack_size)
                .spawn_scoped(scope, move || {
                    while let Some(task) = queue.pop() {
                        let guard = latch.arm();
                        task.run(strategy);
                        guard.complete();
                    }
                });

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    latch.abandon();
                    return (handles, Some(e.into()));
                }
            }
        }

        (handles, None)
    }

    fn launch_dedicated<'scope, 'env>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        latch: &'scope CompletionLatch,
        reads: usize,
        writes: usize,
    ) -> (Vec<ScopedJoinHandle<'scope, ()>>, Option<HarnessError>)
    where
        'a: 'scope,
    {
        let mut handles = Vec::with_capacity(reads + writes);
        let strategy = self.strategy;

        for task in plan(reads, writes) {
            let spawned = thread::Builder::new()
                .stack_size(self.config.stack_size)
                .spawn_scoped(scope, move || {
                    let guard = latch.arm();
                    task.run(strategy);
                    guard.complete();
                });

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    latch.abandon();
                    return (handles, Some(e.into()));
                }
            }
        }

        (handles, None)
    }
}
