/*!
 * Completion Latch
 *
 * Counting barrier the harness blocks on until every task of a repetition
 * has signalled. Built on parking_lot's `Mutex` + `Condvar`.
 */

use parking_lot::{Condvar, Mutex};

/// Outcome of waiting on a latch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchOutcome {
    /// Every participant counted down
    Completed,
    /// A participant abandoned the latch (panicked or never started)
    Abandoned,
}

#[derive(Debug)]
struct LatchState {
    remaining: usize,
    abandoned: bool,
}

/// Count-down latch
///
/// `wait` returns once the count reaches zero or someone abandons the latch,
/// so a dead task can never leave the harness blocked.
#[derive(Debug)]
pub struct CompletionLatch {
    state: Mutex<LatchState>,
    cond: Condvar,
}

impl CompletionLatch {
    /// Create a latch expecting `count` completions
    pub fn new(count: usize) -> Self {
        Self {
            state: Mutex::new(LatchState {
                remaining: count,
                abandoned: false,
            }),
            cond: Condvar::new(),
        }
    }

    /// Signal one completion
    pub fn count_down(&self) {
        let mut state = self.state.lock();
        state.remaining = state.remaining.saturating_sub(1);
        if state.remaining == 0 {
            self.cond.notify_all();
        }
    }

    /// Release the waiter without reaching zero
    pub fn abandon(&self) {
        let mut state = self.state.lock();
        state.abandoned = true;
        self.cond.notify_all();
    }

    /// Remaining completions
    pub fn remaining(&self) -> usize {
        self.state.lock().remaining
    }

    /// Block until the count reaches zero or the latch is abandoned
    pub fn wait(&self) -> LatchOutcome {
        let mut state = self.state.lock();
        loop {
            if state.abandoned {
                return LatchOutcome::Abandoned;
            }
            if state.remaining == 0 {
                return LatchOutcome::Completed;
            }
            self.cond.wait(&mut state);
        }
    }

    /// Arm a guard that counts down on success and abandons on unwind
    pub fn arm(&self) -> LatchGuard<'_> {
        LatchGuard {
            latch: self,
            done: false,
        }
    }
}

/// Per-task completion guard
///
/// Call `complete` after the task body. Dropping without `complete` (a
/// panic unwinding through the task) abandons the latch.
pub struct LatchGuard<'a> {
    latch: &'a CompletionLatch,
    done: bool,
}

impl LatchGuard<'_> {
    pub fn complete(mut self) {
        self.done = true;
        self.latch.count_down();
    }
}

impl Drop for LatchGuard<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.latch.abandon();
        }
    }
}
