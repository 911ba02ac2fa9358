/*!
 * Read/Write Lock Strategy
 * Readers share the guard, writers hold it alone
 */

use crate::core::sync::traits::{Access, LockStrategy, NoProbe, SectionProbe};
use parking_lot::RwLock;

/// Counter behind a `parking_lot::RwLock`
///
/// # Performance
///
/// - **Read-heavy**: readers proceed in parallel, should beat `ExclusiveLock`
/// - **Write-heavy**: reader bookkeeping is pure overhead
/// - **Fairness**: parking_lot parks new readers once a writer is queued
pub struct RwCounter<P: SectionProbe = NoProbe> {
    count: RwLock<u64>,
    probe: P,
}

impl RwCounter<NoProbe> {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self::with_probe(NoProbe)
    }
}

impl Default for RwCounter<NoProbe> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SectionProbe> RwCounter<P> {
    /// Create a counter whose critical sections report to `probe`
    pub fn with_probe(probe: P) -> Self {
        Self {
            count: RwLock::new(0),
            probe,
        }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }
}

impl<P: SectionProbe> LockStrategy for RwCounter<P> {
    #[inline]
    fn write(&self) {
        let mut count = self.count.write();
        self.probe.enter(Access::Write);
        *count += 1;
        self.probe.exit(Access::Write, *count);
    }

    #[inline]
    fn read(&self) -> u64 {
        let count = self.count.read();
        self.probe.enter(Access::Read);
        let value = *count;
        self.probe.exit(Access::Read, value);
        value
    }

    fn current(&self) -> u64 {
        *self.count.read()
    }

    fn name(&self) -> &'static str {
        "rwlock"
    }
}
