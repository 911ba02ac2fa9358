/*!
 * Exclusive Lock Strategy
 * One mutex serializes every read and every write
 */

use crate::core::sync::traits::{Access, LockStrategy, NoProbe, SectionProbe};
use parking_lot::Mutex;

/// Counter behind a single `parking_lot::Mutex`
///
/// Baseline discipline: readers queue behind each other exactly like
/// writers, so the read:write mix should not change the cost per operation.
pub struct ExclusiveLock<P: SectionProbe = NoProbe> {
    count: Mutex<u64>,
    probe: P,
}

impl ExclusiveLock<NoProbe> {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self::with_probe(NoProbe)
    }
}

impl Default for ExclusiveLock<NoProbe> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SectionProbe> ExclusiveLock<P> {
    /// Create a counter whose critical sections report to `probe`
    pub fn with_probe(probe: P) -> Self {
        Self {
            count: Mutex::new(0),
            probe,
        }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }
}

impl<P: SectionProbe> LockStrategy for ExclusiveLock<P> {
    #[inline]
    fn write(&self) {
        let mut count = self.count.lock();
        self.probe.enter(Access::Write);
        *count += 1;
        self.probe.exit(Access::Write, *count);
    }

    #[inline]
    fn read(&self) -> u64 {
        let count = self.count.lock();
        self.probe.enter(Access::Read);
        let value = *count;
        self.probe.exit(Access::Read, value);
        value
    }

    fn current(&self) -> u64 {
        *self.count.lock()
    }

    fn name(&self) -> &'static str {
        "mutex"
    }
}
