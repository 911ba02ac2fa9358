/*!
 * Critical-Section Occupancy Probe
 *
 * Records who is inside the guarded section and what they saw, so tests can
 * check serialization and visibility instead of trusting the lock.
 */

use super::traits::{Access, SectionProbe};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Point-in-time view of an `OccupancyProbe`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySnapshot {
    pub reads: u64,
    pub writes: u64,
    /// Highest number of readers inside the section at once
    pub max_concurrent_readers: usize,
    /// Highest number of writers inside the section at once
    pub max_concurrent_writers: usize,
    /// Highest number of tasks of any kind inside the section at once
    pub max_in_section: usize,
    /// Entries that found a conflicting holder already inside
    pub overlapping_entries: u64,
    /// Writes whose result was not previous value + 1
    pub out_of_order_writes: u64,
    /// Reads that saw a value no completed write had produced
    pub unpublished_reads: u64,
    pub max_read_value: u64,
}

impl OccupancySnapshot {
    /// No overlap and no visibility anomaly was recorded
    pub fn is_clean(&self) -> bool {
        self.overlapping_entries == 0
            && self.out_of_order_writes == 0
            && self.unpublished_reads == 0
            && self.max_concurrent_writers <= 1
    }
}

/// Probe counting occupancy of the critical section
///
/// All counters are `SeqCst`. A conflicting pair of entries always sees
/// the other side's increment, so a real overlap is never missed.
#[derive(Debug, Default)]
pub struct OccupancyProbe {
    active_readers: AtomicUsize,
    active_writers: AtomicUsize,
    in_section: AtomicUsize,
    max_readers: AtomicUsize,
    max_writers: AtomicUsize,
    max_in_section: AtomicUsize,
    overlaps: AtomicU64,
    reads: AtomicU64,
    writes: AtomicU64,
    last_write: AtomicU64,
    out_of_order: AtomicU64,
    unpublished: AtomicU64,
    max_read: AtomicU64,
}

impl OccupancyProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> OccupancySnapshot {
        OccupancySnapshot {
            reads: self.reads.load(Ordering::SeqCst),
            writes: self.writes.load(Ordering::SeqCst),
            max_concurrent_readers: self.max_readers.load(Ordering::SeqCst),
            max_concurrent_writers: self.max_writers.load(Ordering::SeqCst),
            max_in_section: self.max_in_section.load(Ordering::SeqCst),
            overlapping_entries: self.overlaps.load(Ordering::SeqCst),
            out_of_order_writes: self.out_of_order.load(Ordering::SeqCst),
            unpublished_reads: self.unpublished.load(Ordering::SeqCst),
            max_read_value: self.max_read.load(Ordering::SeqCst),
        }
    }
}

impl SectionProbe for OccupancyProbe {
    fn enter(&self, access: Access) {
        match access {
            Access::Read => {
                let readers = self.active_readers.fetch_add(1, Ordering::SeqCst) + 1;
                if self.active_writers.load(Ordering::SeqCst) > 0 {
                    self.overlaps.fetch_add(1, Ordering::SeqCst);
                }
                self.max_readers.fetch_max(readers, Ordering::SeqCst);
            }
            Access::Write => {
                let writers = self.active_writers.fetch_add(1, Ordering::SeqCst) + 1;
                if writers > 1 || self.active_readers.load(Ordering::SeqCst) > 0 {
                    self.overlaps.fetch_add(1, Ordering::SeqCst);
                }
                self.max_writers.fetch_max(writers, Ordering::SeqCst);
            }
        }

        let total = self.in_section.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_section.fetch_max(total, Ordering::SeqCst);
    }

    fn exit(&self, access: Access, value: u64) {
        match access {
            Access::Read => {
                self.reads.fetch_add(1, Ordering::SeqCst);
                // last_write is published before the writer releases the guard
                if value > self.last_write.load(Ordering::SeqCst) {
                    self.unpublished.fetch_add(1, Ordering::SeqCst);
                }
                self.max_read.fetch_max(value, Ordering::SeqCst);
                self.active_readers.fetch_sub(1, Ordering::SeqCst);
            }
            Access::Write => {
                self.writes.fetch_add(1, Ordering::SeqCst);
                let previous = self.last_write.swap(value, Ordering::SeqCst);
                if value != previous + 1 {
                    self.out_of_order.fetch_add(1, Ordering::SeqCst);
                }
                self.active_writers.fetch_sub(1, Ordering::SeqCst);
            }
        }

        self.in_section.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_accesses_are_clean() {
        let probe = OccupancyProbe::new();

        for value in 1..=3 {
            probe.enter(Access::Write);
            probe.exit(Access::Write, value);
            probe.enter(Access::Read);
            probe.exit(Access::Read, value);
        }

        let snap = probe.snapshot();
        assert!(snap.is_clean());
        assert_eq!(snap.reads, 3);
        assert_eq!(snap.writes, 3);
        assert_eq!(snap.max_in_section, 1);
        assert_eq!(snap.max_read_value, 3);
    }

    #[test]
    fn test_detects_reader_writer_overlap() {
        let probe = OccupancyProbe::new();

        probe.enter(Access::Read);
        probe.enter(Access::Write);
        probe.exit(Access::Write, 1);
        probe.exit(Access::Read, 0);

        let snap = probe.snapshot();
        assert_eq!(snap.overlapping_entries, 1);
        assert_eq!(snap.max_in_section, 2);
        assert!(!snap.is_clean());
    }

    #[test]
    fn test_concurrent_readers_are_not_overlap() {
        let probe = OccupancyProbe::new();

        probe.enter(Access::Read);
        probe.enter(Access::Read);
        probe.exit(Access::Read, 0);
        probe.exit(Access::Read, 0);

        let snap = probe.snapshot();
        assert_eq!(snap.overlapping_entries, 0);
        assert_eq!(snap.max_concurrent_readers, 2);
        assert!(snap.is_clean());
    }

    #[test]
    fn test_detects_skipped_write() {
        let probe = OccupancyProbe::new();

        probe.enter(Access::Write);
        probe.exit(Access::Write, 2);

        assert_eq!(probe.snapshot().out_of_order_writes, 1);
    }

    #[test]
    fn test_detects_unpublished_read() {
        let probe = OccupancyProbe::new();

        probe.enter(Access::Read);
        probe.exit(Access::Read, 5);

        assert_eq!(probe.snapshot().unpublished_reads, 1);
    }
}
