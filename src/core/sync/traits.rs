/*!
 * Lock Strategy Traits
 *
 * Core abstractions for the shared counter and its critical-section hooks.
 *
 * # Design: Trait at the Seam, Enum for Dispatch
 *
 * The harness is generic over `LockStrategy`, so any discipline can be put
 * under test. `SharedCounter` wraps the two built-in disciplines in an enum
 * and implements the same trait without a vtable.
 */

use serde::{Deserialize, Serialize};

/// Kind of access performed inside the critical section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Read,
    Write,
}

/// A shared counter guarded by some concurrency-control discipline
///
/// Both operations block until the guard is acquired and never fail.
///
/// Implementations must:
/// - only mutate the counter while holding the guard exclusively
/// - never expose a partially applied write to a reader
pub trait LockStrategy: Send + Sync {
    /// Acquire exclusive hold, increment the counter by one, release
    fn write(&self);

    /// Acquire the guard in read mode and return the observed value
    ///
    /// Benchmark callers discard the value through `black_box`; the
    /// synchronization is the point.
    fn read(&self) -> u64;

    /// Counter value for reporting, bypassing any probe
    fn current(&self) -> u64;

    /// Short strategy name for logs and reports
    fn name(&self) -> &'static str;
}

/// Hook invoked while the guard is held
///
/// `enter` runs right after acquisition, `exit` right before release with
/// the value the task saw (after the increment, for writes).
pub trait SectionProbe: Send + Sync {
    fn enter(&self, access: Access);

    fn exit(&self, access: Access, value: u64);
}

/// Probe that does nothing (compiles away)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProbe;

impl SectionProbe for NoProbe {
    #[inline(always)]
    fn enter(&self, _access: Access) {}

    #[inline(always)]
    fn exit(&self, _access: Access, _value: u64) {}
}

impl<P: SectionProbe + ?Sized> SectionProbe for &P {
    #[inline(always)]
    fn enter(&self, access: Access) {
        (**self).enter(access)
    }

    #[inline(always)]
    fn exit(&self, access: Access, value: u64) {
        (**self).exit(access, value)
    }
}

impl<P: SectionProbe + ?Sized> SectionProbe for std::sync::Arc<P> {
    #[inline(always)]
    fn enter(&self, access: Access) {
        (**self).enter(access)
    }

    #[inline(always)]
    fn exit(&self, access: Access, value: u64) {
        (**self).exit(access, value)
    }
}

impl<S: LockStrategy + ?Sized> LockStrategy for std::sync::Arc<S> {
    #[inline(always)]
    fn write(&self) {
        (**self).write()
    }

    #[inline(always)]
    fn read(&self) -> u64 {
        (**self).read()
    }

    fn current(&self) -> u64 {
        (**self).current()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
