/*!
 * Synchronization Primitives
 *
 * Shared counter strategies compared by the contention harness:
 * - Exclusive lock (parking_lot `Mutex`)
 * - Read/write lock (parking_lot `RwLock`)
 *
 * # Architecture
 *
 * `LockStrategy` is the capability seam ({read, write}). `SharedCounter`
 * owns one counter of either discipline. `SectionProbe` hooks run inside the
 * critical section and default to `NoProbe`.
 *
 * The `CompletionLatch` is the counting barrier a repetition joins on.
 */

mod config;
mod counter;
mod latch;
mod locks;
mod probe;
mod traits;

pub use config::LockKind;
pub use counter::SharedCounter;
pub use latch::{CompletionLatch, LatchGuard, LatchOutcome};
pub use locks::{ExclusiveLock, RwCounter};
pub use probe::{OccupancyProbe, OccupancySnapshot};
pub use traits::{Access, LockStrategy, NoProbe, SectionProbe};
