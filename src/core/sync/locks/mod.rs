/*!
 * Lock-Based Counter Strategies
 *
 * The two disciplines under comparison:
 * - Exclusive lock (mutex serializes reads and writes)
 * - Read/write lock (shared readers, exclusive writers)
 */

mod exclusive;
mod rwlock;

// Re-export public API
pub use exclusive::ExclusiveLock;
pub use rwlock::RwCounter;
