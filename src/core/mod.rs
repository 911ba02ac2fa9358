/*!
 * Core Module
 * Lock strategies, synchronization primitives and error handling
 */

pub mod errors;
pub mod sync;

// Re-export for convenience
pub use errors::*;
