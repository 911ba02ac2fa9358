/*!
 * Monitoring
 * Tracing subscriber setup for the benchmark driver
 */

mod tracer;

pub use tracer::init_tracing;
