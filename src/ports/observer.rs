//! Observer port - live view of a run's step trace
//!
//! The trace collector forwards every entry to its observers as it is
//! recorded, so a terminal reporter or an exporter can follow the run without
//! the engines knowing about them.

use crate::trace::TraceEntry;

/// Observer trait for watching a traced run.
///
/// # Event Sequence
///
/// 1. `on_entry(entry)` - once per recorded step, in step order
/// 2. `on_finish(entries)` - once, after the engine returned (successfully
///    or not); the final entry is the error message when the run failed
///
/// # Examples
///
/// ```
/// use algoviz::{ports::TraceObserver, trace::{Trace, TraceEntry}};
///
/// struct Counter(usize);
///
/// impl TraceObserver for Counter {
///     fn on_entry(&mut self, _entry: &TraceEntry) {
///         self.0 += 1;
///     }
/// }
///
/// let mut trace = Trace::new().with_observer(Box::new(Counter(0)));
/// trace.info("first step");
/// assert_eq!(trace.len(), 1);
/// ```
pub trait TraceObserver {
    /// Called when an entry is appended to the trace.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_entry(&mut self, _entry: &TraceEntry) {}

    /// Called once when the run completes.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to flush buffered output.
    fn on_finish(&mut self, _entries: &[TraceEntry]) {}
}
