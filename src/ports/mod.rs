//! Ports (trait boundaries) for external collaborators.
//!
//! Engines never talk to a renderer directly. They append to a [`Trace`]
//! and anything that wants to watch the run live implements
//! [`TraceObserver`].
//!
//! [`Trace`]: crate::trace::Trace

pub mod observer;

pub use observer::TraceObserver;
