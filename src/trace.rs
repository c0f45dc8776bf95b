//! Step trace collection
//!
//! Every engine records a numbered, human-readable account of what it did.
//! The collector is created per run and handed to the engine explicitly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Result, ports::TraceObserver};

/// Display category of a trace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceLevel {
    Info,
    Highlight,
    Success,
    Error,
}

impl fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TraceLevel::Info => "info",
            TraceLevel::Highlight => "highlight",
            TraceLevel::Success => "success",
            TraceLevel::Error => "error",
        };
        f.write_str(label)
    }
}

/// One numbered step of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// 1-based step number
    pub step: usize,
    pub level: TraceLevel,
    pub message: String,
}

/// Collector for the steps of a single run.
#[derive(Default)]
pub struct Trace {
    entries: Vec<TraceEntry>,
    observers: Vec<Box<dyn TraceObserver>>,
}

impl Trace {
    /// Create an empty trace with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an observer that sees every entry as it is recorded.
    pub fn with_observer(mut self, observer: Box<dyn TraceObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Append an entry and return its step number.
    pub fn push(&mut self, level: TraceLevel, message: impl Into<String>) -> usize {
        let entry = TraceEntry {
            step: self.entries.len() + 1,
            level,
            message: message.into(),
        };
        tracing::trace!(step = entry.step, level = %entry.level, message = %entry.message);
        for observer in &mut self.observers {
            observer.on_entry(&entry);
        }
        let step = entry.step;
        self.entries.push(entry);
        step
    }

    pub fn info(&mut self, message: impl Into<String>) -> usize {
        self.push(TraceLevel::Info, message)
    }

    pub fn highlight(&mut self, message: impl Into<String>) -> usize {
        self.push(TraceLevel::Highlight, message)
    }

    pub fn success(&mut self, message: impl Into<String>) -> usize {
        self.push(TraceLevel::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> usize {
        self.push(TraceLevel::Error, message)
    }

    /// Entries recorded so far.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run an engine against this trace.
    ///
    /// A failing engine gets its error message appended as the final
    /// `Error`-level entry; the partial trace is kept either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use algoviz::{Error, trace::{Trace, TraceLevel}};
    ///
    /// let run = Trace::new().run(|trace| {
    ///     trace.info("checking input");
    ///     Err::<(), _>(Error::EmptyDataset)
    /// });
    ///
    /// assert!(run.result.is_err());
    /// assert_eq!(run.trace.len(), 2);
    /// assert_eq!(run.trace[1].level, TraceLevel::Error);
    /// assert_eq!(run.trace[1].message, "dataset is empty");
    /// ```
    pub fn run<T, F>(mut self, engine: F) -> Run<T>
    where
        F: FnOnce(&mut Trace) -> Result<T>,
    {
        let result = engine(&mut self);
        if let Err(err) = &result {
            tracing::debug!(error = %err, "run failed");
            self.error(err.to_string());
        }
        for observer in &mut self.observers {
            observer.on_finish(&self.entries);
        }
        Run {
            trace: self.entries,
            result,
        }
    }
}

impl fmt::Debug for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trace")
            .field("entries", &self.entries)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Outcome of one engine invocation: the trace plus the result or error.
#[derive(Debug)]
pub struct Run<T> {
    pub trace: Vec<TraceEntry>,
    pub result: Result<T>,
}

impl<T> Run<T> {
    /// Number of recorded steps.
    pub fn steps(&self) -> usize {
        self.trace.len()
    }

    /// Convert into a serializable report with the error rendered as text.
    pub fn into_report(self) -> Report<T> {
        let (result, error) = match self.result {
            Ok(value) => (Some(value), None),
            Err(err) => (None, Some(err.to_string())),
        };
        Report {
            trace: self.trace,
            result,
            error,
        }
    }
}

/// Serializable form of a [`Run`], used for JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct Report<T> {
    pub trace: Vec<TraceEntry>,
    pub result: Option<T>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn steps_are_numbered_from_one() {
        let mut trace = Trace::new();
        assert_eq!(trace.info("a"), 1);
        assert_eq!(trace.highlight("b"), 2);
        assert_eq!(trace.success("c"), 3);
        let steps: Vec<_> = trace.entries().iter().map(|e| e.step).collect();
        assert_eq!(steps, vec![1, 2, 3]);
    }

    #[test]
    fn successful_run_has_no_error_entry() {
        let run = Trace::new().run(|trace| {
            trace.info("working");
            Ok(7)
        });
        assert_eq!(run.result.unwrap(), 7);
        assert!(run.trace.iter().all(|e| e.level != TraceLevel::Error));
    }

    #[test]
    fn report_carries_error_text() {
        let run: Run<()> = Trace::new().run(|_| Err(Error::ZeroVariance));
        let report = run.into_report();
        assert!(report.result.is_none());
        assert_eq!(
            report.error.as_deref(),
            Some("all x values are equal; the regression slope is undefined")
        );
        assert_eq!(report.trace.len(), 1);
    }

    #[test]
    fn observers_see_every_entry() {
        use std::{cell::RefCell, rc::Rc};

        struct Collect(Rc<RefCell<Vec<usize>>>);
        impl TraceObserver for Collect {
            fn on_entry(&mut self, entry: &TraceEntry) {
                self.0.borrow_mut().push(entry.step);
            }
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let run = Trace::new()
            .with_observer(Box::new(Collect(Rc::clone(&seen))))
            .run(|trace| {
                trace.info("one");
                trace.info("two");
                Ok(())
            });
        assert!(run.result.is_ok());
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }
}
