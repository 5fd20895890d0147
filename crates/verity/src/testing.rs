//! A recording [`Reporter`] for testing code built on top of checks.
//!
//! # Examples
//!
//! ```
//! use verity::testing::Recorder;
//! use verity::{assert, require, Severity};
//!
//! let recorder = Recorder::new();
//!
//! let aborted = recorder.run(|t| {
//!     assert::equal(t, &1, &2, ());
//!     require::is_true(t, false, "stop here");
//!     unreachable!();
//! });
//!
//! assert!(aborted);
//! assert_eq!(recorder.errors(), 1);
//! assert_eq!(recorder.fatals(), 1);
//!
//! let reports = recorder.reports();
//! assert_eq!(reports[1].severity, Severity::Fatal);
//! assert_eq!(reports[1].message, "expected true, got false: stop here");
//! ```

use std::panic::{self, AssertUnwindSafe};

use parking_lot::Mutex;

use crate::{Options, Reporter, Severity};

/// A single failure recorded by a [`Recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Report {
    /// The severity the failure was reported with.
    pub severity: Severity,
    /// The full failure message.
    pub message: String,
}

/// The payload a [`Recorder`] unwinds with on fatal failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aborted;

/// A reporter which records every failure instead of failing a test.
///
/// Fatal failures unwind with an [`Aborted`] payload without invoking the
/// panic hook, so they should happen inside of [`Recorder::run`] which stops
/// the unwind.
#[derive(Debug, Default)]
pub struct Recorder {
    options: Options,
    reports: Mutex<Vec<Report>>,
}

impl Recorder {
    /// Construct a recorder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a recorder with the given options.
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            reports: Mutex::new(Vec::new()),
        }
    }

    /// Run the body, stopping it if a fatal failure is reported.
    ///
    /// Returns `true` if the body was aborted. Panics other than the ones
    /// raised by the recorder are propagated.
    pub fn run<F>(&self, body: F) -> bool
    where
        F: FnOnce(&Self),
    {
        match panic::catch_unwind(AssertUnwindSafe(|| body(self))) {
            Ok(()) => false,
            Err(payload) => {
                if payload.is::<Aborted>() {
                    return true;
                }

                panic::resume_unwind(payload)
            }
        }
    }

    /// All failures recorded so far, in the order they were reported.
    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().clone()
    }

    /// The number of non-fatal failures recorded.
    pub fn errors(&self) -> usize {
        self.count(Severity::NonFatal)
    }

    /// The number of fatal failures recorded.
    pub fn fatals(&self) -> usize {
        self.count(Severity::Fatal)
    }

    /// Clear all recorded failures.
    pub fn clear(&self) {
        self.reports.lock().clear();
    }

    fn count(&self, severity: Severity) -> usize {
        self.reports
            .lock()
            .iter()
            .filter(|r| r.severity == severity)
            .count()
    }

    fn record(&self, severity: Severity, message: &str) {
        self.reports.lock().push(Report {
            severity,
            message: message.to_owned(),
        });
    }
}

impl Reporter for Recorder {
    fn error(&self, message: &str) {
        self.record(Severity::NonFatal, message);
    }

    fn fatal(&self, message: &str) {
        self.record(Severity::Fatal, message);
        panic::resume_unwind(Box::new(Aborted));
    }

    fn options(&self) -> Options {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::{Aborted, Recorder};
    use crate::Reporter;

    #[test]
    fn test_run_without_failures() {
        let recorder = Recorder::new();
        assert!(!recorder.run(|t| t.error("soft")));
        assert_eq!(recorder.errors(), 1);
        assert_eq!(recorder.fatals(), 0);

        recorder.clear();
        assert!(recorder.reports().is_empty());
    }

    #[test]
    fn test_fatal_aborts_run() {
        let recorder = Recorder::new();
        let mut reached = false;

        let aborted = recorder.run(|t| {
            t.fatal("hard");
            reached = true;
        });

        assert!(aborted);
        assert!(!reached);
        assert_eq!(recorder.fatals(), 1);
    }

    #[test]
    fn test_foreign_panics_propagate() {
        let recorder = Recorder::new();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            recorder.run(|_| panic!("foreign"));
        }));

        let payload = result.unwrap_err();
        assert!(!payload.is::<Aborted>());
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"foreign"));
    }
}
