use core::fmt;
use std::panic::Location;
use std::thread;

use parking_lot::Mutex;

use crate::options::split_options;
use crate::Options;

/// The collaborator which checks report failures to.
///
/// This is the only thing checks depend on, so any test host which can mark
/// a test as failed and abort it can be plugged in. [`Tester`] is the
/// implementation for the built-in test harness.
///
/// Both methods are `#[track_caller]`, so implementations can use
/// [`Location::caller`] to find the line of the check which failed.
pub trait Reporter {
    /// Mark the current test as failed with the given message and continue.
    #[track_caller]
    fn error(&self, message: &str);

    /// Mark the current test as failed with the given message and abort it.
    ///
    /// Implementations are expected to not return, typically by panicking.
    /// If they do return, the check which called it returns as well.
    #[track_caller]
    fn fatal(&self, message: &str);

    /// The options to use when inspecting values.
    fn options(&self) -> Options {
        Options::default()
    }
}

impl<R> Reporter for &R
where
    R: ?Sized + Reporter,
{
    #[inline]
    #[track_caller]
    fn error(&self, message: &str) {
        (**self).error(message)
    }

    #[inline]
    #[track_caller]
    fn fatal(&self, message: &str) {
        (**self).fatal(message)
    }

    #[inline]
    fn options(&self) -> Options {
        (**self).options()
    }
}

/// How a failed check is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The failure is recorded and the test continues.
    NonFatal,
    /// The failure is recorded and the test is aborted.
    Fatal,
}

impl Severity {
    /// Hand the message to the reporter with this severity.
    #[track_caller]
    pub(crate) fn report<R>(self, reporter: &R, message: &str)
    where
        R: ?Sized + Reporter,
    {
        match self {
            Self::NonFatal => reporter.error(message),
            Self::Fatal => reporter.fatal(message),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFatal => write!(f, "non-fatal"),
            Self::Fatal => write!(f, "fatal"),
        }
    }
}

/// A reporter for the built-in test harness.
///
/// Non-fatal failures are printed to stderr along with the location of the
/// check and recorded. Fatal failures panic, which aborts the test. When the
/// tester is dropped it panics if any non-fatal failure was recorded, so a
/// test which only uses non-fatal checks still fails.
///
/// # Examples
///
/// ```
/// use verity::{assert, Tester};
///
/// let t = Tester::new();
/// assert!(assert::equal(&t, &vec![1, 2, 3], &[1, 2, 3], ()));
/// assert!(assert::len(&t, "hello", 5, ()));
/// ```
///
/// ```should_panic
/// use verity::{require, Tester};
///
/// let t = Tester::new();
/// require::empty(&t, &vec![1], "list should be drained");
/// unreachable!();
/// ```
#[derive(Debug, Default)]
pub struct Tester {
    options: Options,
    failures: Mutex<Vec<String>>,
}

impl Tester {
    /// The environment variable consulted by [`Tester::from_env`].
    pub const OPTIONS_VAR: &'static str = "VERITY_OPTIONS";

    /// Construct a tester with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a tester with the given options.
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            failures: Mutex::new(Vec::new()),
        }
    }

    /// Construct a tester configured through the `VERITY_OPTIONS` environment
    /// variable, a comma-separated list of options like `max-depth=32`.
    ///
    /// Options which can't be parsed are ignored with a warning.
    pub fn from_env() -> Self {
        let mut options = Options::default();

        if let Ok(value) = std::env::var(Self::OPTIONS_VAR) {
            for option in split_options(&value) {
                if let Err(error) = options.parse_option(option) {
                    tracing::warn!(var = Self::OPTIONS_VAR, %error, "ignoring option");
                }
            }
        }

        Self::with_options(options)
    }

    /// The number of non-fatal failures recorded so far.
    pub fn failures(&self) -> usize {
        self.failures.lock().len()
    }

    /// Test if any non-fatal failure has been recorded.
    pub fn failed(&self) -> bool {
        self.failures() > 0
    }
}

impl Reporter for Tester {
    #[track_caller]
    fn error(&self, message: &str) {
        let location = Location::caller();
        eprintln!("{}:{}: {}", location.file(), location.line(), message);
        self.failures
            .lock()
            .push(format!("{}:{}: {}", location.file(), location.line(), message));
    }

    #[track_caller]
    fn fatal(&self, message: &str) {
        panic!("{}", message);
    }

    fn options(&self) -> Options {
        self.options
    }
}

impl Drop for Tester {
    fn drop(&mut self) {
        if thread::panicking() {
            return;
        }

        let failures = self.failures.get_mut();

        if failures.is_empty() {
            return;
        }

        panic!(
            "{} check(s) failed:\n{}",
            failures.len(),
            failures.join("\n")
        );
    }
}
