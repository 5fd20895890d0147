//! A minimal assertion toolkit for tests.
//!
//! Checks come in two flavors with the same set of operations:
//!
//! * [`assert`], where a failure is reported and the test keeps going. Every
//!   check returns whether it passed.
//! * [`require`], where a failure is reported and the current test is
//!   aborted.
//!
//! Failures are reported to a [`Reporter`], which is the only thing checks
//! depend on. [`Tester`] reports to the built-in test harness, and
//! [`testing::Recorder`] records failures so that code built on top of
//! checks can itself be tested.
//!
//! Values under test are inspected through [`serde::Serialize`], so anything
//! which can be serialized can be compared for structural equality, tested
//! for absence or emptiness, and measured.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//!
//! use verity::{assert, message, require, Tester};
//!
//! let t = Tester::new();
//!
//! let mut stock = HashMap::new();
//! stock.insert("apples", 3);
//! stock.insert("pears", 0);
//!
//! require::len(&t, &stock, 2, ());
//! assert::equal(&t, &Some(3), &stock.get("apples"), message!("stock is %v", stock));
//! assert::nil(&t, &stock.get("plums"), ());
//! assert::panics(&t, || panic!("out of stock"), ());
//! ```
//!
//! Formatting of user messages follows printf conventions, where the first
//! argument is the template:
//!
//! ```
//! use verity::testing::Recorder;
//! use verity::{assert, message};
//!
//! let recorder = Recorder::new();
//! assert::is_true(&recorder, false, message!("attempt %d of %d", 2, 3));
//!
//! let reports = recorder.reports();
//! assert_eq!(reports[0].message, "expected true, got false: attempt 2 of 3");
//! ```

#![deny(missing_docs)]

pub mod assert;
mod check;
mod error;
mod format;
mod message;
mod options;
mod reporter;
pub mod require;
pub mod runtime;
pub mod testing;

pub use self::check::MaybeError;
pub use self::error::ConfigurationError;
pub use self::message::Message;
pub use self::options::Options;
pub use self::reporter::{Reporter, Severity, Tester};
pub use self::runtime::Value;
