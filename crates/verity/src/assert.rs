//! Non-fatal checks.
//!
//! Every check in this module reports a failure through
//! [`Reporter::error`] and returns `false`, so the test keeps running and
//! can react to the outcome. A passing check returns `true` and reports
//! nothing.
//!
//! # Examples
//!
//! ```
//! use verity::{assert, message, Tester};
//!
//! let t = Tester::new();
//! let items = vec!["a", "b"];
//!
//! if assert::len(&t, &items, 2, message!("items %v", items)) {
//!     assert::equal(&t, "a", items[0], ());
//! }
//! ```

use serde::Serialize;

use crate::check::{self, MaybeError};
use crate::{Message, Reporter, Severity};

/// Check that `expected` and `actual` are structurally equal.
///
/// Sequences are compared in order, maps regardless of order, and scalars
/// must have the same type to be equal.
#[track_caller]
pub fn equal<R, E, A>(t: &R, expected: &E, actual: &A, message: impl Into<Message>) -> bool
where
    R: ?Sized + Reporter,
    E: ?Sized + Serialize,
    A: ?Sized + Serialize,
{
    check::equal(t, Severity::NonFatal, expected, actual, &message.into())
}

/// Check that `expected` and `actual` are not structurally equal.
#[track_caller]
pub fn not_equal<R, E, A>(t: &R, expected: &E, actual: &A, message: impl Into<Message>) -> bool
where
    R: ?Sized + Reporter,
    E: ?Sized + Serialize,
    A: ?Sized + Serialize,
{
    check::not_equal(t, Severity::NonFatal, expected, actual, &message.into())
}

/// Check that the value is absent, like `None`.
#[track_caller]
pub fn nil<R, T>(t: &R, value: &T, message: impl Into<Message>) -> bool
where
    R: ?Sized + Reporter,
    T: ?Sized + Serialize,
{
    check::nil(t, Severity::NonFatal, value, &message.into())
}

/// Check that the value is present.
#[track_caller]
pub fn not_nil<R, T>(t: &R, value: &T, message: impl Into<Message>) -> bool
where
    R: ?Sized + Reporter,
    T: ?Sized + Serialize,
{
    check::not_nil(t, Severity::NonFatal, value, &message.into())
}

/// Check that the condition holds.
#[track_caller]
pub fn is_true<R>(t: &R, value: bool, message: impl Into<Message>) -> bool
where
    R: ?Sized + Reporter,
{
    check::is_true(t, Severity::NonFatal, value, &message.into())
}

/// Check that the condition doesn't hold.
#[track_caller]
pub fn is_false<R>(t: &R, value: bool, message: impl Into<Message>) -> bool
where
    R: ?Sized + Reporter,
{
    check::is_false(t, Severity::NonFatal, value, &message.into())
}

/// Check that an error is present.
#[track_caller]
pub fn error<R, E>(t: &R, err: &E, message: impl Into<Message>) -> bool
where
    R: ?Sized + Reporter,
    E: ?Sized + MaybeError,
{
    check::error(t, Severity::NonFatal, err, &message.into())
}

/// Check that no error is present.
#[track_caller]
pub fn no_error<R, E>(t: &R, err: &E, message: impl Into<Message>) -> bool
where
    R: ?Sized + Reporter,
    E: ?Sized + MaybeError,
{
    check::no_error(t, Severity::NonFatal, err, &message.into())
}

/// Check that calling `f` panics.
///
/// The panic is caught and doesn't propagate any further.
#[track_caller]
pub fn panics<R, F>(t: &R, f: F, message: impl Into<Message>) -> bool
where
    R: ?Sized + Reporter,
    F: FnOnce(),
{
    check::panics(t, Severity::NonFatal, f, &message.into())
}

/// Check that the value is empty.
///
/// Absent values, empty sequences, maps and strings are empty, as is a
/// present optional wrapping an empty value.
#[track_caller]
pub fn empty<R, T>(t: &R, value: &T, message: impl Into<Message>) -> bool
where
    R: ?Sized + Reporter,
    T: ?Sized + Serialize,
{
    check::empty(t, Severity::NonFatal, value, &message.into())
}

/// Check that the value has the expected length.
///
/// Only sequences, maps and strings have a length. The length of a string is
/// counted in bytes.
#[track_caller]
pub fn len<R, T>(t: &R, value: &T, expected: usize, message: impl Into<Message>) -> bool
where
    R: ?Sized + Reporter,
    T: ?Sized + Serialize,
{
    check::len(t, Severity::NonFatal, value, expected, &message.into())
}
