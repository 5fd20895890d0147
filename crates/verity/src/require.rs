//! Fatal checks.
//!
//! These are the same checks as in [`assert`][crate::assert], except that a
//! failure is reported through [`Reporter::fatal`], which aborts the current
//! test. Code following a failed check is never reached.
//!
//! # Examples
//!
//! ```
//! use verity::{require, Tester};
//!
//! let t = Tester::new();
//! let parsed = "42".parse::<u32>();
//!
//! require::no_error(&t, &parsed, "input should parse");
//! require::equal(&t, &42u32, &parsed.unwrap(), ());
//! ```

use serde::Serialize;

use crate::check::{self, MaybeError};
use crate::{Message, Reporter, Severity};

/// Require that `expected` and `actual` are structurally equal.
#[track_caller]
pub fn equal<R, E, A>(t: &R, expected: &E, actual: &A, message: impl Into<Message>)
where
    R: ?Sized + Reporter,
    E: ?Sized + Serialize,
    A: ?Sized + Serialize,
{
    check::equal(t, Severity::Fatal, expected, actual, &message.into());
}

/// Require that `expected` and `actual` are not structurally equal.
#[track_caller]
pub fn not_equal<R, E, A>(t: &R, expected: &E, actual: &A, message: impl Into<Message>)
where
    R: ?Sized + Reporter,
    E: ?Sized + Serialize,
    A: ?Sized + Serialize,
{
    check::not_equal(t, Severity::Fatal, expected, actual, &message.into());
}

/// Require that the value is absent.
#[track_caller]
pub fn nil<R, T>(t: &R, value: &T, message: impl Into<Message>)
where
    R: ?Sized + Reporter,
    T: ?Sized + Serialize,
{
    check::nil(t, Severity::Fatal, value, &message.into());
}

/// Require that the value is present.
#[track_caller]
pub fn not_nil<R, T>(t: &R, value: &T, message: impl Into<Message>)
where
    R: ?Sized + Reporter,
    T: ?Sized + Serialize,
{
    check::not_nil(t, Severity::Fatal, value, &message.into());
}

/// Require that the condition holds.
#[track_caller]
pub fn is_true<R>(t: &R, value: bool, message: impl Into<Message>)
where
    R: ?Sized + Reporter,
{
    check::is_true(t, Severity::Fatal, value, &message.into());
}

/// Require that the condition doesn't hold.
#[track_caller]
pub fn is_false<R>(t: &R, value: bool, message: impl Into<Message>)
where
    R: ?Sized + Reporter,
{
    check::is_false(t, Severity::Fatal, value, &message.into());
}

/// Require that an error is present.
#[track_caller]
pub fn error<R, E>(t: &R, err: &E, message: impl Into<Message>)
where
    R: ?Sized + Reporter,
    E: ?Sized + MaybeError,
{
    check::error(t, Severity::Fatal, err, &message.into());
}

/// Require that no error is present.
#[track_caller]
pub fn no_error<R, E>(t: &R, err: &E, message: impl Into<Message>)
where
    R: ?Sized + Reporter,
    E: ?Sized + MaybeError,
{
    check::no_error(t, Severity::Fatal, err, &message.into());
}

/// Require that calling `f` panics.
#[track_caller]
pub fn panics<R, F>(t: &R, f: F, message: impl Into<Message>)
where
    R: ?Sized + Reporter,
    F: FnOnce(),
{
    check::panics(t, Severity::Fatal, f, &message.into());
}

/// Require that the value is empty.
#[track_caller]
pub fn empty<R, T>(t: &R, value: &T, message: impl Into<Message>)
where
    R: ?Sized + Reporter,
    T: ?Sized + Serialize,
{
    check::empty(t, Severity::Fatal, value, &message.into());
}

/// Require that the value has the expected length.
#[track_caller]
pub fn len<R, T>(t: &R, value: &T, expected: usize, message: impl Into<Message>)
where
    R: ?Sized + Reporter,
    T: ?Sized + Serialize,
{
    check::len(t, Severity::Fatal, value, expected, &message.into());
}
