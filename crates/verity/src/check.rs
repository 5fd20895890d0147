//! The checks shared by [`assert`][crate::assert] and
//! [`require`][crate::require], parameterized over the [`Severity`] of their
//! failures.

use core::any::Any;
use core::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;

use crate::runtime::{self, Value};
use crate::{Message, Reporter, Severity};

/// Capture a value under test, failing the check if it can't be inspected.
macro_rules! capture {
    ($t:expr, $severity:expr, $value:expr, $options:expr, $message:expr) => {
        match runtime::to_value_with($value, $options) {
            Ok(value) => value,
            Err(error) => {
                return fail(
                    $t,
                    $severity,
                    format!("failed to inspect value: {error}"),
                    $message,
                );
            }
        }
    };
}

/// Something which may hold an error, like a [`Result`] or an optional error.
pub trait MaybeError {
    /// Get the error, if there is one.
    fn as_error(&self) -> Option<&dyn fmt::Display>;
}

impl<T, E> MaybeError for Result<T, E>
where
    E: fmt::Display,
{
    #[inline]
    fn as_error(&self) -> Option<&dyn fmt::Display> {
        match self {
            Ok(..) => None,
            Err(error) => Some(error),
        }
    }
}

impl<E> MaybeError for Option<E>
where
    E: fmt::Display,
{
    #[inline]
    fn as_error(&self) -> Option<&dyn fmt::Display> {
        match self {
            Some(error) => Some(error),
            None => None,
        }
    }
}

/// Report a failure and return `false`.
#[track_caller]
pub(crate) fn fail<R>(t: &R, severity: Severity, failure: String, message: &Message) -> bool
where
    R: ?Sized + Reporter,
{
    let failure = if message.is_empty() {
        failure
    } else {
        format!("{failure}: {message}")
    };

    tracing::debug!(%severity, %failure, "check failed");
    severity.report(t, &failure);
    false
}

/// Record the verdict of a check.
#[inline]
fn verdict(check: &'static str, pass: bool) -> bool {
    tracing::trace!(check, pass);
    pass
}

/// Render the expected and actual side of a comparison, adding type
/// information when they would otherwise look the same.
fn expected_actual(expected: &Value, actual: &Value) -> String {
    let e = format!("{expected:?}");
    let a = format!("{actual:?}");

    if e == a {
        format!(
            "expected: {e} ({})\nactual:   {a} ({})",
            expected.type_info(),
            actual.type_info()
        )
    } else {
        format!("expected: {e}\nactual:   {a}")
    }
}

#[track_caller]
pub(crate) fn equal<R, E, A>(
    t: &R,
    severity: Severity,
    expected: &E,
    actual: &A,
    message: &Message,
) -> bool
where
    R: ?Sized + Reporter,
    E: ?Sized + Serialize,
    A: ?Sized + Serialize,
{
    let options = t.options();
    let expected = capture!(t, severity, expected, &options, message);
    let actual = capture!(t, severity, actual, &options, message);

    if !verdict("equal", Value::eq_with(&expected, &actual, &options)) {
        let failure = format!("not equal:\n{}", expected_actual(&expected, &actual));
        return fail(t, severity, failure, message);
    }

    true
}

#[track_caller]
pub(crate) fn not_equal<R, E, A>(
    t: &R,
    severity: Severity,
    expected: &E,
    actual: &A,
    message: &Message,
) -> bool
where
    R: ?Sized + Reporter,
    E: ?Sized + Serialize,
    A: ?Sized + Serialize,
{
    let options = t.options();
    let expected = capture!(t, severity, expected, &options, message);
    let actual = capture!(t, severity, actual, &options, message);

    if !verdict("not_equal", !Value::eq_with(&expected, &actual, &options)) {
        let failure = format!("should not be equal: {actual:?}");
        return fail(t, severity, failure, message);
    }

    true
}

#[track_caller]
pub(crate) fn nil<R, T>(t: &R, severity: Severity, value: &T, message: &Message) -> bool
where
    R: ?Sized + Reporter,
    T: ?Sized + Serialize,
{
    let options = t.options();
    let value = capture!(t, severity, value, &options, message);

    if !verdict("nil", value.is_absent()) {
        return fail(t, severity, format!("expected nil, got: {value:?}"), message);
    }

    true
}

#[track_caller]
pub(crate) fn not_nil<R, T>(t: &R, severity: Severity, value: &T, message: &Message) -> bool
where
    R: ?Sized + Reporter,
    T: ?Sized + Serialize,
{
    let options = t.options();
    let value = capture!(t, severity, value, &options, message);

    if !verdict("not_nil", !value.is_absent()) {
        return fail(t, severity, String::from("expected not nil"), message);
    }

    true
}

#[track_caller]
pub(crate) fn is_true<R>(t: &R, severity: Severity, value: bool, message: &Message) -> bool
where
    R: ?Sized + Reporter,
{
    if !verdict("is_true", value) {
        return fail(t, severity, String::from("expected true, got false"), message);
    }

    true
}

#[track_caller]
pub(crate) fn is_false<R>(t: &R, severity: Severity, value: bool, message: &Message) -> bool
where
    R: ?Sized + Reporter,
{
    if !verdict("is_false", !value) {
        return fail(t, severity, String::from("expected false, got true"), message);
    }

    true
}

#[track_caller]
pub(crate) fn error<R, E>(t: &R, severity: Severity, err: &E, message: &Message) -> bool
where
    R: ?Sized + Reporter,
    E: ?Sized + MaybeError,
{
    if !verdict("error", err.as_error().is_some()) {
        return fail(t, severity, String::from("expected error, got nil"), message);
    }

    true
}

#[track_caller]
pub(crate) fn no_error<R, E>(t: &R, severity: Severity, err: &E, message: &Message) -> bool
where
    R: ?Sized + Reporter,
    E: ?Sized + MaybeError,
{
    match err.as_error() {
        Some(error) => {
            verdict("no_error", false);
            let failure = format!("expected no error, got: {error}");
            fail(t, severity, failure, message)
        }
        None => verdict("no_error", true),
    }
}

/// Invoke the procedure, and report a failure unless it panics.
///
/// The procedure is always invoked, and any panic it raises is caught here.
#[track_caller]
pub(crate) fn panics<R, F>(t: &R, severity: Severity, f: F, message: &Message) -> bool
where
    R: ?Sized + Reporter,
    F: FnOnce(),
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => {
            verdict("panics", false);
            let failure = String::from("expected panic, but function did not panic");
            fail(t, severity, failure, message)
        }
        Err(payload) => {
            tracing::trace!(payload = ?panic_message(&*payload), "caught panic");
            verdict("panics", true)
        }
    }
}

/// Extract the message of a panic payload, if it has one.
fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        return Some(message);
    }

    payload.downcast_ref::<String>().map(String::as_str)
}

#[track_caller]
pub(crate) fn empty<R, T>(t: &R, severity: Severity, value: &T, message: &Message) -> bool
where
    R: ?Sized + Reporter,
    T: ?Sized + Serialize,
{
    let options = t.options();
    let value = capture!(t, severity, value, &options, message);

    if !verdict("empty", value.is_empty()) {
        return fail(t, severity, format!("expected empty, got: {value:?}"), message);
    }

    true
}

#[track_caller]
pub(crate) fn len<R, T>(
    t: &R,
    severity: Severity,
    value: &T,
    expected: usize,
    message: &Message,
) -> bool
where
    R: ?Sized + Reporter,
    T: ?Sized + Serialize,
{
    let options = t.options();
    let value = capture!(t, severity, value, &options, message);

    let Some(actual) = value.len() else {
        verdict("len", false);

        let failure = format!(
            "length not supported for {} of type `{}`: {value:?}",
            value.category(),
            value.type_info()
        );

        return fail(t, severity, failure, message);
    };

    if !verdict("len", actual == expected) {
        let failure = format!("unexpected length, expected {expected} got {actual}");
        return fail(t, severity, failure, message);
    }

    true
}
