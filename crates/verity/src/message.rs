use core::fmt;

use serde::Serialize;

use crate::format;
use crate::runtime::{self, Value};

/// The optional, user-provided part of a failure message.
///
/// A message is appended to the description of a failed check as
/// `"<description>: <message>"`. It can be constructed from:
///
/// * `()`, for no message at all.
/// * A string, which is used verbatim.
/// * [`fmt::Arguments`] through [`format_args!`], which is formatted once.
/// * A list of captured values through the [`message!`][crate::message!]
///   macro, where the first value is a printf-style template and the rest
///   are its arguments.
///
/// # Examples
///
/// ```
/// use verity::{message, Message};
///
/// assert_eq!(message!("context %d", 7).to_string(), "context 7");
/// assert_eq!(Message::from("100%").to_string(), "100%");
/// assert_eq!(Message::from(format_args!("{} + {}", 1, 2)).to_string(), "1 + 2");
/// assert!(Message::from(()).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Message {
    repr: Repr,
}

#[derive(Debug, Clone, Default)]
enum Repr {
    #[default]
    Empty,
    Text(String),
    Args(Vec<Value>),
}

impl Message {
    /// Construct a message from captured values.
    ///
    /// The first value must be a string template. If there is only one value
    /// it is used verbatim, otherwise the remaining values are interpolated
    /// into it.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            repr: Repr::Args(values),
        }
    }

    /// Capture a single message argument.
    ///
    /// If the argument can't be captured, the error is captured in its place
    /// so that it shows up in the rendered message.
    pub fn arg<T>(value: &T) -> Value
    where
        T: ?Sized + Serialize,
    {
        match runtime::to_value(value) {
            Ok(value) => value,
            Err(error) => Value::String(format!("%!(BADARG {error})")),
        }
    }

    /// Test if the message has no content, in which case nothing is appended
    /// to the failure.
    pub fn is_empty(&self) -> bool {
        match &self.repr {
            Repr::Empty => true,
            Repr::Text(..) => false,
            Repr::Args(args) => args.is_empty(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Empty => Ok(()),
            Repr::Text(text) => f.write_str(text),
            Repr::Args(args) => match args.as_slice() {
                [] => Ok(()),
                [Value::String(template)] => f.write_str(template),
                [Value::String(template), args @ ..] => format::write_format(f, template, args),
                [first, ..] => write!(
                    f,
                    "invalid message, first argument must be a string: {first:?}"
                ),
            },
        }
    }
}

impl From<()> for Message {
    #[inline]
    fn from((): ()) -> Self {
        Self::default()
    }
}

impl From<&str> for Message {
    #[inline]
    fn from(text: &str) -> Self {
        Self {
            repr: Repr::Text(text.to_owned()),
        }
    }
}

impl From<String> for Message {
    #[inline]
    fn from(text: String) -> Self {
        Self {
            repr: Repr::Text(text),
        }
    }
}

impl From<fmt::Arguments<'_>> for Message {
    #[inline]
    fn from(args: fmt::Arguments<'_>) -> Self {
        Self {
            repr: Repr::Text(args.to_string()),
        }
    }
}

impl From<Vec<Value>> for Message {
    #[inline]
    fn from(values: Vec<Value>) -> Self {
        Self::from_values(values)
    }
}

/// Construct a [`Message`] from a printf-style template and its arguments.
///
/// Every argument is captured like a value under test, so anything which
/// implements `Serialize` can be interpolated.
///
/// # Examples
///
/// ```
/// use verity::message;
///
/// assert_eq!(message!("%s has %d items", "cart", 3).to_string(), "cart has 3 items");
/// assert_eq!(
///     message!(123).to_string(),
///     "invalid message, first argument must be a string: 123"
/// );
/// ```
#[macro_export]
macro_rules! message {
    ($($arg:expr),+ $(,)?) => {
        $crate::Message::from_values(::std::vec![$($crate::Message::arg(&$arg)),+])
    };
}
