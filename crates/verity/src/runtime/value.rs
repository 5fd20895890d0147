#[cfg(test)]
mod tests;

mod serde;

use core::fmt;

pub(crate) use self::serde::ValueSerializer;

use crate::Options;

/// Apply the given expression to the integer wrapped in any [`Integer`]
/// variant.
macro_rules! with_integer {
    ($integer:expr, $n:ident => $body:expr) => {
        match $integer {
            Integer::I8($n) => $body,
            Integer::I16($n) => $body,
            Integer::I32($n) => $body,
            Integer::I64($n) => $body,
            Integer::I128($n) => $body,
            Integer::U8($n) => $body,
            Integer::U16($n) => $body,
            Integer::U32($n) => $body,
            Integer::U64($n) => $body,
            Integer::U128($n) => $body,
        }
    };
}

/// An integer, tagged with the width it was captured with.
///
/// Two integers of different widths are never structurally equal, so `1i32`
/// and `1i64` compare as different values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integer {
    /// An `i8`.
    I8(i8),
    /// An `i16`.
    I16(i16),
    /// An `i32`.
    I32(i32),
    /// An `i64`.
    I64(i64),
    /// An `i128`.
    I128(i128),
    /// A `u8`.
    U8(u8),
    /// A `u16`.
    U16(u16),
    /// A `u32`.
    U32(u32),
    /// A `u64`.
    U64(u64),
    /// A `u128`.
    U128(u128),
}

impl Integer {
    /// The name of the primitive type this integer was captured from.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::I8(..) => "i8",
            Self::I16(..) => "i16",
            Self::I32(..) => "i32",
            Self::I64(..) => "i64",
            Self::I128(..) => "i128",
            Self::U8(..) => "u8",
            Self::U16(..) => "u16",
            Self::U32(..) => "u32",
            Self::U64(..) => "u64",
            Self::U128(..) => "u128",
        }
    }

    /// Interpret the integer as a unicode scalar value.
    pub(crate) fn to_char(self) -> Option<char> {
        let n = with_integer!(self, n => u32::try_from(n).ok())?;
        char::from_u32(n)
    }

    /// Split the integer into whether it is negative and its magnitude.
    pub(crate) fn sign_magnitude(self) -> (bool, u128) {
        match self {
            Self::I8(n) => (n < 0, n.unsigned_abs().into()),
            Self::I16(n) => (n < 0, n.unsigned_abs().into()),
            Self::I32(n) => (n < 0, n.unsigned_abs().into()),
            Self::I64(n) => (n < 0, n.unsigned_abs().into()),
            Self::I128(n) => (n < 0, n.unsigned_abs()),
            Self::U8(n) => (false, n.into()),
            Self::U16(n) => (false, n.into()),
            Self::U32(n) => (false, n.into()),
            Self::U64(n) => (false, n.into()),
            Self::U128(n) => (false, n),
        }
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_integer!(self, n => fmt::Display::fmt(n, f))
    }
}

/// A floating point number, tagged with its width.
#[derive(Debug, Clone, Copy)]
pub enum Float {
    /// An `f32`.
    F32(f32),
    /// An `f64`.
    F64(f64),
}

impl Float {
    /// The name of the primitive type this float was captured from.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::F32(..) => "f32",
            Self::F64(..) => "f64",
        }
    }

    /// Widen the float into an `f64`.
    pub fn to_f64(self) -> f64 {
        match self {
            Self::F32(n) => f64::from(n),
            Self::F64(n) => n,
        }
    }

    fn eq_with(&self, other: &Self, nan_equal: bool) -> bool {
        match (*self, *other) {
            (Self::F32(a), Self::F32(b)) => a == b || (nan_equal && a.is_nan() && b.is_nan()),
            (Self::F64(a), Self::F64(b)) => a == b || (nan_equal && a.is_nan() && b.is_nan()),
            _ => false,
        }
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F32(n) => fmt::Display::fmt(n, f),
            Self::F64(n) => fmt::Display::fmt(n, f),
        }
    }
}

/// The payload of an enum variant.
#[derive(Clone)]
pub enum VariantData {
    /// A variant without data, like `Ordering::Less`.
    Unit,
    /// A variant wrapping a single value, like `Some(1)` in a custom enum.
    Newtype(Box<Value>),
    /// A variant with multiple unnamed fields.
    Tuple(Vec<Value>),
    /// A variant with named fields.
    Struct(Vec<(&'static str, Value)>),
}

/// An enum variant captured from a value.
#[derive(Clone)]
pub struct Variant {
    /// The name of the enum.
    pub enum_name: &'static str,
    /// The index of the variant in the enum.
    pub index: u32,
    /// The name of the variant.
    pub name: &'static str,
    /// The data of the variant.
    pub data: VariantData,
}

/// The structural category of a [`Value`].
///
/// This is the classification the checks dispatch on. It is derived from the
/// runtime shape of a value and never from its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueCategory {
    /// A sequence of values, like a `Vec`, slice, array or tuple.
    Sequence,
    /// A collection of key-value pairs, like a `HashMap`.
    Map,
    /// A string.
    Text,
    /// An optional value which may be absent.
    Optional,
    /// Anything else: numbers, booleans, characters and records.
    Scalar,
}

impl fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence => write!(f, "sequence"),
            Self::Map => write!(f, "map"),
            Self::Text => write!(f, "string"),
            Self::Optional => write!(f, "option"),
            Self::Scalar => write!(f, "scalar"),
        }
    }
}

/// A dynamic value, captured from anything that implements
/// [`Serialize`][::serde::Serialize] through [`to_value`][crate::runtime::to_value].
#[derive(Clone)]
pub enum Value {
    /// The unit value.
    Unit,
    /// A boolean.
    Bool(bool),
    /// A character.
    Char(char),
    /// An integer.
    Integer(Integer),
    /// A float.
    Float(Float),
    /// A UTF-8 string.
    String(String),
    /// A byte string.
    Bytes(Vec<u8>),
    /// An optional value.
    Option(Option<Box<Value>>),
    /// A sequence of values.
    Vec(Vec<Value>),
    /// Key-value pairs in the order they were captured.
    Map(Vec<(Value, Value)>),
    /// A struct without fields.
    UnitStruct(&'static str),
    /// A struct wrapping a single unnamed value.
    Newtype(&'static str, Box<Value>),
    /// A struct with unnamed fields.
    TupleStruct(&'static str, Vec<Value>),
    /// A struct with named fields.
    Struct(&'static str, Vec<(&'static str, Value)>),
    /// An enum variant.
    Variant(Box<Variant>),
}

impl Value {
    /// Get the structural category of the value.
    ///
    /// Newtype structs take on the category of the value they wrap.
    pub fn category(&self) -> ValueCategory {
        match self {
            Self::Vec(..) | Self::Bytes(..) => ValueCategory::Sequence,
            Self::Map(..) => ValueCategory::Map,
            Self::String(..) => ValueCategory::Text,
            Self::Option(..) => ValueCategory::Optional,
            Self::Newtype(_, value) => value.category(),
            _ => ValueCategory::Scalar,
        }
    }

    /// Test if the value is absent.
    ///
    /// Only an unset optional is absent. The content of a present optional is
    /// not inspected, so `Some(None)` is not absent.
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Option(option) => option.is_none(),
            Self::Newtype(_, value) => matches!(&**value, Self::Option(None)),
            _ => false,
        }
    }

    /// Test if the value is empty.
    ///
    /// Absent values are empty, as are sequences, maps and strings without
    /// elements. A present optional is empty if its content is. Scalars and
    /// records are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Option(None) => true,
            Self::Option(Some(value)) => value.is_empty(),
            Self::Newtype(_, value) => value.is_empty(),
            value => value.len() == Some(0),
        }
    }

    /// The number of elements in the value.
    ///
    /// Strings count their length in bytes, like [`str::len`]. Returns `None`
    /// for any value which isn't a sequence, a map or a string.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Vec(values) => Some(values.len()),
            Self::Bytes(bytes) => Some(bytes.len()),
            Self::Map(entries) => Some(entries.len()),
            Self::String(string) => Some(string.len()),
            Self::Newtype(_, value) => value.len(),
            _ => None,
        }
    }

    /// Test if two values are structurally equal.
    ///
    /// Two NaN floats of the same width compare as equal, so the comparison
    /// is reflexive. Use [`Value::eq_with`] to configure this.
    pub fn structural_eq(&self, other: &Self) -> bool {
        Self::eq_with(self, other, &Options::default())
    }

    /// Test if two values are structurally equal under the given options.
    pub fn eq_with(a: &Self, b: &Self, options: &Options) -> bool {
        match (a.is_absent(), b.is_absent()) {
            (true, true) => return true,
            (false, false) => {}
            _ => return false,
        }

        let nan_equal = options.nan_equal;

        match (a, b) {
            (Self::Unit, Self::Unit) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.eq_with(b, nan_equal),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Bytes(bytes), Self::Vec(values)) | (Self::Vec(values), Self::Bytes(bytes)) => {
                bytes_eq(bytes, values)
            }
            (Self::Vec(a), Self::Vec(b)) => Self::seq_eq_with(a, b, options),
            (Self::Map(a), Self::Map(b)) => Self::map_eq_with(a, b, options),
            (Self::Option(Some(a)), Self::Option(Some(b))) => Self::eq_with(a, b, options),
            (Self::UnitStruct(a), Self::UnitStruct(b)) => a == b,
            (Self::Newtype(a_name, a), Self::Newtype(b_name, b)) => {
                a_name == b_name && Self::eq_with(a, b, options)
            }
            (Self::TupleStruct(a_name, a), Self::TupleStruct(b_name, b)) => {
                a_name == b_name && Self::seq_eq_with(a, b, options)
            }
            (Self::Struct(a_name, a), Self::Struct(b_name, b)) => {
                a_name == b_name && Self::fields_eq_with(a, b, options)
            }
            (Self::Variant(a), Self::Variant(b)) => {
                if a.enum_name != b.enum_name || a.name != b.name {
                    return false;
                }

                match (&a.data, &b.data) {
                    (VariantData::Unit, VariantData::Unit) => true,
                    (VariantData::Newtype(a), VariantData::Newtype(b)) => {
                        Self::eq_with(a, b, options)
                    }
                    (VariantData::Tuple(a), VariantData::Tuple(b)) => {
                        Self::seq_eq_with(a, b, options)
                    }
                    (VariantData::Struct(a), VariantData::Struct(b)) => {
                        Self::fields_eq_with(a, b, options)
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }

    fn seq_eq_with(a: &[Value], b: &[Value], options: &Options) -> bool {
        if a.len() != b.len() {
            return false;
        }

        for (a, b) in a.iter().zip(b.iter()) {
            if !Self::eq_with(a, b, options) {
                return false;
            }
        }

        true
    }

    fn map_eq_with(a: &[(Value, Value)], b: &[(Value, Value)], options: &Options) -> bool {
        if a.len() != b.len() {
            return false;
        }

        for (key, a) in a {
            let Some((_, b)) = b.iter().find(|(k, _)| Self::eq_with(key, k, options)) else {
                return false;
            };

            if !Self::eq_with(a, b, options) {
                return false;
            }
        }

        true
    }

    fn fields_eq_with(
        a: &[(&'static str, Value)],
        b: &[(&'static str, Value)],
        options: &Options,
    ) -> bool {
        if a.len() != b.len() {
            return false;
        }

        for ((a_name, a), (b_name, b)) in a.iter().zip(b.iter()) {
            if a_name != b_name || !Self::eq_with(a, b, options) {
                return false;
            }
        }

        true
    }

    /// Get type information for the value, which can be printed for human
    /// consumption.
    pub fn type_info(&self) -> TypeInfo<'_> {
        TypeInfo { value: self }
    }
}

fn bytes_eq(bytes: &[u8], values: &[Value]) -> bool {
    bytes.len() == values.len()
        && bytes
            .iter()
            .zip(values)
            .all(|(b, value)| matches!(value, Value::Integer(Integer::U8(v)) if v == b))
}

/// Structural equality, with NaN floats comparing equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => write!(f, "()"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Char(c) => write!(f, "{c:?}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => match n {
                Float::F32(n) => write!(f, "{n:?}"),
                Float::F64(n) => write!(f, "{n:?}"),
            },
            Self::String(s) => write!(f, "{s:?}"),
            Self::Bytes(bytes) => write!(f, "b\"{}\"", bytes.escape_ascii()),
            Self::Option(None) => write!(f, "None"),
            Self::Option(Some(value)) => f.debug_tuple("Some").field(value).finish(),
            Self::Vec(values) => f.debug_list().entries(values).finish(),
            Self::Map(entries) => f
                .debug_map()
                .entries(entries.iter().map(|(k, v)| (k, v)))
                .finish(),
            Self::UnitStruct(name) => write!(f, "{name}"),
            Self::Newtype(name, value) => f.debug_tuple(name).field(value).finish(),
            Self::TupleStruct(name, values) => {
                let mut tuple = f.debug_tuple(name);

                for value in values {
                    tuple.field(value);
                }

                tuple.finish()
            }
            Self::Struct(name, fields) => {
                let mut st = f.debug_struct(name);

                for (name, value) in fields {
                    st.field(name, value);
                }

                st.finish()
            }
            Self::Variant(variant) => match &variant.data {
                VariantData::Unit => write!(f, "{}", variant.name),
                VariantData::Newtype(value) => f.debug_tuple(variant.name).field(value).finish(),
                VariantData::Tuple(values) => {
                    let mut tuple = f.debug_tuple(variant.name);

                    for value in values {
                        tuple.field(value);
                    }

                    tuple.finish()
                }
                VariantData::Struct(fields) => {
                    let mut st = f.debug_struct(variant.name);

                    for (name, value) in fields {
                        st.field(name, value);
                    }

                    st.finish()
                }
            },
        }
    }
}

/// Strings and characters display without quotes, everything else displays
/// like its debug representation.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => fmt::Display::fmt(c, f),
            Self::String(s) => f.write_str(s),
            Self::Integer(n) => fmt::Display::fmt(n, f),
            Self::Float(n) => fmt::Display::fmt(n, f),
            value => fmt::Debug::fmt(value, f),
        }
    }
}

/// Type information about a value, that can be printed for human consumption
/// through its [Display][fmt::Display] implementation.
#[derive(Clone, Copy)]
pub struct TypeInfo<'a> {
    value: &'a Value,
}

impl fmt::Display for TypeInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Unit => write!(f, "()"),
            Value::Bool(..) => write!(f, "bool"),
            Value::Char(..) => write!(f, "char"),
            Value::Integer(n) => write!(f, "{}", n.type_name()),
            Value::Float(n) => write!(f, "{}", n.type_name()),
            Value::String(..) => write!(f, "String"),
            Value::Bytes(..) => write!(f, "bytes"),
            Value::Option(..) => write!(f, "Option"),
            Value::Vec(..) => write!(f, "sequence"),
            Value::Map(..) => write!(f, "map"),
            Value::UnitStruct(name)
            | Value::Newtype(name, ..)
            | Value::TupleStruct(name, ..)
            | Value::Struct(name, ..) => write!(f, "struct {name}"),
            Value::Variant(variant) => write!(f, "enum {}", variant.enum_name),
        }
    }
}

impl fmt::Debug for TypeInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
