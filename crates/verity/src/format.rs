//! printf-style interpolation of captured values.
//!
//! Supports the verbs `%v %d %s %q %t %x %X %o %b %c %e %E %f %F %g %G` and
//! `%%`, the flags `+ - # 0` and space, as well as a width and a precision.
//! `%v` renders composites like `[a b]`, `map[a:1]` and `{1 2}`, where `%+v`
//! adds field names and `%#v` uses the debug representation instead.
//!
//! Problems are written inline into the output instead of being raised:
//!
//! * `%!d(MISSING)` when there are fewer arguments than verbs.
//! * `%!d(String=hello)` when a verb doesn't apply to its argument.
//! * `%!(EXTRA i32=1, i32=2)` when there are more arguments than verbs.
//! * `%!(NOVERB)` when the template ends in a lone `%`.
//! * `%!(BADWIDTH)` and `%!(BADPREC)` when a width or precision is larger
//!   than [`MAX_NUMBER`]. The directive is then applied without it.

use core::cmp::Ordering;
use core::fmt;
use core::iter::Peekable;
use core::str::Chars;

use crate::runtime::{Float, Integer, Value, VariantData};

/// The largest width or precision accepted in a template.
pub(crate) const MAX_NUMBER: usize = 10_000;

/// A formatting flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum Flag {
    /// `+`, always print a sign for numbers.
    SignPlus = 0b00001,
    /// `-`, pad on the right instead of the left.
    AlignLeft = 0b00010,
    /// `#`, alternate format.
    Alternate = 0b00100,
    /// `0`, pad numbers with leading zeros after the sign.
    SignAwareZeroPad = 0b01000,
    /// ` `, leave a space for the sign of positive numbers.
    SignSpace = 0b10000,
}

/// A set of formatting flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Flags(u8);

impl Flags {
    fn set(&mut self, flag: Flag) {
        self.0 |= flag as u8;
    }

    fn test(self, flag: Flag) -> bool {
        self.0 & flag as u8 != 0
    }
}

/// A single parsed `%` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FormatSpec {
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
    /// The width was out of bounds and has been dropped.
    bad_width: bool,
    /// The precision was out of bounds and has been dropped.
    bad_precision: bool,
    verb: char,
}

impl FormatSpec {
    /// Parse a directive from the characters following a `%`.
    ///
    /// Returns `None` if the input ends before a verb is found.
    fn parse(it: &mut Peekable<Chars<'_>>) -> Option<Self> {
        let mut flags = Flags::default();

        while let Some(c) = it.peek() {
            let flag = match c {
                '+' => Flag::SignPlus,
                '-' => Flag::AlignLeft,
                '#' => Flag::Alternate,
                '0' => Flag::SignAwareZeroPad,
                ' ' => Flag::SignSpace,
                _ => break,
            };

            flags.set(flag);
            it.next();
        }

        let (width, bad_width) = bounded(parse_number(it));

        let (precision, bad_precision) = if it.peek() == Some(&'.') {
            it.next();
            bounded(Some(parse_number(it).unwrap_or_default()))
        } else {
            (None, false)
        };

        Some(Self {
            flags,
            width,
            precision,
            bad_width,
            bad_precision,
            verb: it.next()?,
        })
    }

    /// Render the value according to the verb, without padding.
    ///
    /// Returns the rendered value and whether it is numeric, or `None` if the
    /// verb doesn't apply to the value.
    fn render(&self, value: &Value) -> Option<(String, bool)> {
        let alternate = self.flags.test(Flag::Alternate);

        let rendered = match (self.verb, value) {
            ('v', Value::Integer(n)) => (n.to_string(), true),
            ('v', Value::Float(n)) => (shortest(*n), true),
            ('v', value) if alternate => (format!("{value:?}"), false),
            ('v', value) => (plain(value, self.flags.test(Flag::SignPlus)), false),
            ('d', Value::Integer(n)) => (n.to_string(), true),
            ('s', Value::String(s)) => (self.truncate(s), false),
            ('s', Value::Bytes(bytes)) => (self.truncate(&String::from_utf8_lossy(bytes)), false),
            (
                's',
                Value::Integer(..) | Value::Float(..) | Value::Bool(..) | Value::Char(..),
            ) => return None,
            ('s', value) => (plain(value, false), false),
            ('q', Value::String(s)) => (format!("{s:?}"), false),
            ('q', Value::Char(c)) => (format!("{c:?}"), false),
            ('q', Value::Integer(n)) => (format!("{:?}", n.to_char()?), false),
            ('t', Value::Bool(b)) => (b.to_string(), false),
            ('x' | 'X' | 'o' | 'b', Value::Integer(n)) => (self.radix(*n), true),
            ('x', Value::String(s)) => (hex(s.as_bytes(), false), false),
            ('x', Value::Bytes(b)) => (hex(b, false), false),
            ('X', Value::String(s)) => (hex(s.as_bytes(), true), false),
            ('X', Value::Bytes(b)) => (hex(b, true), false),
            ('c', Value::Integer(n)) => (n.to_char()?.to_string(), false),
            ('c', Value::Char(c)) => (c.to_string(), false),
            ('e' | 'E' | 'f' | 'F' | 'g' | 'G', Value::Float(n)) => {
                if !n.to_f64().is_finite() {
                    return Some((shortest(*n), true));
                }

                let rendered = match self.verb {
                    'e' | 'E' => exponent(n.to_f64(), self.precision.unwrap_or(6)),
                    'f' | 'F' => format!("{:.*}", self.precision.unwrap_or(6), n.to_f64()),
                    _ => general(*n, self.precision),
                };

                if self.verb.is_ascii_uppercase() {
                    (rendered.to_uppercase(), true)
                } else {
                    (rendered, true)
                }
            }
            _ => return None,
        };

        Some(rendered)
    }

    /// Render an integer in the base of the verb, as a sign followed by the
    /// magnitude.
    fn radix(&self, n: Integer) -> String {
        let alternate = self.flags.test(Flag::Alternate);
        let (negative, n) = n.sign_magnitude();

        let digits = match self.verb {
            'x' if alternate => format!("0x{n:x}"),
            'x' => format!("{n:x}"),
            'X' if alternate => format!("0X{n:X}"),
            'X' => format!("{n:X}"),
            'o' if alternate && n != 0 => format!("0{n:o}"),
            'o' => format!("{n:o}"),
            _ => format!("{n:b}"),
        };

        if negative {
            format!("-{digits}")
        } else {
            digits
        }
    }

    fn truncate(&self, s: &str) -> String {
        match self.precision {
            Some(precision) => s.chars().take(precision).collect(),
            None => s.to_owned(),
        }
    }

    /// Write the rendered value, applying sign flags and padding.
    fn write_padded<W>(&self, out: &mut W, rendered: &str, numeric: bool) -> fmt::Result
    where
        W: ?Sized + fmt::Write,
    {
        let (mut sign, digits) = match rendered.strip_prefix('-') {
            Some(digits) if numeric => ("-", digits),
            _ => ("", rendered),
        };

        // `%+v` asks for field names, not signs.
        if numeric && sign.is_empty() && self.verb != 'v' {
            if self.flags.test(Flag::SignPlus) {
                sign = "+";
            } else if self.flags.test(Flag::SignSpace) {
                sign = " ";
            }
        }

        let len = sign.chars().count() + digits.chars().count();
        let fill = self.width.unwrap_or_default().saturating_sub(len);

        if self.flags.test(Flag::AlignLeft) {
            out.write_str(sign)?;
            out.write_str(digits)?;
            write_repeated(out, ' ', fill)?;
        } else if numeric && self.flags.test(Flag::SignAwareZeroPad) {
            out.write_str(sign)?;
            write_repeated(out, '0', fill)?;
            out.write_str(digits)?;
        } else {
            write_repeated(out, ' ', fill)?;
            out.write_str(sign)?;
            out.write_str(digits)?;
        }

        Ok(())
    }
}

/// Interpolate the given arguments into the template.
pub(crate) fn write_format<W>(out: &mut W, template: &str, args: &[Value]) -> fmt::Result
where
    W: ?Sized + fmt::Write,
{
    let mut args = args.iter();
    let mut it = template.chars().peekable();

    while let Some(c) = it.next() {
        if c != '%' {
            out.write_char(c)?;
            continue;
        }

        let Some(spec) = FormatSpec::parse(&mut it) else {
            out.write_str("%!(NOVERB)")?;
            break;
        };

        if spec.bad_width {
            out.write_str("%!(BADWIDTH)")?;
        }

        if spec.bad_precision {
            out.write_str("%!(BADPREC)")?;
        }

        if spec.verb == '%' {
            out.write_char('%')?;
            continue;
        }

        let Some(arg) = args.next() else {
            write!(out, "%!{}(MISSING)", spec.verb)?;
            continue;
        };

        match spec.render(arg) {
            Some((rendered, numeric)) => spec.write_padded(out, &rendered, numeric)?,
            None => write!(
                out,
                "%!{}({}={})",
                spec.verb,
                arg.type_info(),
                plain(arg, false)
            )?,
        }
    }

    let extra = args.as_slice();

    if !extra.is_empty() {
        out.write_str("%!(EXTRA ")?;

        for (n, arg) in extra.iter().enumerate() {
            if n > 0 {
                out.write_str(", ")?;
            }

            write!(out, "{}={}", arg.type_info(), plain(arg, false))?;
        }

        out.write_char(')')?;
    }

    Ok(())
}

/// Interpolate the given arguments into the template, producing a string.
#[cfg(test)]
pub(crate) fn sprintf(template: &str, args: &[Value]) -> String {
    let mut out = String::new();
    // Writing into a string is infallible.
    let _ = write_format(&mut out, template, args);
    out
}

/// Render a value the way `%v` does, with field names if `fields` is set.
fn plain(value: &Value, fields: bool) -> String {
    let mut out = String::new();
    // Writing into a string is infallible.
    let _ = write_plain(&mut out, value, fields);
    out
}

fn write_plain<W>(out: &mut W, value: &Value, fields: bool) -> fmt::Result
where
    W: ?Sized + fmt::Write,
{
    match value {
        Value::Unit | Value::UnitStruct(..) => out.write_str("{}"),
        Value::Float(n) => out.write_str(&shortest(*n)),
        Value::Option(None) => out.write_str("<nil>"),
        Value::Option(Some(value)) | Value::Newtype(_, value) => write_plain(out, value, fields),
        Value::Bytes(bytes) => {
            out.write_char('[')?;

            for (n, b) in bytes.iter().enumerate() {
                if n > 0 {
                    out.write_char(' ')?;
                }

                write!(out, "{b}")?;
            }

            out.write_char(']')
        }
        Value::Vec(values) => {
            out.write_char('[')?;
            write_values(out, values, fields)?;
            out.write_char(']')
        }
        Value::Map(entries) => {
            let mut entries = entries.iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| compare_keys(&a.0, &b.0));

            out.write_str("map[")?;

            for (n, (key, value)) in entries.into_iter().enumerate() {
                if n > 0 {
                    out.write_char(' ')?;
                }

                write_plain(out, key, fields)?;
                out.write_char(':')?;
                write_plain(out, value, fields)?;
            }

            out.write_char(']')
        }
        Value::TupleStruct(_, values) => {
            out.write_char('{')?;
            write_values(out, values, fields)?;
            out.write_char('}')
        }
        Value::Struct(_, values) => write_fields(out, values, fields),
        Value::Variant(variant) => {
            out.write_str(variant.name)?;

            match &variant.data {
                VariantData::Unit => Ok(()),
                VariantData::Newtype(value) => {
                    out.write_char('{')?;
                    write_plain(out, value, fields)?;
                    out.write_char('}')
                }
                VariantData::Tuple(values) => {
                    out.write_char('{')?;
                    write_values(out, values, fields)?;
                    out.write_char('}')
                }
                VariantData::Struct(values) => write_fields(out, values, fields),
            }
        }
        value => write!(out, "{value}"),
    }
}

fn write_values<W>(out: &mut W, values: &[Value], fields: bool) -> fmt::Result
where
    W: ?Sized + fmt::Write,
{
    for (n, value) in values.iter().enumerate() {
        if n > 0 {
            out.write_char(' ')?;
        }

        write_plain(out, value, fields)?;
    }

    Ok(())
}

fn write_fields<W>(out: &mut W, values: &[(&'static str, Value)], fields: bool) -> fmt::Result
where
    W: ?Sized + fmt::Write,
{
    out.write_char('{')?;

    for (n, (name, value)) in values.iter().enumerate() {
        if n > 0 {
            out.write_char(' ')?;
        }

        if fields {
            write!(out, "{name}:")?;
        }

        write_plain(out, value, fields)?;
    }

    out.write_char('}')
}

/// Order map keys, numerically for numbers and by rendering otherwise.
fn compare_keys(a: &Value, b: &Value) -> Ordering {
    fn integer_key(n: &Integer) -> (bool, u128) {
        match n.sign_magnitude() {
            (true, n) => (false, u128::MAX - n),
            (false, n) => (true, n),
        }
    }

    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => integer_key(a).cmp(&integer_key(b)),
        (Value::Float(a), Value::Float(b)) => a.to_f64().total_cmp(&b.to_f64()),
        _ => plain(a, false).cmp(&plain(b, false)),
    }
}

/// Drop out of bounds widths and precisions, flagging that they were there.
fn bounded(number: Option<usize>) -> (Option<usize>, bool) {
    match number {
        Some(n) if n > MAX_NUMBER => (None, true),
        number => (number, false),
    }
}

fn parse_number(it: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut number = None::<usize>;

    while let Some(digit) = it.peek().and_then(|c| c.to_digit(10)) {
        let n = number.unwrap_or_default();
        number = Some(n.saturating_mul(10).saturating_add(digit as usize));
        it.next();
    }

    number
}

fn write_repeated<W>(out: &mut W, c: char, count: usize) -> fmt::Result
where
    W: ?Sized + fmt::Write,
{
    for _ in 0..count {
        out.write_char(c)?;
    }

    Ok(())
}

fn hex(bytes: &[u8], upper: bool) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);

    for b in bytes {
        if upper {
            out.push_str(&format!("{b:02X}"));
        } else {
            out.push_str(&format!("{b:02x}"));
        }
    }

    out
}

/// Attach a signed, two-digit exponent like `e+03` to the mantissa.
fn with_exponent(mantissa: &str, exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
}

/// Split a float formatted with `{:e}` into its mantissa and exponent.
fn split_exponent(formatted: &str) -> Option<(&str, i32)> {
    let (mantissa, exp) = formatted.split_once('e')?;
    Some((mantissa, exp.parse().ok()?))
}

/// Format in scientific notation like `1.500000e+00`.
fn exponent(n: f64, precision: usize) -> String {
    let formatted = format!("{n:.precision$e}");

    match split_exponent(&formatted) {
        Some((mantissa, exp)) => with_exponent(mantissa, exp),
        None => formatted,
    }
}

/// Format with the fewest digits which round trip, in scientific notation
/// for exponents below -4 or from 6 and up.
fn shortest(n: Float) -> String {
    let f = n.to_f64();

    if f.is_nan() {
        return String::from("NaN");
    }

    if f.is_infinite() {
        return String::from(if f > 0.0 { "+Inf" } else { "-Inf" });
    }

    let (scientific, decimal) = match n {
        Float::F32(n) => (format!("{n:e}"), n.to_string()),
        Float::F64(n) => (format!("{n:e}"), n.to_string()),
    };

    match split_exponent(&scientific) {
        Some((mantissa, exp)) if !(-4..6).contains(&exp) => with_exponent(mantissa, exp),
        _ => decimal,
    }
}

/// Format using the shortest of the decimal and scientific notation.
///
/// Without a precision this is the shortest representation which round
/// trips, otherwise the precision is the number of significant digits.
fn general(n: Float, precision: Option<usize>) -> String {
    let Some(precision) = precision else {
        return shortest(n);
    };

    let n = n.to_f64();
    let precision = precision.max(1);

    let formatted = format!("{:.*e}", precision - 1, n);
    let exp = split_exponent(&formatted).map_or(0, |(_, exp)| exp);

    if exp < -4 || exp >= precision as i32 {
        let formatted = exponent(n, precision - 1);

        return match split_exponent(&formatted) {
            Some((mantissa, exp)) => with_exponent(trim_fraction(mantissa), exp),
            None => formatted,
        };
    }

    let decimals = (precision as i32 - 1 - exp).max(0) as usize;
    trim_fraction(&format!("{n:.decimals$}")).to_owned()
}

fn trim_fraction(s: &str) -> &str {
    if !s.contains('.') {
        return s;
    }

    s.trim_end_matches('0').trim_end_matches('.')
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::Serialize;

    use super::sprintf;
    use crate::runtime::{to_value, Value};

    macro_rules! args {
        ($($arg:expr),* $(,)?) => {
            [$(to_value(&$arg).unwrap()),*]
        };
    }

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize)]
    enum Shape {
        Empty,
        Rect { w: u32, h: u32 },
    }

    fn format(template: &str, args: &[Value]) -> String {
        sprintf(template, args)
    }

    #[test]
    fn test_verbs() {
        assert_eq!(format("context %d", &args![7]), "context 7");
        assert_eq!(format("%s and %s", &args!["a", String::from("b")]), "a and b");
        assert_eq!(format("%q", &args!["hi"]), "\"hi\"");
        assert_eq!(format("%t", &args![true]), "true");
        assert_eq!(format("%x %X %#x %#X", &args![255, 255, 255, 255]), "ff FF 0xff 0XFF");
        assert_eq!(format("%o %#o %b", &args![8, 8, 5]), "10 010 101");
        assert_eq!(format("%c", &args![65u8]), "A");
        assert_eq!(format("%x", &args!["hi"]), "6869");
        assert_eq!(format("100%%", &args![]), "100%");
    }

    #[test]
    fn test_negative_radix() {
        assert_eq!(format("%x %o %b", &args![-255, -8, -5]), "-ff -10 -101");
        assert_eq!(format("%X", &args![i64::MIN]), "-8000000000000000");
        assert_eq!(format("%#x", &args![-1i8]), "-0x1");
        assert_eq!(format("[%05x]", &args![-255]), "[-00ff]");
    }

    #[test]
    fn test_floats() {
        assert_eq!(format("%f", &args![1.5]), "1.500000");
        assert_eq!(format("%.2f", &args![3.14159]), "3.14");
        assert_eq!(format("%e", &args![1500.0]), "1.500000e+03");
        assert_eq!(format("%E", &args![0.015]), "1.500000E-02");
        assert_eq!(format("%g", &args![1.5]), "1.5");
        assert_eq!(format("%.3g", &args![3.14159]), "3.14");
        assert_eq!(format("%.2g", &args![123456.0]), "1.2e+05");
        assert_eq!(format("%f", &args![f64::INFINITY]), "+Inf");
    }

    #[test]
    fn test_shortest_floats() {
        assert_eq!(format("%g %v", &args![1e21, 1e21]), "1e+21 1e+21");
        assert_eq!(format("%g %v", &args![1e-5, 1e-5]), "1e-05 1e-05");
        assert_eq!(format("%v %v", &args![100000.0, 1000000.0]), "100000 1e+06");
        assert_eq!(format("%v %v", &args![0.0001, 0.1f32]), "0.0001 0.1");
        assert_eq!(format("%v %v", &args![-2.5e-7, f64::NAN]), "-2.5e-07 NaN");
    }

    #[test]
    fn test_composite_values() {
        assert_eq!(format("%v", &args![vec!["a", "b"]]), "[a b]");
        assert_eq!(format("%v", &args![vec![vec![1, 2], vec![]]]), "[[1 2] []]");
        assert_eq!(format("%v", &args![HashMap::from([("b", 2), ("a", 1)])]), "map[a:1 b:2]");
        assert_eq!(format("%v", &args![HashMap::from([(10, 'x'), (-2, 'y')])]), "map[-2:y 10:x]");
        assert_eq!(format("%v %+v", &args![Point { x: 1, y: 2 }, Point { x: 1, y: 2 }]), "{1 2} {x:1 y:2}");
        assert_eq!(format("%v %v", &args![Some("a"), None::<i32>]), "a <nil>");
        assert_eq!(format("%v %+v", &args![Shape::Empty, Shape::Rect { w: 1, h: 2 }]), "Empty Rect{w:1 h:2}");
        assert_eq!(format("%s", &args![vec!["a"]]), "[a]");
        assert_eq!(format("%+v", &args![5]), "5");
    }

    #[test]
    fn test_padding() {
        assert_eq!(format("[%5d]", &args![42]), "[   42]");
        assert_eq!(format("[%-5d]", &args![42]), "[42   ]");
        assert_eq!(format("[%05d]", &args![-42]), "[-0042]");
        assert_eq!(format("[%+d]", &args![42]), "[+42]");
        assert_eq!(format("[% d]", &args![42]), "[ 42]");
        assert_eq!(format("[%6s]", &args!["ab"]), "[    ab]");
        assert_eq!(format("[%.2s]", &args!["abcdef"]), "[ab]");
    }

    #[test]
    fn test_alternate_value() {
        assert_eq!(format("%v", &args!["a"]), "a");
        assert_eq!(format("%#v", &args!["a"]), "\"a\"");
        assert_eq!(format("%#v", &args![Some(1)]), "Some(1)");
        assert_eq!(format("%#v", &args![vec!["a"]]), "[\"a\"]");
    }

    #[test]
    fn test_out_of_bounds_numbers() {
        assert_eq!(format("%.70000f", &args![1.5]), "%!(BADPREC)1.500000");
        assert_eq!(format("%.70000e", &args![1.5]), "%!(BADPREC)1.500000e+00");
        assert_eq!(format("%.99999999999999999999999g", &args![1.5]), "%!(BADPREC)1.5");
        assert_eq!(format("%4000000000d", &args![42]), "%!(BADWIDTH)42");
        assert_eq!(format("%10001.10001s", &args!["ab"]), "%!(BADWIDTH)%!(BADPREC)ab");
        assert_eq!(format("[%10000d]", &args![1]).len(), 10002);
    }

    #[test]
    fn test_problems_are_inline() {
        assert_eq!(format("%d %d", &args![1]), "1 %!d(MISSING)");
        assert_eq!(format("%d", &args!["hi"]), "%!d(String=hi)");
        assert_eq!(format("%s", &args![1]), "%!s(i32=1)");
        assert_eq!(format("%d", &args![1, 2, "x"]), "1%!(EXTRA i32=2, String=x)");
        assert_eq!(format("%d", &args![1, vec!["a"]]), "1%!(EXTRA sequence=[a])");
        assert_eq!(format("oops %", &args![]), "oops %!(NOVERB)");
        assert_eq!(format("%z", &args![1]), "%!z(i32=1)");
    }
}
