//! Locale-free value formatting.
//!
//! Reals use the C `%g` general format so that results read the same as the
//! accessibility descriptions, which must be `%.15g` verbatim.

use num_bigint::BigInt;
use num_traits::Signed;

use super::Value;

/// Significant digits used for reals unless a precision tag says otherwise.
pub const DEFAULT_PRECISION: u8 = 15;

/// Radix an integer was entered in, and is displayed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Radix {
    #[default]
    Decimal,
    Hexadecimal,
    Octal,
    Binary,
}

impl Radix {
    pub fn base(self) -> u32 {
        match self {
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
            Radix::Octal => 8,
            Radix::Binary => 2,
        }
    }

    /// Literal prefix (`0x`, `0o`, `0b`); empty for decimal.
    pub fn prefix(self) -> &'static str {
        match self {
            Radix::Decimal => "",
            Radix::Hexadecimal => "0x",
            Radix::Octal => "0o",
            Radix::Binary => "0b",
        }
    }

    /// Radix for a literal prefix.
    pub fn from_prefix(prefix: &str) -> Option<Radix> {
        match prefix {
            "0x" => Some(Radix::Hexadecimal),
            "0o" => Some(Radix::Octal),
            "0b" => Some(Radix::Binary),
            _ => None,
        }
    }
}

/// Formatting options attached to a displayed value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FormatTags {
    /// Radix for integer values.
    pub radix: Radix,
    /// Significant digits for reals (`None` = [`DEFAULT_PRECISION`]).
    pub precision: Option<u8>,
}

impl FormatTags {
    pub fn with_radix(mut self, radix: Radix) -> Self {
        self.radix = radix;
        self
    }

    pub fn with_precision(mut self, precision: Option<u8>) -> Self {
        self.precision = precision;
        self
    }

    /// Fill in unset fields from `fallback`.
    pub fn or(self, fallback: FormatTags) -> Self {
        Self {
            radix: if self.radix == Radix::Decimal {
                fallback.radix
            } else {
                self.radix
            },
            precision: self.precision.or(fallback.precision),
        }
    }

    fn digits(self) -> usize {
        self.precision.unwrap_or(DEFAULT_PRECISION) as usize
    }
}

/// Format `x` like C's `printf("%.*g", precision, x)`.
pub fn format_general(x: f64, precision: usize) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let p = precision.max(1);
    let scientific = format!("{:.*e}", p - 1, x);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= p as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (p as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn format_int(n: i64, radix: Radix) -> String {
    if radix == Radix::Decimal {
        return n.to_string();
    }
    let sign = if n < 0 { "-" } else { "" };
    let magnitude = n.unsigned_abs();
    let digits = match radix {
        Radix::Hexadecimal => format!("{magnitude:X}"),
        Radix::Octal => format!("{magnitude:o}"),
        Radix::Binary => format!("{magnitude:b}"),
        Radix::Decimal => magnitude.to_string(),
    };
    format!("{sign}{}{digits}", radix.prefix())
}

fn format_bigint(n: &BigInt, radix: Radix) -> String {
    if radix == Radix::Decimal {
        return n.to_string();
    }
    let sign = if n.is_negative() { "-" } else { "" };
    let digits = n.abs().to_str_radix(radix.base()).to_uppercase();
    format!("{sign}{}{digits}", radix.prefix())
}

fn join_components(components: &[f64], digits: usize) -> String {
    components
        .iter()
        .map(|c| format_general(*c, digits))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a value with the given tags.
pub fn format_value(value: &Value, tags: FormatTags) -> String {
    let digits = tags.digits();
    match value {
        Value::Int(n) => format_int(*n, tags.radix),
        Value::BigInt(n) => format_bigint(n, tags.radix),
        Value::Real(x) => format_general(*x, digits),
        Value::Vec2(v) => format!("[{}]", join_components(&v.0, digits)),
        Value::Vec3(v) => format!("[{}]", join_components(&v.0, digits)),
        Value::Vec4(v) => format!("[{}]", join_components(&v.0, digits)),
        Value::Mat2(_) | Value::Mat3(_) | Value::Mat4(_) => {
            let rows: Vec<String> = value
                .matrix_rows()
                .unwrap_or_default()
                .into_iter()
                .map(|row| format!("[{}]", join_components(row, digits)))
                .collect();
            format!("[{}]", rows.join(", "))
        }
        Value::Unit(name) => format!("_{name}"),
    }
}

// ============================================================================
// Accessibility descriptions
// ============================================================================

/// Join items as "a, b, and c" (two items: "a, and b").
fn join_with_and(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

fn spoken_components(components: &[f64]) -> String {
    let parts: Vec<String> = components
        .iter()
        .map(|c| format_general(*c, DEFAULT_PRECISION as usize))
        .collect();
    join_with_and(&parts)
}

/// Long-form description of a value for screen readers.
pub fn accessibility_description(value: &Value) -> String {
    match value {
        Value::Int(_) | Value::BigInt(_) | Value::Real(_) | Value::Unit(_) => value.to_string(),
        Value::Vec2(_) | Value::Vec3(_) | Value::Vec4(_) => {
            let components = value.vector_components().unwrap_or_default();
            format!("Vector with components {}", spoken_components(components))
        }
        Value::Mat2(_) | Value::Mat3(_) | Value::Mat4(_) => {
            let rows: Vec<String> = value
                .matrix_rows()
                .unwrap_or_default()
                .into_iter()
                .enumerate()
                .map(|(i, row)| format!("row {} components {}", i + 1, spoken_components(row)))
                .collect();
            format!("Matrix with {}", join_with_and(&rows))
        }
    }
}
