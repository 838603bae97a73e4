//! Literal grammar.
//!
//! ```text
//! integer  := '-'? digit+                    (BigInt when it does not fit i64)
//!           | '-'? ('0x' | '0o' | '0b') radix-digit+
//! real     := '-'? digit* ('.' digit*)? (('e' | 'E') ('+' | '-')? digit+)?
//!             with at least one digit, and a '.' or an exponent
//! vector   := '[' scalar (sep scalar){1,3} ']'          sep := ',' and/or spaces
//! matrix   := '[' row (sep row){N-1} ']'  row := N-component vector, 2 <= N <= 4
//! unit     := '_' (alnum | '_')+              (a name from the unit catalog)
//! ```
//!
//! A token that cannot start any literal is not an error here; the
//! dispatcher goes on to try operators and commands. A token that starts
//! like a literal but is malformed is an error.

use num_bigint::BigInt;
use num_traits::Num;

use crate::error::{Error, Result};
use crate::units;
use crate::value::{FormatTags, Radix, Value};

/// A parsed literal and the tags it was written with.
#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    pub value: Value,
    pub tags: FormatTags,
}

impl Literal {
    fn plain(value: Value) -> Self {
        Self {
            value,
            tags: FormatTags::default(),
        }
    }
}

/// Parse `text` as a literal.
///
/// Returns `Ok(None)` when `text` is not literal syntax at all.
pub fn parse_literal(text: &str) -> Result<Option<Literal>> {
    if text.starts_with('[') {
        return parse_bracketed(text).map(Some);
    }
    if let Some(name) = text.strip_prefix('_') {
        return parse_unit(text, name).map(Some);
    }
    parse_number(text)
}

fn parse_unit(text: &str, name: &str) -> Result<Literal> {
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(Error::parse(text, "unit names are letters, digits, and '_'"));
    }
    if units::lookup(name).is_none() {
        return Err(Error::parse(text, "unknown unit"));
    }
    Ok(Literal::plain(Value::unit(name)))
}

// ============================================================================
// Numbers
// ============================================================================

fn looks_numeric(body: &str) -> bool {
    let mut chars = body.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

fn parse_number(text: &str) -> Result<Option<Literal>> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if !looks_numeric(body) {
        return Ok(None);
    }

    if let Some(radix) = body.get(..2).and_then(Radix::from_prefix) {
        return parse_integer(text, &body[2..], radix, negative).map(Some);
    }
    if body.bytes().all(|b| b.is_ascii_digit()) {
        return parse_integer(text, body, Radix::Decimal, negative).map(Some);
    }
    if is_real(body) {
        let x: f64 = text
            .parse()
            .map_err(|_| Error::parse(text, "malformed real"))?;
        return Ok(Some(Literal::plain(Value::Real(x))));
    }
    Err(Error::parse(text, "malformed number"))
}

fn parse_integer(text: &str, digits: &str, radix: Radix, negative: bool) -> Result<Literal> {
    let base = radix.base();
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(base)) {
        return Err(Error::parse(
            text,
            format!("expected base-{base} digits"),
        ));
    }
    let signed = if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    };
    let value = match i64::from_str_radix(&signed, base) {
        Ok(n) => Value::Int(n),
        Err(_) => BigInt::from_str_radix(&signed, base)
            .map(Value::from)
            .map_err(|_| Error::parse(text, "malformed integer"))?,
    };
    Ok(Literal {
        value,
        tags: FormatTags::default().with_radix(radix),
    })
}

/// Whether `body` (no sign) matches the real grammar.
fn is_real(body: &str) -> bool {
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(at) => (&body[..at], Some(&body[at + 1..])),
        None => (body, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (mantissa, None),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let frac = frac_part.unwrap_or("");
    if !all_digits(int_part) || !all_digits(frac) || (int_part.is_empty() && frac.is_empty()) {
        return false;
    }

    match exponent {
        Some(exp) => {
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !digits.is_empty() && all_digits(digits)
        }
        None => frac_part.is_some(),
    }
}

// ============================================================================
// Vectors and matrices
// ============================================================================

/// Contents of the outermost bracket pair.
fn inner(text: &str) -> Result<&str> {
    text.strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| Error::parse(text, "unbalanced brackets"))
}

fn parse_bracketed(text: &str) -> Result<Literal> {
    let body = inner(text)?.trim();
    if body.starts_with('[') {
        parse_matrix(text, body)
    } else {
        let components = parse_components(text, body)?;
        let value = Value::vector(&components).ok_or_else(|| {
            Error::ShapeMismatch(format!(
                "vectors have 2 to 4 components, '{text}' has {}",
                components.len()
            ))
        })?;
        Ok(Literal::plain(value))
    }
}

fn parse_components(text: &str, body: &str) -> Result<Vec<f64>> {
    body.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| match parse_number(part)? {
            Some(Literal { value, .. }) => value
                .as_real()
                .ok_or_else(|| Error::parse(text, "components must be scalars")),
            None => Err(Error::parse(part, "expected a number")),
        })
        .collect()
}

/// Split `body` into its top-level `[...]` rows.
fn split_rows<'a>(text: &str, body: &'a str) -> Result<Vec<&'a str>> {
    let mut rows = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in body.char_indices() {
        match ch {
            '[' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
                if depth > 1 {
                    return Err(Error::parse(text, "matrices nest at most two levels"));
                }
            }
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::parse(text, "unbalanced ']'"))?;
                if depth == 0 {
                    rows.push(&body[start..=i]);
                }
            }
            c if depth == 0 && c != ',' && !c.is_whitespace() => {
                return Err(Error::parse(text, "matrix rows must be bracketed"));
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(Error::parse(text, "unbalanced '['"));
    }
    Ok(rows)
}

fn parse_matrix(text: &str, body: &str) -> Result<Literal> {
    let rows = split_rows(text, body)?
        .into_iter()
        .map(|row| parse_components(text, inner(row)?))
        .collect::<Result<Vec<Vec<f64>>>>()?;

    let n = rows.len();
    if let Some(bad) = rows.iter().find(|row| row.len() != n) {
        return Err(Error::ShapeMismatch(format!(
            "a {n}-row matrix needs {n} components per row, found a row of {}",
            bad.len()
        )));
    }
    let value = Value::matrix(&rows).ok_or_else(|| {
        Error::ShapeMismatch(format!("matrices are 2x2 to 4x4, '{text}' is {n}x{n}"))
    })?;
    Ok(Literal::plain(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn value(text: &str) -> Value {
        parse_literal(text).unwrap().unwrap().value
    }

    fn kind(text: &str) -> ErrorKind {
        parse_literal(text).unwrap_err().kind()
    }

    #[test]
    fn integers() {
        assert!(matches!(value("42"), Value::Int(42)));
        assert!(matches!(value("-7"), Value::Int(-7)));
        assert!(matches!(value("9223372036854775807"), Value::Int(i64::MAX)));
        assert!(matches!(value("-9223372036854775808"), Value::Int(i64::MIN)));
        assert!(matches!(value("9223372036854775808"), Value::BigInt(_)));
    }

    #[test]
    fn radix_integers_keep_their_tag() {
        let lit = parse_literal("0x1F").unwrap().unwrap();
        assert_eq!(lit.value, Value::int(31));
        assert_eq!(lit.tags.radix, Radix::Hexadecimal);
        assert_eq!(value("-0b101"), Value::int(-5));
        assert_eq!(value("0o17"), Value::int(15));
        assert_eq!(kind("0x"), ErrorKind::Parse);
        assert_eq!(kind("0b102"), ErrorKind::Parse);
    }

    #[test]
    fn reals() {
        assert_eq!(value("1.5"), Value::real(1.5));
        assert_eq!(value("-2."), Value::real(-2.0));
        assert_eq!(value(".5"), Value::real(0.5));
        assert_eq!(value("1e3"), Value::real(1000.0));
        assert_eq!(value("1.25e-07"), Value::real(1.25e-7));
        assert_eq!(value("1e+20"), Value::real(1e20));
        assert!(matches!(value("1e3"), Value::Real(_)));
    }

    #[test]
    fn non_literals_fall_through() {
        for text in ["add", "+", "-", "e", "inf", "nan", "\\clear", "."] {
            assert_eq!(parse_literal(text).unwrap(), None, "{text}");
        }
    }

    #[test]
    fn malformed_numbers_fail() {
        for text in ["1.2.3", "12abc", "1e", "-1e+", "3_000"] {
            assert_eq!(kind(text), ErrorKind::Parse, "{text}");
        }
    }

    #[test]
    fn vectors() {
        assert_eq!(value("[1, 2]"), Value::vec2(1.0, 2.0));
        assert_eq!(value("[1 2.5 -3]"), Value::vec3(1.0, 2.5, -3.0));
        assert_eq!(value("[ 1,2 , 3,4 ]"), Value::vec4(1.0, 2.0, 3.0, 4.0));
        assert_eq!(kind("[1]"), ErrorKind::ShapeMismatch);
        assert_eq!(kind("[1, 2, 3, 4, 5]"), ErrorKind::ShapeMismatch);
        assert_eq!(kind("[1, x]"), ErrorKind::Parse);
        assert_eq!(kind("[1, _m]"), ErrorKind::Parse);
    }

    #[test]
    fn matrices() {
        assert_eq!(
            value("[[1, 2], [3, 4]]"),
            Value::matrix(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap()
        );
        assert_eq!(
            value("[[1 0 0] [0 1 0] [0 0 1]]").type_of(),
            crate::value::Type::Mat3
        );
        assert_eq!(kind("[[1, 2], [3]]"), ErrorKind::ShapeMismatch);
        assert_eq!(kind("[[1, 2, 3], [4, 5, 6]]"), ErrorKind::ShapeMismatch);
        assert_eq!(kind("[[1, 2], 3]"), ErrorKind::Parse);
        assert_eq!(kind("[[[1, 2]], [3, 4]]"), ErrorKind::Parse);
    }

    #[test]
    fn units() {
        assert_eq!(value("_m"), Value::unit("m"));
        assert_eq!(value("_KiB"), Value::unit("KiB"));
        assert_eq!(kind("_"), ErrorKind::Parse);
        assert_eq!(kind("_furlong"), ErrorKind::Parse);
        assert_eq!(kind("_a-b"), ErrorKind::Parse);
    }
}
