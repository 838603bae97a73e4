//! Property tests for formatting and re-parsing.

use num_bigint::BigInt;
use proptest::prelude::*;
use rcalc::literal::parse_literal;
use rcalc::{FormatTags, Radix, Type, Value};

fn reparse(text: &str) -> Value {
    match parse_literal(text) {
        Ok(Some(literal)) => literal.value,
        other => panic!("'{text}' did not parse back: {other:?}"),
    }
}

/// Every real inside a scalar, vector, or matrix, row by row.
fn reals(value: &Value) -> Vec<f64> {
    if let Some(components) = value.vector_components() {
        return components.to_vec();
    }
    if let Some(rows) = value.matrix_rows() {
        return rows.concat();
    }
    value.as_real().into_iter().collect()
}

/// Format `value`, parse it back, and check shape and components agree to
/// the 15 significant digits reals are shown with.
///
/// Integral reals display without a fraction and come back as integers,
/// so scalars are compared by value only.
fn assert_round_trip(value: &Value) -> Result<(), TestCaseError> {
    let shown = value.to_string();
    let back = reparse(&shown);
    if value.is_scalar() {
        prop_assert!(back.is_scalar(), "{}", shown);
    } else {
        prop_assert_eq!(back.type_of(), value.type_of(), "{}", shown);
    }
    for (a, b) in reals(value).into_iter().zip(reals(&back)) {
        let tolerance = 1e-14 * a.abs().max(b.abs());
        prop_assert!((a - b).abs() <= tolerance, "{} vs {} in {}", a, b, shown);
    }
    Ok(())
}

fn component() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::ZERO
}

fn square(n: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(component(), n), n)
}

fn radix(index: usize) -> Radix {
    [Radix::Decimal, Radix::Hexadecimal, Radix::Octal, Radix::Binary][index]
}

proptest! {
    #[test]
    fn displayed_reals_reparse_to_same_display(x in prop::num::f64::NORMAL) {
        let shown = Value::real(x).to_string();
        let back = reparse(&shown);
        prop_assert_eq!(back.to_string(), shown);
    }

    #[test]
    fn reals_reparse_within_tolerance(x in component()) {
        assert_round_trip(&Value::real(x))?;
    }

    #[test]
    fn vectors_reparse_within_tolerance(components in prop::collection::vec(component(), 2..=4)) {
        let value = Value::vector(&components).unwrap();
        assert_round_trip(&value)?;
    }

    #[test]
    fn displayed_vectors_reparse_to_same_display(
        a in prop::num::f64::NORMAL,
        b in prop::num::f64::NORMAL,
        c in prop::num::f64::NORMAL,
    ) {
        let shown = Value::vec3(a, b, c).to_string();
        let back = reparse(&shown);
        prop_assert_eq!(back.to_string(), shown);
    }

    #[test]
    fn mat2_reparses_within_tolerance(rows in square(2)) {
        let value = Value::matrix(&rows).unwrap();
        prop_assert_eq!(value.type_of(), Type::Mat2);
        assert_round_trip(&value)?;
    }

    #[test]
    fn mat3_reparses_within_tolerance(rows in square(3)) {
        let value = Value::matrix(&rows).unwrap();
        prop_assert_eq!(value.type_of(), Type::Mat3);
        assert_round_trip(&value)?;
    }

    #[test]
    fn mat4_reparses_within_tolerance(rows in square(4)) {
        let value = Value::matrix(&rows).unwrap();
        prop_assert_eq!(value.type_of(), Type::Mat4);
        assert_round_trip(&value)?;
    }

    #[test]
    fn integers_reparse_exactly_in_every_radix(n in any::<i64>(), index in 0..4usize) {
        let tags = FormatTags::default().with_radix(radix(index));
        let shown = Value::int(n).to_string_with(tags);
        prop_assert_eq!(reparse(&shown), Value::int(n));
    }

    #[test]
    fn bigints_reparse_exactly_in_every_radix(
        high in any::<i64>().prop_filter("needs more than 64 bits", |h| *h != 0 && *h != -1),
        low in any::<u64>(),
        index in 0..4usize,
    ) {
        let n = (BigInt::from(high) << 64u32) + BigInt::from(low);
        let value = Value::bigint(n);
        let tags = FormatTags::default().with_radix(radix(index));
        let shown = value.to_string_with(tags);
        let back = reparse(&shown);
        prop_assert_eq!(back.type_of(), Type::BigInt, "{}", shown);
        prop_assert_eq!(back, value);
    }
}
