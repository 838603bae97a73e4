//! Numeric promotion for mixed scalar operands.
//!
//! Scalars are ranked `Int < BigInt < Real`. Before a binary operation the
//! lower-ranked operand is converted to the rank of the higher one.

use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;

use super::Value;

/// Two scalar operands promoted to a common representation.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarPair {
    Int(i64, i64),
    BigInt(BigInt, BigInt),
    Real(f64, f64),
}

/// Convert a `BigInt` to the nearest `f64`, saturating to infinity.
pub fn big_to_f64(n: &BigInt) -> f64 {
    n.to_f64().unwrap_or(match n.sign() {
        Sign::Minus => f64::NEG_INFINITY,
        _ => f64::INFINITY,
    })
}

fn rank(value: &Value) -> Option<u8> {
    match value {
        Value::Int(_) => Some(0),
        Value::BigInt(_) => Some(1),
        Value::Real(_) => Some(2),
        _ => None,
    }
}

/// Promote two scalars to a common rank. Returns `None` if either is not a scalar.
pub fn promote_pair(a: &Value, b: &Value) -> Option<ScalarPair> {
    let rank = rank(a)?.max(rank(b)?);
    match rank {
        0 => Some(ScalarPair::Int(a.as_int()?, b.as_int()?)),
        1 => Some(ScalarPair::BigInt(a.as_bigint()?, b.as_bigint()?)),
        _ => Some(ScalarPair::Real(a.as_real()?, b.as_real()?)),
    }
}
