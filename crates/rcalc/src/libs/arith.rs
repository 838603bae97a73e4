//! Arithmetic operations library.
//!
//! Provides arithmetic commands:
//! - ADD (+), SUB (-), MUL (*), DIV (/) (binary, also on vectors and matrices)
//! - IDIV, MOD (%) (floored integer division)
//! - NEG, ABS, INV, SQ, SQRT, SIGN (unary)
//! - POW (^), MIN, MAX (binary)
//!
//! Integer results stay exact. How `Int` overflow is handled depends on the
//! [`IntegerPromotion`] policy in the evaluation context.

use std::cmp::Ordering;

use num_bigint::{BigInt, Sign};
use num_traits::{Signed, ToPrimitive, Zero};

use crate::config::IntegerPromotion;
use crate::error::{Error, Result};
use crate::libs::linalg::{add_shaped, mul_shaped, neg_shaped, scale_shaped, sub_shaped};
use crate::libs::{EvalContext, LibId, Library, Operator, args_n, real_arg};
use crate::value::{ScalarPair, TypeSet, Value, big_to_f64, promote_pair};

/// Arithmetic library ID.
pub const ARITH_LIB: LibId = 1;

const CATEGORY: &str = "Arithmetic";

use TypeSet as T;

const BINARY_SCALAR: &[&[TypeSet]] = &[&[T::SCALAR, T::SCALAR]];
const UNARY_SCALAR: &[&[TypeSet]] = &[&[T::SCALAR]];

/// Arithmetic operations library.
#[derive(Clone, Copy)]
pub struct ArithLib;

impl Library for ArithLib {
    fn id(&self) -> LibId {
        ARITH_LIB
    }

    fn name(&self) -> &'static str {
        "Arithmetic"
    }

    fn operators(&self) -> Vec<Operator> {
        vec![
            Operator::new(
                "add",
                CATEGORY,
                &[
                    &[T::SCALAR, T::SCALAR],
                    &[T::VECTOR, T::VECTOR],
                    &[T::MATRIX, T::MATRIX],
                ],
                add_op,
            )
            .aliases(&["+"])
            .description("Sum of two values")
            .examples(&["3 4 add", "[1, 2] [3, 4] +"]),
            Operator::new(
                "sub",
                CATEGORY,
                &[
                    &[T::SCALAR, T::SCALAR],
                    &[T::VECTOR, T::VECTOR],
                    &[T::MATRIX, T::MATRIX],
                ],
                sub_op,
            )
            .aliases(&["-"])
            .description("Difference of two values")
            .examples(&["10 4 sub"]),
            Operator::new(
                "mul",
                CATEGORY,
                &[
                    &[T::SCALAR, T::SCALAR],
                    &[T::SCALAR, T::VECTOR],
                    &[T::VECTOR, T::SCALAR],
                    &[T::SCALAR, T::MATRIX],
                    &[T::MATRIX, T::SCALAR],
                    &[T::MATRIX, T::MATRIX],
                    &[T::MATRIX, T::VECTOR],
                ],
                mul_op,
            )
            .aliases(&["*"])
            .description("Product of two values")
            .examples(&["6 7 mul", "2 [1, 2, 3] *"]),
            Operator::new(
                "div",
                CATEGORY,
                &[
                    &[T::SCALAR, T::SCALAR],
                    &[T::VECTOR, T::SCALAR],
                    &[T::MATRIX, T::SCALAR],
                ],
                div_op,
            )
            .aliases(&["/"])
            .description("Quotient; exact for integers that divide evenly")
            .examples(&["4 2 div", "5 2 /"]),
            Operator::new("idiv", CATEGORY, BINARY_SCALAR, idiv_op)
                .description("Floored integer division")
                .examples(&["7 2 idiv", "-7 2 idiv"]),
            Operator::new("mod", CATEGORY, BINARY_SCALAR, mod_op)
                .aliases(&["%"])
                .description("Floored remainder")
                .examples(&["7 3 mod", "-7 3 %"]),
            Operator::new(
                "neg",
                CATEGORY,
                &[&[T::SCALAR], &[T::VECTOR], &[T::MATRIX]],
                neg_op,
            )
            .description("Negate")
            .examples(&["5 neg"]),
            Operator::new("abs", CATEGORY, UNARY_SCALAR, abs_op)
                .description("Absolute value")
                .examples(&["-5 abs"]),
            Operator::new("pow", CATEGORY, BINARY_SCALAR, pow_op)
                .aliases(&["^"])
                .description("Raise to a power")
                .examples(&["2 10 pow", "2 0.5 ^"]),
            Operator::new(
                "sq",
                CATEGORY,
                &[&[T::SCALAR], &[T::MATRIX]],
                sq_op,
            )
            .description("Square")
            .examples(&["12 sq"]),
            Operator::new("sqrt", CATEGORY, UNARY_SCALAR, sqrt_op)
                .description("Square root")
                .examples(&["16 sqrt", "2 sqrt"]),
            Operator::new("inv", CATEGORY, UNARY_SCALAR, inv_op)
                .description("Reciprocal")
                .examples(&["4 inv"]),
            Operator::new("min", CATEGORY, BINARY_SCALAR, min_op)
                .description("Smaller of two values")
                .examples(&["3 7 min"]),
            Operator::new("max", CATEGORY, BINARY_SCALAR, max_op)
                .description("Larger of two values")
                .examples(&["3 7 max"]),
            Operator::new("sign", CATEGORY, UNARY_SCALAR, sign_op)
                .description("Sign: -1, 0, or 1")
                .examples(&["-12 sign"]),
        ]
    }
}

// ============================================================================
// Promotion helpers
// ============================================================================

/// Result of an `Int` operation that overflowed, computed exactly.
fn overflowed(op: &str, ctx: &EvalContext, exact: impl FnOnce() -> BigInt) -> Result<Value> {
    match ctx.promotion {
        IntegerPromotion::OnOverflow => Ok(Value::from(exact())),
        IntegerPromotion::Explicit => Err(Error::IntegerOverflow(op.to_string())),
    }
}

/// Magnitude in bits of an integer value, `None` for reals.
fn integer_bits(value: &Value) -> Option<u64> {
    match value {
        Value::Int(n) => Some(u64::from(64 - n.unsigned_abs().leading_zeros())),
        Value::BigInt(n) => Some(n.bits()),
        _ => None,
    }
}

fn scalar_pair(op: &str, a: &Value, b: &Value) -> Result<ScalarPair> {
    promote_pair(a, b).ok_or_else(|| {
        Error::Unreachable(format!(
            "'{op}' received {} and {}",
            a.type_of(),
            b.type_of()
        ))
    })
}

/// Binary scalar operation with exact integer semantics.
fn binary_scalar<Fi, Fb, Fr>(
    op: &str,
    a: &Value,
    b: &Value,
    ctx: &EvalContext,
    int_op: Fi,
    big_op: Fb,
    real_op: Fr,
) -> Result<Value>
where
    Fi: FnOnce(i64, i64) -> Option<i64>,
    Fb: Fn(&BigInt, &BigInt) -> BigInt,
    Fr: FnOnce(f64, f64) -> f64,
{
    match scalar_pair(op, a, b)? {
        ScalarPair::Int(x, y) => match int_op(x, y) {
            Some(n) => Ok(Value::Int(n)),
            None => overflowed(op, ctx, || big_op(&BigInt::from(x), &BigInt::from(y))),
        },
        ScalarPair::BigInt(x, y) => Ok(Value::from(big_op(&x, &y))),
        ScalarPair::Real(x, y) => Ok(Value::Real(real_op(x, y))),
    }
}

fn compare(op: &str, a: &Value, b: &Value) -> Result<Ordering> {
    let ordering = match scalar_pair(op, a, b)? {
        ScalarPair::Int(x, y) => x.cmp(&y),
        ScalarPair::BigInt(x, y) => x.cmp(&y),
        ScalarPair::Real(x, y) => x.total_cmp(&y),
    };
    Ok(ordering)
}

fn check_divisor(divisor: &Value) -> Result<()> {
    if divisor.is_zero_scalar() {
        Err(Error::DivisionByZero)
    } else {
        Ok(())
    }
}

/// Floored quotient and remainder of two `BigInt`s.
fn big_div_floor(x: &BigInt, y: &BigInt) -> (BigInt, BigInt) {
    let mut q = x / y;
    let mut r = x % y;
    if !r.is_zero() && r.sign() != y.sign() {
        q -= 1;
        r += y;
    }
    (q, r)
}

/// Floored quotient and remainder of two `i64`s, `None` on overflow.
fn int_div_floor(x: i64, y: i64) -> Option<(i64, i64)> {
    let q = x.checked_div(y)?;
    let r = x.checked_rem(y)?;
    if r != 0 && (r < 0) != (y < 0) {
        Some((q - 1, r + y))
    } else {
        Some((q, r))
    }
}

// ============================================================================
// Operators
// ============================================================================

fn add_op(args: &[Value], ctx: &EvalContext) -> Result<Value> {
    let [a, b] = args_n::<2>("add", args)?;
    if !a.is_scalar() {
        return add_shaped("add", a, b);
    }
    binary_scalar("add", a, b, ctx, i64::checked_add, |x, y| x + y, |x, y| x + y)
}

fn sub_op(args: &[Value], ctx: &EvalContext) -> Result<Value> {
    let [a, b] = args_n::<2>("sub", args)?;
    if !a.is_scalar() {
        return sub_shaped("sub", a, b);
    }
    binary_scalar("sub", a, b, ctx, i64::checked_sub, |x, y| x - y, |x, y| x - y)
}

fn mul_op(args: &[Value], ctx: &EvalContext) -> Result<Value> {
    let [a, b] = args_n::<2>("mul", args)?;
    if !a.is_scalar() || !b.is_scalar() {
        return mul_shaped("mul", a, b);
    }
    if let (Some(x), Some(y)) = (integer_bits(a), integer_bits(b)) {
        ctx.ensure_integer_bits("mul", x + y)?;
    }
    binary_scalar("mul", a, b, ctx, i64::checked_mul, |x, y| x * y, |x, y| x * y)
}

fn div_op(args: &[Value], ctx: &EvalContext) -> Result<Value> {
    let [a, b] = args_n::<2>("div", args)?;
    check_divisor(b)?;
    if !a.is_scalar() {
        return scale_shaped("div", a, 1.0 / real_arg("div", b)?);
    }
    match scalar_pair("div", a, b)? {
        ScalarPair::Int(x, y) if x.wrapping_rem(y) == 0 => match x.checked_div(y) {
            Some(q) => Ok(Value::Int(q)),
            None => overflowed("div", ctx, || BigInt::from(x) / BigInt::from(y)),
        },
        ScalarPair::Int(x, y) => Ok(Value::Real(x as f64 / y as f64)),
        ScalarPair::BigInt(x, y) if (&x % &y).is_zero() => Ok(Value::from(x / y)),
        ScalarPair::BigInt(x, y) => Ok(Value::Real(big_to_f64(&x) / big_to_f64(&y))),
        ScalarPair::Real(x, y) => Ok(Value::Real(x / y)),
    }
}

fn idiv_op(args: &[Value], ctx: &EvalContext) -> Result<Value> {
    let [a, b] = args_n::<2>("idiv", args)?;
    check_divisor(b)?;
    binary_scalar(
        "idiv",
        a,
        b,
        ctx,
        |x, y| int_div_floor(x, y).map(|(q, _)| q),
        |x, y| big_div_floor(x, y).0,
        |x, y| (x / y).floor(),
    )
}

fn mod_op(args: &[Value], ctx: &EvalContext) -> Result<Value> {
    let [a, b] = args_n::<2>("mod", args)?;
    check_divisor(b)?;
    binary_scalar(
        "mod",
        a,
        b,
        ctx,
        |x, y| Some(int_div_floor(x, y).map_or(0, |(_, r)| r)),
        |x, y| big_div_floor(x, y).1,
        |x, y| x - y * (x / y).floor(),
    )
}

fn neg_op(args: &[Value], ctx: &EvalContext) -> Result<Value> {
    match args_n::<1>("neg", args)? {
        [Value::Int(n)] => match n.checked_neg() {
            Some(n) => Ok(Value::Int(n)),
            None => overflowed("neg", ctx, || -BigInt::from(*n)),
        },
        [Value::BigInt(n)] => Ok(Value::from(-n.as_ref())),
        [Value::Real(x)] => Ok(Value::Real(-x)),
        [other] => neg_shaped(other),
    }
}

fn abs_op(args: &[Value], ctx: &EvalContext) -> Result<Value> {
    match args_n::<1>("abs", args)? {
        [Value::Int(n)] => match n.checked_abs() {
            Some(n) => Ok(Value::Int(n)),
            None => overflowed("abs", ctx, || BigInt::from(*n).abs()),
        },
        [Value::BigInt(n)] => Ok(Value::from(n.abs())),
        [other] => Ok(Value::Real(real_arg("abs", other)?.abs())),
    }
}

fn pow_op(args: &[Value], ctx: &EvalContext) -> Result<Value> {
    let [base, exponent] = args_n::<2>("pow", args)?;
    let integer_base = matches!(base, Value::Int(_) | Value::BigInt(_));
    let exp = match exponent {
        Value::Int(e) => Some(*e),
        Value::BigInt(e) => e.to_i64(),
        _ => None,
    };

    match (integer_base, exp) {
        (true, Some(e)) if e >= 0 => {
            let e = u32::try_from(e).map_err(|_| Error::domain("pow", "exponent is too large"))?;
            let bits = integer_bits(base).unwrap_or(0);
            if bits > 1 {
                // |base| >= 2^(bits - 1), so this never overestimates.
                ctx.ensure_integer_bits("pow", (bits - 1).saturating_mul(u64::from(e)))?;
            }
            match base {
                Value::Int(b) => match b.checked_pow(e) {
                    Some(n) => Ok(Value::Int(n)),
                    None => overflowed("pow", ctx, || BigInt::from(*b).pow(e)),
                },
                _ => {
                    let b = base
                        .as_bigint()
                        .ok_or_else(|| Error::Unreachable("pow base is not an integer".into()))?;
                    Ok(Value::from(b.pow(e)))
                }
            }
        }
        (true, None) if matches!(exponent, Value::BigInt(_)) => {
            Err(Error::domain("pow", "exponent is too large"))
        }
        _ => {
            let b = real_arg("pow", base)?;
            let e = real_arg("pow", exponent)?;
            if b == 0.0 && e < 0.0 {
                return Err(Error::DivisionByZero);
            }
            let result = b.powf(e);
            if result.is_nan() && !b.is_nan() && !e.is_nan() {
                return Err(Error::domain("pow", "negative base with fractional exponent"));
            }
            Ok(Value::Real(result))
        }
    }
}

fn sq_op(args: &[Value], ctx: &EvalContext) -> Result<Value> {
    let [a] = args_n::<1>("sq", args)?;
    mul_op(&[a.clone(), a.clone()], ctx)
}

fn sqrt_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    let [a] = args_n::<1>("sqrt", args)?;
    let negative = || Error::domain("sqrt", "argument is negative");
    match a {
        Value::Int(n) => {
            if *n < 0 {
                return Err(negative());
            }
            let root = (*n as f64).sqrt() as i64;
            let exact = (root.saturating_sub(1)..=root.saturating_add(1))
                .find(|r| r.checked_mul(*r) == Some(*n));
            Ok(exact.map_or_else(|| Value::Real((*n as f64).sqrt()), Value::Int))
        }
        Value::BigInt(n) => {
            if n.sign() == Sign::Minus {
                return Err(negative());
            }
            let root = n.sqrt();
            if &(&root * &root) == n.as_ref() {
                Ok(Value::from(root))
            } else {
                Ok(Value::Real(big_to_f64(n).sqrt()))
            }
        }
        other => {
            let x = real_arg("sqrt", other)?;
            if x < 0.0 {
                return Err(negative());
            }
            Ok(Value::Real(x.sqrt()))
        }
    }
}

fn inv_op(args: &[Value], ctx: &EvalContext) -> Result<Value> {
    let [a] = args_n::<1>("inv", args)?;
    div_op(&[Value::Int(1), a.clone()], ctx)
}

fn min_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    let [a, b] = args_n::<2>("min", args)?;
    Ok(match compare("min", a, b)? {
        Ordering::Greater => b.clone(),
        _ => a.clone(),
    })
}

fn max_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    let [a, b] = args_n::<2>("max", args)?;
    Ok(match compare("max", a, b)? {
        Ordering::Less => b.clone(),
        _ => a.clone(),
    })
}

fn sign_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    match args_n::<1>("sign", args)? {
        [Value::Int(n)] => Ok(Value::Int(n.signum())),
        [Value::BigInt(n)] => Ok(Value::Int(match n.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        })),
        [other] => {
            let x = real_arg("sign", other)?;
            Ok(Value::Real(if x == 0.0 || x.is_nan() { x } else { x.signum() }))
        }
    }
}
