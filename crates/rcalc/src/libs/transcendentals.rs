//! Transcendental functions library.
//!
//! Provides commands:
//! - SIN, COS, TAN, ASIN, ACOS, ATAN, ATAN2 (trigonometric, radians)
//! - EXP, LN, LOG (exponential and logarithmic)
//! - FLOOR, CEIL, ROUND, TRUNC (rounding)

use crate::error::{Error, Result};
use crate::libs::{EvalContext, LibId, Library, Operator, args_n, real_arg};
use crate::value::{TypeSet, Value};

/// Transcendentals library ID.
pub const TRANSCENDENTALS_LIB: LibId = 2;

const TRIG: &str = "Trigonometry";
const EXPLOG: &str = "Exponential";
const ROUNDING: &str = "Rounding";

const UNARY: &[&[TypeSet]] = &[&[TypeSet::SCALAR]];
const BINARY: &[&[TypeSet]] = &[&[TypeSet::SCALAR, TypeSet::SCALAR]];

/// Transcendental functions library.
#[derive(Clone, Copy)]
pub struct TranscendentalsLib;

impl Library for TranscendentalsLib {
    fn id(&self) -> LibId {
        TRANSCENDENTALS_LIB
    }

    fn name(&self) -> &'static str {
        "Transcendentals"
    }

    fn operators(&self) -> Vec<Operator> {
        vec![
            Operator::new("sin", TRIG, UNARY, sin_op)
                .description("Sine of an angle in radians")
                .examples(&["pi 2 / sin"]),
            Operator::new("cos", TRIG, UNARY, cos_op)
                .description("Cosine of an angle in radians")
                .examples(&["0 cos"]),
            Operator::new("tan", TRIG, UNARY, tan_op).description("Tangent of an angle in radians"),
            Operator::new("asin", TRIG, UNARY, asin_op)
                .description("Arc sine, in radians")
                .examples(&["1 asin"]),
            Operator::new("acos", TRIG, UNARY, acos_op).description("Arc cosine, in radians"),
            Operator::new("atan", TRIG, UNARY, atan_op).description("Arc tangent, in radians"),
            Operator::new("atan2", TRIG, BINARY, atan2_op)
                .description("Angle of the point (x, y); takes y then x")
                .examples(&["1 1 atan2"]),
            Operator::new("exp", EXPLOG, UNARY, exp_op)
                .description("e raised to a power")
                .examples(&["1 exp"]),
            Operator::new("ln", EXPLOG, UNARY, ln_op)
                .description("Natural logarithm")
                .examples(&["e ln"]),
            Operator::new("log", EXPLOG, UNARY, log_op)
                .description("Base-10 logarithm")
                .examples(&["1000 log"]),
            Operator::new("floor", ROUNDING, UNARY, floor_op)
                .description("Round toward negative infinity")
                .examples(&["2.7 floor"]),
            Operator::new("ceil", ROUNDING, UNARY, ceil_op)
                .description("Round toward positive infinity")
                .examples(&["2.1 ceil"]),
            Operator::new("round", ROUNDING, UNARY, round_op)
                .description("Round to nearest, halves away from zero")
                .examples(&["2.5 round"]),
            Operator::new("trunc", ROUNDING, UNARY, trunc_op)
                .description("Round toward zero")
                .examples(&["-2.7 trunc"]),
        ]
    }
}

// Execution helpers

fn unary_real(op: &str, args: &[Value], f: impl FnOnce(f64) -> f64) -> Result<Value> {
    let [a] = args_n::<1>(op, args)?;
    Ok(Value::Real(f(real_arg(op, a)?)))
}

/// Unary real function defined only where `domain` holds.
fn unary_checked(
    op: &str,
    args: &[Value],
    domain: impl FnOnce(f64) -> bool,
    reason: &str,
    f: impl FnOnce(f64) -> f64,
) -> Result<Value> {
    let [a] = args_n::<1>(op, args)?;
    let x = real_arg(op, a)?;
    if !domain(x) {
        return Err(Error::domain(op, reason));
    }
    Ok(Value::Real(f(x)))
}

/// Rounding leaves integers untouched.
fn rounding(op: &str, args: &[Value], f: impl FnOnce(f64) -> f64) -> Result<Value> {
    match args_n::<1>(op, args)? {
        [v @ (Value::Int(_) | Value::BigInt(_))] => Ok(v.clone()),
        [other] => Ok(Value::Real(f(real_arg(op, other)?))),
    }
}

fn sin_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    unary_real("sin", args, f64::sin)
}

fn cos_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    unary_real("cos", args, f64::cos)
}

fn tan_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    unary_real("tan", args, f64::tan)
}

fn asin_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    unary_checked("asin", args, |x| (-1.0..=1.0).contains(&x), "argument outside [-1, 1]", f64::asin)
}

fn acos_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    unary_checked("acos", args, |x| (-1.0..=1.0).contains(&x), "argument outside [-1, 1]", f64::acos)
}

fn atan_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    unary_real("atan", args, f64::atan)
}

fn atan2_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    let [y, x] = args_n::<2>("atan2", args)?;
    Ok(Value::Real(real_arg("atan2", y)?.atan2(real_arg("atan2", x)?)))
}

fn exp_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    unary_real("exp", args, f64::exp)
}

fn ln_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    unary_checked("ln", args, |x| x > 0.0, "argument must be positive", f64::ln)
}

fn log_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    unary_checked("log", args, |x| x > 0.0, "argument must be positive", f64::log10)
}

fn floor_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    rounding("floor", args, f64::floor)
}

fn ceil_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    rounding("ceil", args, f64::ceil)
}

fn round_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    rounding("round", args, f64::round)
}

fn trunc_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    rounding("trunc", args, f64::trunc)
}
