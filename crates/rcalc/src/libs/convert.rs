//! Type conversion library.
//!
//! Provides commands:
//! - REAL (scalar to Real)
//! - BIGINT (integer, or integral real, to BigInt)
//! - INT (scalar to Int, truncating reals toward zero)

use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::error::{Error, Result};
use crate::libs::{EvalContext, LibId, Library, Operator, args_n};
use crate::value::{TypeSet, Value, big_to_f64};

/// Conversion library ID.
pub const CONVERT_LIB: LibId = 4;

const CATEGORY: &str = "Conversion";

const UNARY: &[&[TypeSet]] = &[&[TypeSet::SCALAR]];

/// Conversion library.
#[derive(Clone, Copy)]
pub struct ConvertLib;

impl Library for ConvertLib {
    fn id(&self) -> LibId {
        CONVERT_LIB
    }

    fn name(&self) -> &'static str {
        "Conversion"
    }

    fn operators(&self) -> Vec<Operator> {
        vec![
            Operator::new("real", CATEGORY, UNARY, to_real)
                .description("Convert to a real")
                .examples(&["7 real"]),
            Operator::new("bigint", CATEGORY, UNARY, to_bigint)
                .description("Convert to an arbitrary precision integer")
                .examples(&["42 bigint"]),
            Operator::new("int", CATEGORY, UNARY, to_int)
                .description("Convert to a 64-bit integer, truncating reals")
                .examples(&["3.9 int"]),
        ]
    }
}

fn to_real(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    match args_n::<1>("real", args)? {
        [Value::Int(n)] => Ok(Value::Real(*n as f64)),
        [Value::BigInt(n)] => Ok(Value::Real(big_to_f64(n))),
        [Value::Real(x)] => Ok(Value::Real(*x)),
        [other] => Err(Error::Unreachable(format!("'real' received {}", other.type_of()))),
    }
}

fn to_bigint(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    match args_n::<1>("bigint", args)? {
        [Value::Int(n)] => Ok(Value::bigint(*n)),
        [v @ Value::BigInt(_)] => Ok(v.clone()),
        [Value::Real(x)] => {
            if x.fract() != 0.0 {
                return Err(Error::domain("bigint", "value is not an integer"));
            }
            BigInt::from_f64(*x)
                .map(Value::from)
                .ok_or_else(|| Error::domain("bigint", "value is not finite"))
        }
        [other] => Err(Error::Unreachable(format!("'bigint' received {}", other.type_of()))),
    }
}

fn to_int(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    match args_n::<1>("int", args)? {
        [v @ Value::Int(_)] => Ok(v.clone()),
        [Value::BigInt(n)] => n
            .to_i64()
            .map(Value::Int)
            .ok_or_else(|| Error::IntegerOverflow("int".to_string())),
        [Value::Real(x)] => {
            if !x.is_finite() {
                return Err(Error::domain("int", "value is not finite"));
            }
            x.trunc()
                .to_i64()
                .map(Value::Int)
                .ok_or_else(|| Error::IntegerOverflow("int".to_string()))
        }
        [other] => Err(Error::Unreachable(format!("'int' received {}", other.type_of()))),
    }
}
