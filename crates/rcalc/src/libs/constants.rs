//! Mathematical constants: PI, E.

use crate::error::Result;
use crate::libs::{EvalContext, LibId, Library, Operator};
use crate::value::{TypeSet, Value};

/// Constants library ID.
pub const CONSTANTS_LIB: LibId = 5;

const NULLARY: &[&[TypeSet]] = &[&[]];

#[derive(Clone, Copy)]
pub struct ConstantsLib;

impl Library for ConstantsLib {
    fn id(&self) -> LibId {
        CONSTANTS_LIB
    }

    fn name(&self) -> &'static str {
        "Constants"
    }

    fn operators(&self) -> Vec<Operator> {
        vec![
            Operator::new("pi", "Constants", NULLARY, pi)
                .description("Ratio of a circle's circumference to its diameter")
                .examples(&["pi"]),
            Operator::new("e", "Constants", NULLARY, euler)
                .description("Base of the natural logarithm")
                .examples(&["e"]),
        ]
    }
}

fn pi(_args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    Ok(Value::Real(std::f64::consts::PI))
}

fn euler(_args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    Ok(Value::Real(std::f64::consts::E))
}
