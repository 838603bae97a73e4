//! Unit conversion library.
//!
//! Provides commands:
//! - CONVERT (value, from-unit, to-unit)
//! - UBASE (value, unit) to the family's base unit
//!
//! Units come from [`crate::units`]. Scalars convert to reals; vectors
//! convert component by component in families that have no offset.

use crate::error::{Error, Result};
use crate::libs::linalg::scale_shaped;
use crate::libs::{EvalContext, LibId, Library, Operator, args_n, real_arg};
use crate::units::{self, UnitDef, UnitFamily};
use crate::value::{Type, TypeSet, Value};

/// Units library ID.
pub const UNITS_LIB: LibId = 6;

const CATEGORY: &str = "Units";

const CONVERTIBLE: TypeSet = TypeSet::SCALAR.union(TypeSet::VECTOR);

const CONVERT: &[&[TypeSet]] = &[&[CONVERTIBLE, TypeSet::UNIT, TypeSet::UNIT]];
const UBASE: &[&[TypeSet]] = &[&[CONVERTIBLE, TypeSet::UNIT]];

/// Unit conversion library.
#[derive(Clone, Copy)]
pub struct UnitsLib;

impl Library for UnitsLib {
    fn id(&self) -> LibId {
        UNITS_LIB
    }

    fn name(&self) -> &'static str {
        "Units"
    }

    fn operators(&self) -> Vec<Operator> {
        vec![
            Operator::new("convert", CATEGORY, CONVERT, convert_op)
                .aliases(&["to"])
                .description("Convert a value between two units of one family")
                .examples(&["5 _km _m convert", "212 _F _C to"]),
            Operator::new("ubase", CATEGORY, UBASE, ubase_op)
                .description("Convert a value to its family's base unit")
                .examples(&["90 _deg ubase"]),
        ]
    }
}

fn unit_arg(op: &str, value: &Value) -> Result<(&'static UnitFamily, &'static UnitDef)> {
    match value {
        Value::Unit(name) => units::lookup(name)
            .ok_or_else(|| Error::domain(op, format!("unknown unit _{name}"))),
        other => Err(Error::Unreachable(format!("'{op}' received {} as a unit", other.type_of()))),
    }
}

fn convert_value(
    op: &str,
    args: &[Value],
    value: &Value,
    family: &UnitFamily,
    from: &UnitDef,
    to: &UnitDef,
) -> Result<Value> {
    if !family.base_type.contains(value.type_of()) {
        return Err(Error::TypeMismatch {
            op: op.to_string(),
            found: args.iter().map(Value::type_of).collect::<Vec<Type>>(),
        });
    }
    if value.is_scalar() {
        let x = real_arg(op, value)?;
        return Ok(Value::Real(to.from_base(from.to_base(x))));
    }
    let factor = from.factor_to(to).ok_or_else(|| {
        Error::Unreachable(format!("{} units convert vectors but have an offset", family.name))
    })?;
    scale_shaped(op, value, factor)
}

fn convert_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    let [value, from, to] = args_n::<3>("convert", args)?;
    let (family, from) = unit_arg("convert", from)?;
    let (to_family, to) = unit_arg("convert", to)?;
    if family.name != to_family.name {
        return Err(Error::domain(
            "convert",
            format!(
                "cannot convert {} ({}) to {} ({})",
                from.usage(),
                family.name,
                to.usage(),
                to_family.name
            ),
        ));
    }
    convert_value("convert", args, value, family, from, to)
}

fn ubase_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    let [value, unit] = args_n::<2>("ubase", args)?;
    let (family, from) = unit_arg("ubase", unit)?;
    convert_value("ubase", args, value, family, from, family.base())
}
