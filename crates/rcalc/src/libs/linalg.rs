//! Linear algebra library.
//!
//! Provides commands:
//! - VEC2, VEC3, VEC4 (compose from scalars)
//! - MAT2, MAT3, MAT4 (compose from row vectors)
//! - DOT, CROSS, NORM (LEN), NORMALIZE
//! - TRANSPOSE, DET, MINV
//!
//! Element-wise `add`/`sub`/`neg` and the `mul` products live in the
//! arithmetic library and call the shaped helpers at the bottom of this file.

use crate::error::{Error, Result};
use crate::libs::{EvalContext, LibId, Library, Operator, args_n, real_arg};
use crate::value::{TypeSet, Value};

/// Linear algebra library ID.
pub const LINALG_LIB: LibId = 3;

const CATEGORY: &str = "Linear algebra";

/// Linear algebra library.
#[derive(Clone, Copy)]
pub struct LinalgLib;

impl Library for LinalgLib {
    fn id(&self) -> LibId {
        LINALG_LIB
    }

    fn name(&self) -> &'static str {
        "Linear algebra"
    }

    fn operators(&self) -> Vec<Operator> {
        use TypeSet as T;
        vec![
            Operator::new("vec2", CATEGORY, &[&[T::SCALAR, T::SCALAR]], compose_vector)
                .description("Build a 2-vector from two scalars")
                .examples(&["1 2 vec2"]),
            Operator::new("vec3", CATEGORY, &[&[T::SCALAR, T::SCALAR, T::SCALAR]], compose_vector)
                .description("Build a 3-vector from three scalars")
                .examples(&["1 2 3 vec3"]),
            Operator::new(
                "vec4",
                CATEGORY,
                &[&[T::SCALAR, T::SCALAR, T::SCALAR, T::SCALAR]],
                compose_vector,
            )
            .description("Build a 4-vector from four scalars")
            .examples(&["1 2 3 4 vec4"]),
            Operator::new("mat2", CATEGORY, &[&[T::VEC2, T::VEC2]], compose_matrix)
                .description("Build a 2x2 matrix from two row vectors")
                .examples(&["[1, 2] [3, 4] mat2"]),
            Operator::new("mat3", CATEGORY, &[&[T::VEC3, T::VEC3, T::VEC3]], compose_matrix)
                .description("Build a 3x3 matrix from three row vectors")
                .examples(&["[1, 0, 0] [0, 1, 0] [0, 0, 1] mat3"]),
            Operator::new(
                "mat4",
                CATEGORY,
                &[&[T::VEC4, T::VEC4, T::VEC4, T::VEC4]],
                compose_matrix,
            )
            .description("Build a 4x4 matrix from four row vectors"),
            Operator::new("dot", CATEGORY, &[&[T::VECTOR, T::VECTOR]], dot_op)
                .description("Dot product")
                .examples(&["[1, 2, 3] [4, 5, 6] dot"]),
            Operator::new("cross", CATEGORY, &[&[T::VEC3, T::VEC3]], cross_op)
                .description("Cross product of 3-vectors")
                .examples(&["[1, 0, 0] [0, 1, 0] cross"]),
            Operator::new("norm", CATEGORY, &[&[T::VECTOR]], norm_op)
                .aliases(&["len"])
                .description("Euclidean length")
                .examples(&["[3, 4] norm"]),
            Operator::new("normalize", CATEGORY, &[&[T::VECTOR]], normalize_op)
                .description("Unit vector in the same direction")
                .examples(&["[3, 4] normalize"]),
            Operator::new("transpose", CATEGORY, &[&[T::MATRIX]], transpose_op)
                .description("Matrix transpose")
                .examples(&["[[1, 2], [3, 4]] transpose"]),
            Operator::new("det", CATEGORY, &[&[T::MATRIX]], det_op)
                .description("Matrix determinant")
                .examples(&["[[4, 7], [2, 6]] det"]),
            Operator::new("minv", CATEGORY, &[&[T::MATRIX]], minv_op)
                .description("Matrix inverse")
                .examples(&["[[4, 7], [2, 6]] minv"]),
        ]
    }
}

// Execution helpers

fn compose_vector(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    let components = args
        .iter()
        .map(|v| real_arg("vec", v))
        .collect::<Result<Vec<f64>>>()?;
    Value::vector(&components)
        .ok_or_else(|| Error::Unreachable(format!("cannot build a vector of {}", components.len())))
}

fn compose_matrix(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    let rows: Vec<Vec<f64>> = args
        .iter()
        .map(|v| v.vector_components().map(<[f64]>::to_vec))
        .collect::<Option<_>>()
        .ok_or_else(|| Error::Unreachable("matrix rows must be vectors".into()))?;
    Value::matrix(&rows)
        .ok_or_else(|| Error::ShapeMismatch(format!("{} rows do not form a square matrix", rows.len())))
}

fn dot_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    let [a, b] = args_n::<2>("dot", args)?;
    match (a, b) {
        (Value::Vec2(x), Value::Vec2(y)) => Ok(Value::real(x.dot(y))),
        (Value::Vec3(x), Value::Vec3(y)) => Ok(Value::real(x.dot(y))),
        (Value::Vec4(x), Value::Vec4(y)) => Ok(Value::real(x.dot(y))),
        _ => Err(shape_mismatch("dot", a, b)),
    }
}

fn cross_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    match args_n::<2>("cross", args)? {
        [Value::Vec3(x), Value::Vec3(y)] => Ok(Value::Vec3(x.cross(y))),
        [a, b] => Err(shape_mismatch("cross", a, b)),
    }
}

fn norm_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    match args_n::<1>("norm", args)? {
        [Value::Vec2(v)] => Ok(Value::real(v.norm())),
        [Value::Vec3(v)] => Ok(Value::real(v.norm())),
        [Value::Vec4(v)] => Ok(Value::real(v.norm())),
        [other] => Err(unexpected("norm", other)),
    }
}

fn normalize_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    let zero = || Error::domain("normalize", "the zero vector has no direction");
    match args_n::<1>("normalize", args)? {
        [Value::Vec2(v)] => v.normalized().map(Value::Vec2).ok_or_else(zero),
        [Value::Vec3(v)] => v.normalized().map(Value::Vec3).ok_or_else(zero),
        [Value::Vec4(v)] => v.normalized().map(Value::Vec4).ok_or_else(zero),
        [other] => Err(unexpected("normalize", other)),
    }
}

fn transpose_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    match args_n::<1>("transpose", args)? {
        [Value::Mat2(m)] => Ok(Value::Mat2(m.transpose())),
        [Value::Mat3(m)] => Ok(Value::Mat3(m.transpose())),
        [Value::Mat4(m)] => Ok(Value::Mat4(m.transpose())),
        [other] => Err(unexpected("transpose", other)),
    }
}

fn det_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    match args_n::<1>("det", args)? {
        [Value::Mat2(m)] => Ok(Value::real(m.determinant())),
        [Value::Mat3(m)] => Ok(Value::real(m.determinant())),
        [Value::Mat4(m)] => Ok(Value::real(m.determinant())),
        [other] => Err(unexpected("det", other)),
    }
}

fn minv_op(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    let singular = || Error::domain("minv", "matrix is singular");
    match args_n::<1>("minv", args)? {
        [Value::Mat2(m)] => m.inverse().map(Value::Mat2).ok_or_else(singular),
        [Value::Mat3(m)] => m.inverse().map(Value::Mat3).ok_or_else(singular),
        [Value::Mat4(m)] => m.inverse().map(Value::Mat4).ok_or_else(singular),
        [other] => Err(unexpected("minv", other)),
    }
}

// ============================================================================
// Shaped arithmetic
// ============================================================================

pub(crate) fn shape_mismatch(op: &str, a: &Value, b: &Value) -> Error {
    Error::ShapeMismatch(format!(
        "'{op}' cannot combine {} with {}",
        a.type_of(),
        b.type_of()
    ))
}

fn unexpected(op: &str, value: &Value) -> Error {
    Error::Unreachable(format!("'{op}' received {}", value.type_of()))
}

/// Element-wise sum of equal shapes.
pub(crate) fn add_shaped(op: &str, a: &Value, b: &Value) -> Result<Value> {
    match (a, b) {
        (Value::Vec2(x), Value::Vec2(y)) => Ok(Value::Vec2(*x + *y)),
        (Value::Vec3(x), Value::Vec3(y)) => Ok(Value::Vec3(*x + *y)),
        (Value::Vec4(x), Value::Vec4(y)) => Ok(Value::Vec4(*x + *y)),
        (Value::Mat2(x), Value::Mat2(y)) => Ok(Value::Mat2(*x + *y)),
        (Value::Mat3(x), Value::Mat3(y)) => Ok(Value::Mat3(*x + *y)),
        (Value::Mat4(x), Value::Mat4(y)) => Ok(Value::Mat4(*x + *y)),
        _ => Err(shape_mismatch(op, a, b)),
    }
}

/// Element-wise difference of equal shapes.
pub(crate) fn sub_shaped(op: &str, a: &Value, b: &Value) -> Result<Value> {
    add_shaped(op, a, &neg_shaped(b)?)
}

pub(crate) fn neg_shaped(a: &Value) -> Result<Value> {
    match a {
        Value::Vec2(v) => Ok(Value::Vec2(-*v)),
        Value::Vec3(v) => Ok(Value::Vec3(-*v)),
        Value::Vec4(v) => Ok(Value::Vec4(-*v)),
        Value::Mat2(m) => Ok(Value::Mat2(-*m)),
        Value::Mat3(m) => Ok(Value::Mat3(-*m)),
        Value::Mat4(m) => Ok(Value::Mat4(-*m)),
        other => Err(unexpected("neg", other)),
    }
}

/// Multiply a vector or matrix by a real factor.
pub(crate) fn scale_shaped(op: &str, a: &Value, k: f64) -> Result<Value> {
    match a {
        Value::Vec2(v) => Ok(Value::Vec2(v.scale(k))),
        Value::Vec3(v) => Ok(Value::Vec3(v.scale(k))),
        Value::Vec4(v) => Ok(Value::Vec4(v.scale(k))),
        Value::Mat2(m) => Ok(Value::Mat2(m.scale(k))),
        Value::Mat3(m) => Ok(Value::Mat3(m.scale(k))),
        Value::Mat4(m) => Ok(Value::Mat4(m.scale(k))),
        other => Err(unexpected(op, other)),
    }
}

/// Products involving at least one vector or matrix.
pub(crate) fn mul_shaped(op: &str, a: &Value, b: &Value) -> Result<Value> {
    if a.is_scalar() {
        return scale_shaped(op, b, real_arg(op, a)?);
    }
    if b.is_scalar() {
        return scale_shaped(op, a, real_arg(op, b)?);
    }
    match (a, b) {
        (Value::Mat2(x), Value::Mat2(y)) => Ok(Value::Mat2(*x * *y)),
        (Value::Mat3(x), Value::Mat3(y)) => Ok(Value::Mat3(*x * *y)),
        (Value::Mat4(x), Value::Mat4(y)) => Ok(Value::Mat4(*x * *y)),
        (Value::Mat2(m), Value::Vec2(v)) => Ok(Value::Vec2(m.mul_vector(v))),
        (Value::Mat3(m), Value::Vec3(v)) => Ok(Value::Vec3(m.mul_vector(v))),
        (Value::Mat4(m), Value::Vec4(v)) => Ok(Value::Vec4(m.mul_vector(v))),
        _ => Err(shape_mismatch(op, a, b)),
    }
}
