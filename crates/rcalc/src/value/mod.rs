//! Calculator value types.
//!
//! Every stack item holds one [`Value`]:
//! - Scalars: Int, BigInt, Real
//! - Fixed-size vectors of reals: Vec2, Vec3, Vec4
//! - Row-major square matrices of reals: Mat2, Mat3, Mat4
//! - Unit: a named dimensionless marker
//!
//! Arithmetic is not implemented here. Operators live in [`crate::libs`] as
//! free functions so new operators never touch this type.

pub mod format;
pub mod linalg;
pub mod promote;

use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

pub use format::{FormatTags, Radix, accessibility_description, format_general};
pub use linalg::{Matrix, Vector};
pub use promote::{ScalarPair, big_to_f64, promote_pair};

// ============================================================================
// Type tags
// ============================================================================

/// Variant tag of a [`Value`].
///
/// Discriminants are stable; presentation layers receive them as `u8`.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Type {
    Int = 0,
    BigInt = 1,
    Real = 2,
    Vec2 = 3,
    Vec3 = 4,
    Vec4 = 5,
    Mat2 = 6,
    Mat3 = 7,
    Mat4 = 8,
    Unit = 9,
}

impl Type {
    /// All types in discriminant order.
    pub const ALL: [Type; 10] = [
        Type::Int,
        Type::BigInt,
        Type::Real,
        Type::Vec2,
        Type::Vec3,
        Type::Vec4,
        Type::Mat2,
        Type::Mat3,
        Type::Mat4,
        Type::Unit,
    ];

    /// Display name used in help listings and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Type::Int => "Int",
            Type::BigInt => "BigInt",
            Type::Real => "Real",
            Type::Vec2 => "Vec2",
            Type::Vec3 => "Vec3",
            Type::Vec4 => "Vec4",
            Type::Mat2 => "Mat2",
            Type::Mat3 => "Mat3",
            Type::Mat4 => "Mat4",
            Type::Unit => "Unit",
        }
    }

    /// Inverse of `as u8`.
    pub fn from_u8(raw: u8) -> Option<Type> {
        Type::ALL.get(raw as usize).copied()
    }

    const fn bit(self) -> u16 {
        1 << (self as u8)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of [`Type`]s accepted at one argument position of an operator.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeSet(u16);

impl TypeSet {
    pub const EMPTY: TypeSet = TypeSet(0);
    pub const INT: TypeSet = TypeSet::of(Type::Int);
    pub const BIGINT: TypeSet = TypeSet::of(Type::BigInt);
    pub const REAL: TypeSet = TypeSet::of(Type::Real);
    pub const UNIT: TypeSet = TypeSet::of(Type::Unit);
    pub const VEC2: TypeSet = TypeSet::of(Type::Vec2);
    pub const VEC3: TypeSet = TypeSet::of(Type::Vec3);
    pub const VEC4: TypeSet = TypeSet::of(Type::Vec4);
    pub const MAT2: TypeSet = TypeSet::of(Type::Mat2);
    pub const MAT3: TypeSet = TypeSet::of(Type::Mat3);
    pub const MAT4: TypeSet = TypeSet::of(Type::Mat4);
    /// Int or BigInt.
    pub const INTEGER: TypeSet = TypeSet::INT.union(TypeSet::BIGINT);
    /// Int, BigInt, or Real.
    pub const SCALAR: TypeSet = TypeSet::INTEGER.union(TypeSet::REAL);
    pub const VECTOR: TypeSet = TypeSet::VEC2.union(TypeSet::VEC3).union(TypeSet::VEC4);
    pub const MATRIX: TypeSet = TypeSet::MAT2.union(TypeSet::MAT3).union(TypeSet::MAT4);
    pub const ANY: TypeSet = TypeSet((1 << Type::ALL.len()) - 1);

    /// The set holding only `ty`.
    pub const fn of(ty: Type) -> TypeSet {
        TypeSet(ty.bit())
    }

    pub const fn union(self, other: TypeSet) -> TypeSet {
        TypeSet(self.0 | other.0)
    }

    pub fn contains(self, ty: Type) -> bool {
        self.0 & ty.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Member types in discriminant order.
    pub fn types(self) -> impl Iterator<Item = Type> {
        Type::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

impl fmt::Debug for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeSet({self})")
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == TypeSet::ANY {
            return f.write_str("Any");
        }
        let names: Vec<&str> = self.types().map(Type::name).collect();
        f.write_str(&names.join(" | "))
    }
}

// ============================================================================
// Values
// ============================================================================

/// Shape family of a value, used to tell type errors from shape errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Vector(usize),
    Matrix(usize),
    Unit,
}

/// A value on the calculator stack.
#[derive(Clone, Debug)]
pub enum Value {
    /// 64-bit signed integer.
    Int(i64),
    /// Arbitrary precision integer.
    BigInt(Arc<BigInt>),
    /// 64-bit floating point.
    Real(f64),
    Vec2(Vector<2>),
    Vec3(Vector<3>),
    Vec4(Vector<4>),
    Mat2(Matrix<2>),
    Mat3(Matrix<3>),
    Mat4(Matrix<4>),
    /// Named dimensionless marker, written `_name`.
    Unit(Arc<str>),
}

impl Value {
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    pub fn bigint(n: impl Into<BigInt>) -> Self {
        Value::BigInt(Arc::new(n.into()))
    }

    pub fn real(x: f64) -> Self {
        Value::Real(x)
    }

    pub fn unit(name: impl Into<Arc<str>>) -> Self {
        Value::Unit(name.into())
    }

    pub fn vec2(x: f64, y: f64) -> Self {
        Value::Vec2(Vector([x, y]))
    }

    pub fn vec3(x: f64, y: f64, z: f64) -> Self {
        Value::Vec3(Vector([x, y, z]))
    }

    pub fn vec4(x: f64, y: f64, z: f64, w: f64) -> Self {
        Value::Vec4(Vector([x, y, z, w]))
    }

    /// Build a vector value from 2 to 4 components.
    pub fn vector(components: &[f64]) -> Option<Self> {
        match *components {
            [x, y] => Some(Value::vec2(x, y)),
            [x, y, z] => Some(Value::vec3(x, y, z)),
            [x, y, z, w] => Some(Value::vec4(x, y, z, w)),
            _ => None,
        }
    }

    /// Build a square matrix value from 2 to 4 rows of equal length.
    ///
    /// Returns `None` if the rows do not form an N×N grid with `2 <= N <= 4`.
    pub fn matrix(rows: &[Vec<f64>]) -> Option<Self> {
        let n = rows.len();
        if rows.iter().any(|row| row.len() != n) {
            return None;
        }
        match n {
            2 => Matrix::<2>::from_rows(rows).map(Value::Mat2),
            3 => Matrix::<3>::from_rows(rows).map(Value::Mat3),
            4 => Matrix::<4>::from_rows(rows).map(Value::Mat4),
            _ => None,
        }
    }

    /// Variant tag.
    pub fn type_of(&self) -> Type {
        match self {
            Value::Int(_) => Type::Int,
            Value::BigInt(_) => Type::BigInt,
            Value::Real(_) => Type::Real,
            Value::Vec2(_) => Type::Vec2,
            Value::Vec3(_) => Type::Vec3,
            Value::Vec4(_) => Type::Vec4,
            Value::Mat2(_) => Type::Mat2,
            Value::Mat3(_) => Type::Mat3,
            Value::Mat4(_) => Type::Mat4,
            Value::Unit(_) => Type::Unit,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Value::Int(_) | Value::BigInt(_) | Value::Real(_) => Shape::Scalar,
            Value::Vec2(_) => Shape::Vector(2),
            Value::Vec3(_) => Shape::Vector(3),
            Value::Vec4(_) => Shape::Vector(4),
            Value::Mat2(_) => Shape::Matrix(2),
            Value::Mat3(_) => Shape::Matrix(3),
            Value::Mat4(_) => Shape::Matrix(4),
            Value::Unit(_) => Shape::Unit,
        }
    }

    pub fn is_scalar(&self) -> bool {
        self.shape() == Shape::Scalar
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::BigInt(n) => n.to_i64(),
            _ => None,
        }
    }

    /// Scalar as real. Integers always convert; other shapes return `None`.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::BigInt(n) => Some(big_to_f64(n)),
            Value::Real(x) => Some(*x),
            _ => None,
        }
    }

    /// Integer scalar as a `BigInt`.
    pub fn as_bigint(&self) -> Option<BigInt> {
        match self {
            Value::Int(n) => Some(BigInt::from(*n)),
            Value::BigInt(n) => Some(n.as_ref().clone()),
            _ => None,
        }
    }

    /// Vector components, for any vector dimension.
    pub fn vector_components(&self) -> Option<&[f64]> {
        match self {
            Value::Vec2(v) => Some(&v.0),
            Value::Vec3(v) => Some(&v.0),
            Value::Vec4(v) => Some(&v.0),
            _ => None,
        }
    }

    /// Matrix rows, for any matrix dimension.
    pub fn matrix_rows(&self) -> Option<Vec<&[f64]>> {
        match self {
            Value::Mat2(m) => Some(m.rows()),
            Value::Mat3(m) => Some(m.rows()),
            Value::Mat4(m) => Some(m.rows()),
            _ => None,
        }
    }

    /// Whether this is a zero scalar (any numeric type).
    pub fn is_zero_scalar(&self) -> bool {
        match self {
            Value::Int(n) => *n == 0,
            Value::BigInt(n) => n.as_ref() == &BigInt::from(0),
            Value::Real(x) => *x == 0.0,
            _ => false,
        }
    }

    /// Render with the given formatting tags.
    pub fn to_string_with(&self, tags: FormatTags) -> String {
        format::format_value(self, tags)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(FormatTags::default()))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Int(a), Value::BigInt(b)) | (Value::BigInt(b), Value::Int(a)) => {
                &BigInt::from(*a) == b.as_ref()
            }
            (Value::Real(a), Value::Real(b)) => a == b,
            (Value::Real(a), other) | (other, Value::Real(a)) if other.is_scalar() => {
                other.as_real() == Some(*a)
            }
            (Value::Vec2(a), Value::Vec2(b)) => a == b,
            (Value::Vec3(a), Value::Vec3(b)) => a == b,
            (Value::Vec4(a), Value::Vec4(b)) => a == b,
            (Value::Mat2(a), Value::Mat2(b)) => a == b,
            (Value::Mat3(a), Value::Mat3(b)) => a == b,
            (Value::Mat4(a), Value::Mat4(b)) => a == b,
            (Value::Unit(a), Value::Unit(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::BigInt(Arc::new(n))
    }
}
