//! Operator libraries.
//!
//! A library is a named group of operators. The standard set is:
//! - Arithmetic: ARITH_LIB (1)
//! - Transcendentals: TRANSCENDENTALS_LIB (2)
//! - Linear algebra: LINALG_LIB (3)
//! - Conversions: CONVERT_LIB (4)
//! - Constants: CONSTANTS_LIB (5)
//! - Units: UNITS_LIB (6)
//!
//! Operators are plain data plus a pure evaluation function, so adding one
//! never touches [`Value`].

pub mod arith;
pub mod constants;
pub mod convert;
pub mod linalg;
pub mod transcendentals;
pub mod units;

pub use arith::ArithLib;
pub use constants::ConstantsLib;
pub use convert::ConvertLib;
pub use linalg::LinalgLib;
pub use transcendentals::TranscendentalsLib;
pub use units::UnitsLib;

pub use arith::ARITH_LIB;
pub use constants::CONSTANTS_LIB;
pub use convert::CONVERT_LIB;
pub use linalg::LINALG_LIB;
pub use transcendentals::TRANSCENDENTALS_LIB;
pub use units::UNITS_LIB;

use std::fmt;

use crate::config::{DEFAULT_MAX_INTEGER_BITS, IntegerPromotion};
use crate::error::{Error, Result};
use crate::value::{Type, TypeSet, Value};

/// Library identifier.
pub type LibId = u16;

/// Evaluation function of an operator.
///
/// `args` are ordered bottom-most first and already satisfy one of the
/// operator's signatures.
pub type EvalFn = fn(args: &[Value], ctx: &EvalContext) -> Result<Value>;

// ============================================================================
// Evaluation context
// ============================================================================

/// Settings an evaluation function may consult.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvalContext {
    pub promotion: IntegerPromotion,
    /// Ceiling on the estimated size of an exact integer result.
    pub max_integer_bits: u64,
}

impl EvalContext {
    pub fn new(promotion: IntegerPromotion) -> Self {
        Self {
            promotion,
            max_integer_bits: DEFAULT_MAX_INTEGER_BITS,
        }
    }

    pub fn with_max_integer_bits(mut self, bits: u64) -> Self {
        self.max_integer_bits = bits;
        self
    }

    /// Reject an exact integer result estimated at `bits` bits if too large.
    pub fn ensure_integer_bits(&self, op: &str, bits: u64) -> Result<()> {
        if bits > self.max_integer_bits {
            Err(Error::domain(op, "result too large"))
        } else {
            Ok(())
        }
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new(IntegerPromotion::default())
    }
}

// ============================================================================
// Operators
// ============================================================================

/// A named operator.
#[derive(Clone, Copy)]
pub struct Operator {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub category: &'static str,
    /// Input lines demonstrating the operator.
    pub examples: &'static [&'static str],
    /// Accepted argument types, one list per signature, bottom-most first.
    pub signatures: &'static [&'static [TypeSet]],
    pub eval: EvalFn,
}

impl Operator {
    pub const fn new(
        name: &'static str,
        category: &'static str,
        signatures: &'static [&'static [TypeSet]],
        eval: EvalFn,
    ) -> Self {
        Self {
            name,
            aliases: &[],
            description: "",
            category,
            examples: &[],
            signatures,
            eval,
        }
    }

    pub const fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub const fn examples(mut self, examples: &'static [&'static str]) -> Self {
        self.examples = examples;
        self
    }

    /// Number of arguments. All signatures share it once registered.
    pub fn arity(&self) -> usize {
        self.signatures.first().map_or(0, |sig| sig.len())
    }

    /// Primary name followed by aliases.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    /// Whether `types` (bottom-most first, exactly `arity` long) fit a signature.
    pub fn accepts(&self, types: &[Type]) -> bool {
        self.signatures.iter().any(|sig| {
            sig.len() == types.len() && sig.iter().zip(types).all(|(set, ty)| set.contains(*ty))
        })
    }

    /// Whether the top of a stack with the given types (bottom first) fits.
    pub fn applicable_to(&self, stack_types: &[Type]) -> bool {
        let arity = self.arity();
        stack_types.len() >= arity && self.accepts(&stack_types[stack_types.len() - arity..])
    }

    /// Check the arguments and evaluate.
    pub fn apply(&self, args: &[Value], ctx: &EvalContext) -> Result<Value> {
        let types: Vec<Type> = args.iter().map(Value::type_of).collect();
        if !self.accepts(&types) {
            return Err(Error::TypeMismatch {
                op: self.name.to_string(),
                found: types,
            });
        }
        (self.eval)(args, ctx)
    }

    /// One line per signature, e.g. `Int | BigInt | Real, Vec2 | Vec3 | Vec4`.
    pub fn signature_strings(&self) -> Vec<String> {
        self.signatures
            .iter()
            .map(|sig| {
                let parts: Vec<String> = sig.iter().map(|set| set.to_string()).collect();
                if parts.is_empty() {
                    "()".to_string()
                } else {
                    parts.join(", ")
                }
            })
            .collect()
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("category", &self.category)
            .field("arity", &self.arity())
            .finish()
    }
}

// ============================================================================
// Library trait
// ============================================================================

/// A group of operators registered together.
pub trait Library: Send + Sync {
    /// Get the library ID.
    fn id(&self) -> LibId;

    /// Get the library name.
    fn name(&self) -> &'static str;

    /// Operators provided by this library.
    fn operators(&self) -> Vec<Operator>;
}

/// The libraries that make up the standard catalog.
pub fn standard_libraries() -> Vec<Box<dyn Library>> {
    vec![
        Box::new(ArithLib),
        Box::new(TranscendentalsLib),
        Box::new(LinalgLib),
        Box::new(ConvertLib),
        Box::new(ConstantsLib),
        Box::new(UnitsLib),
    ]
}

// ============================================================================
// Argument helpers
// ============================================================================

/// Scalar argument as a real. Signatures guarantee the shape.
pub(crate) fn real_arg(op: &str, value: &Value) -> Result<f64> {
    value
        .as_real()
        .ok_or_else(|| Error::Unreachable(format!("'{op}' received non-scalar {}", value.type_of())))
}

/// Fixed-size argument slice. Signatures guarantee the arity.
pub(crate) fn args_n<'a, const N: usize>(op: &str, args: &'a [Value]) -> Result<&'a [Value; N]> {
    args.try_into()
        .map_err(|_| Error::Unreachable(format!("'{op}' expected {N} argument(s), got {}", args.len())))
}
