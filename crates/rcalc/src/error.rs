//! Engine error types.
//!
//! Every failure the engine can report is a variant of [`Error`]. User-input
//! errors abort the current submission and are shown through the renderer;
//! registration errors stop the engine from being constructed at all.

use thiserror::Error;

use crate::value::Type;

/// Result alias used throughout the engine.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An engine error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A token matches no literal, operator, or command grammar.
    #[error("parse error at '{token}': {reason}")]
    Parse { token: String, reason: String },

    /// Operand types do not fit any signature of the operator.
    #[error("'{op}' cannot be applied to {}", type_list(.found))]
    TypeMismatch { op: String, found: Vec<Type> },

    /// Vector or matrix dimensions do not line up.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("division by zero")]
    DivisionByZero,

    /// The operator needs more operands than the stack holds.
    #[error("'{op}' needs {needed} argument(s), stack has {available}")]
    StackUnderflow {
        op: String,
        needed: usize,
        available: usize,
    },

    #[error("stack is full ({limit} items)")]
    StackOverflow { limit: usize },

    #[error("integer overflow in '{0}'")]
    IntegerOverflow(String),

    /// The operation is undefined for the given value (`sqrt` of a negative).
    #[error("'{op}': {reason}")]
    Domain { op: String, reason: String },

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Two operators claim the same name or alias.
    #[error("operator name '{0}' is already registered")]
    DuplicateOperatorName(String),

    /// An operator's signatures disagree on arity or are empty.
    #[error("operator '{0}' has an invalid signature list")]
    InvalidSignature(String),

    /// Internal invariant violation. Aborts the current operation only.
    #[error("internal error: {0}")]
    Unreachable(String),
}

/// Fieldless discriminant of [`Error`], for matching in callers and tests.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind {
    Parse,
    TypeMismatch,
    ShapeMismatch,
    DivisionByZero,
    StackUnderflow,
    StackOverflow,
    IntegerOverflow,
    Domain,
    UnknownCommand,
    DuplicateOperatorName,
    InvalidSignature,
    Unreachable,
}

impl ErrorKind {
    /// Short stable name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Parse => "ParseError",
            ErrorKind::TypeMismatch => "TypeMismatch",
            ErrorKind::ShapeMismatch => "ShapeMismatch",
            ErrorKind::DivisionByZero => "DivisionByZero",
            ErrorKind::StackUnderflow => "StackUnderflow",
            ErrorKind::StackOverflow => "StackOverflow",
            ErrorKind::IntegerOverflow => "IntegerOverflow",
            ErrorKind::Domain => "DomainError",
            ErrorKind::UnknownCommand => "UnknownCommand",
            ErrorKind::DuplicateOperatorName => "DuplicateOperatorName",
            ErrorKind::InvalidSignature => "InvalidSignature",
            ErrorKind::Unreachable => "UnreachableState",
        }
    }
}

impl Error {
    /// Build a parse error for `token`.
    pub fn parse(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Parse {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Build a domain error for operator `op`.
    pub fn domain(op: &str, reason: impl Into<String>) -> Self {
        Error::Domain {
            op: op.to_string(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse { .. } => ErrorKind::Parse,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::ShapeMismatch(_) => ErrorKind::ShapeMismatch,
            Error::DivisionByZero => ErrorKind::DivisionByZero,
            Error::StackUnderflow { .. } => ErrorKind::StackUnderflow,
            Error::StackOverflow { .. } => ErrorKind::StackOverflow,
            Error::IntegerOverflow(_) => ErrorKind::IntegerOverflow,
            Error::Domain { .. } => ErrorKind::Domain,
            Error::UnknownCommand(_) => ErrorKind::UnknownCommand,
            Error::DuplicateOperatorName(_) => ErrorKind::DuplicateOperatorName,
            Error::InvalidSignature(_) => ErrorKind::InvalidSignature,
            Error::Unreachable(_) => ErrorKind::Unreachable,
        }
    }

    /// Whether this error means the engine cannot be used at all.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::DuplicateOperatorName | ErrorKind::InvalidSignature
        )
    }
}

fn type_list(types: &[Type]) -> String {
    if types.is_empty() {
        return "no arguments".to_string();
    }
    types
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ")
}
