//! Operator registry.
//!
//! The registry maintains:
//! - Operators in registration order
//! - Name and alias → operator mapping
//! - The libraries the operators came from
//!
//! Name conflicts are reported when an operator is registered, so a registry
//! that was built successfully can never resolve a name ambiguously.
//!
//! # Example
//!
//! ```
//! use rcalc::libs::{ArithLib, TranscendentalsLib};
//! use rcalc::registry::OperatorRegistry;
//!
//! let mut registry = OperatorRegistry::new();
//! registry.add(&ArithLib).unwrap();
//! registry.add(&TranscendentalsLib).unwrap();
//! assert!(registry.find_by_name("+").is_some());
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::libs::{LibId, Library, Operator, standard_libraries};
use crate::value::Type;

/// An operator matched by name prefix.
#[derive(Clone, Copy, Debug)]
pub struct Applicable<'a> {
    /// The name or alias that matched.
    pub name: &'static str,
    pub operator: &'a Operator,
}

/// Help entry for one operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorHelp {
    pub name: &'static str,
    pub aliases: Vec<&'static str>,
    pub description: &'static str,
    pub arity: usize,
    /// Allowed argument types per signature, as type names.
    pub signatures: Vec<String>,
}

/// Operators sharing a category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub operators: Vec<OperatorHelp>,
}

/// Catalog of operators.
#[derive(Debug, Default)]
pub struct OperatorRegistry {
    operators: Vec<Operator>,
    /// Name or alias → index into `operators`.
    names: HashMap<&'static str, usize>,
    libraries: Vec<(LibId, &'static str)>,
}

static STANDARD: OnceLock<Result<OperatorRegistry>> = OnceLock::new();

impl OperatorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry holding the standard libraries.
    pub fn with_standard() -> Result<Self> {
        let mut registry = Self::new();
        for lib in standard_libraries() {
            registry.add(lib.as_ref())?;
        }
        Ok(registry)
    }

    /// Process-wide standard registry, built on first use.
    pub fn standard() -> Result<&'static OperatorRegistry> {
        STANDARD
            .get_or_init(|| {
                let registry = Self::with_standard();
                if let Ok(r) = &registry {
                    info!(operators = r.len(), "standard operator registry built");
                }
                registry
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Register every operator of a library.
    pub fn add<L: Library + ?Sized>(&mut self, lib: &L) -> Result<()> {
        for op in lib.operators() {
            self.register(op)?;
        }
        debug!(lib = lib.name(), id = lib.id(), "library registered");
        self.libraries.push((lib.id(), lib.name()));
        Ok(())
    }

    /// Register one operator.
    pub fn register(&mut self, op: Operator) -> Result<()> {
        let Some(first) = op.signatures.first() else {
            return Err(Error::InvalidSignature(op.name.to_string()));
        };
        if op.signatures.iter().any(|sig| sig.len() != first.len()) {
            return Err(Error::InvalidSignature(op.name.to_string()));
        }

        let mut seen: Vec<&'static str> = Vec::new();
        for name in op.names() {
            if self.names.contains_key(name) || seen.contains(&name) {
                return Err(Error::DuplicateOperatorName(name.to_string()));
            }
            seen.push(name);
        }

        let index = self.operators.len();
        for name in seen {
            self.names.insert(name, index);
        }
        self.operators.push(op);
        Ok(())
    }

    /// Exact, case-sensitive lookup by name or alias.
    pub fn find_by_name(&self, token: &str) -> Option<&Operator> {
        self.names.get(token).map(|&i| &self.operators[i])
    }

    /// Operators with a name or alias starting with `partial` whose signature
    /// fits the top of the stack.
    ///
    /// `stack_types` is ordered bottom first. Results are sorted by name
    /// length, then lexicographically.
    pub fn find_applicable(&self, stack_types: &[Type], partial: &str) -> Vec<Applicable<'_>> {
        let mut matches: Vec<Applicable<'_>> = self
            .operators
            .iter()
            .filter(|op| op.applicable_to(stack_types))
            .flat_map(|op| {
                op.names()
                    .filter(|name| name.starts_with(partial))
                    .map(move |name| Applicable { name, operator: op })
            })
            .collect();
        matches.sort_by(|a, b| a.name.len().cmp(&b.name.len()).then_with(|| a.name.cmp(b.name)));
        matches
    }

    /// All operators in registration order.
    pub fn operators(&self) -> impl Iterator<Item = &Operator> {
        self.operators.iter()
    }

    /// Registered libraries as `(id, name)`.
    pub fn libraries(&self) -> &[(LibId, &'static str)] {
        &self.libraries
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Operators grouped by category, in order of first appearance.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = Vec::new();
        for op in &self.operators {
            let help = OperatorHelp {
                name: op.name,
                aliases: op.aliases.to_vec(),
                description: op.description,
                arity: op.arity(),
                signatures: op.signature_strings(),
            };
            match categories.iter_mut().find(|c| c.name == op.category) {
                Some(category) => category.operators.push(help),
                None => categories.push(Category {
                    name: op.category,
                    operators: vec![help],
                }),
            }
        }
        categories
    }
}
