//! RCalc: a typed-value RPN calculator engine.
//!
//! A presentation layer submits lines of text; the engine evaluates each
//! line atomically against an operand stack and reports the resulting
//! changes through a [`Renderer`].
//!
//! # Architecture
//!
//! ```text
//! line → tokenize → literal | operator | \command → working stack → commit
//!                                                                     ↓
//!                                            history, renderer deltas, snapshot
//! ```
//!
//! # Key Design Decisions
//!
//! 1. **Closed value set**: Int, BigInt, Real, fixed vectors and matrices, Unit
//! 2. **Operators are data**: name, type signatures, pure eval function
//! 3. **Persistent stack**: snapshots and undo history share structure
//! 4. **Explicit deltas**: renderers replay changes, they never diff
//!
//! # Example
//!
//! ```
//! use rcalc::{Engine, EngineConfig, NullRenderer, Value};
//!
//! let mut engine = Engine::new(EngineConfig::default(), NullRenderer).unwrap();
//! engine.submit_text("2 3 pow 1 sub").unwrap();
//! assert_eq!(engine.snapshot().values(), vec![Value::int(7)]);
//! ```

pub mod autocomplete;
pub mod commands;
pub mod config;
pub mod displayable;
pub mod engine;
pub mod error;
pub mod history;
pub mod libs;
pub mod literal;
pub mod registry;
pub mod renderer;
pub mod stack;
pub mod token;
pub mod units;
pub mod value;

pub use autocomplete::{AutocompleteManager, SuggestionSource};
pub use commands::{Command, CommandInfo, CommandTable};
pub use config::{ConfigError, EngineConfig, IntegerPromotion};
pub use displayable::{DisplayChain, Displayable, Fragment};
pub use engine::{Engine, OperatorExample};
pub use error::{Error, ErrorKind, Result};
pub use history::History;
pub use registry::OperatorRegistry;
pub use renderer::{NullRenderer, RenderedItem, Renderer};
pub use stack::{Snapshot, SnapshotReader, Stack, StackDelta, StackItem};
pub use units::{UnitDef, UnitFamily};
pub use value::{FormatTags, Radix, Type, TypeSet, Value};
