//! Submission engine.
//!
//! [`Engine`] owns the stack, the undo history, and the renderer. Each call
//! to [`Engine::submit_text`] is one atomic submission:
//!
//! 1. The line is tokenized.
//! 2. Every token is applied to a working copy of the stack, in order, as a
//!    literal, an operator, or a `\`-command (first match wins).
//! 3. If every token succeeded, the working copy becomes the stack, the
//!    previous version goes to the history, the buffered deltas go to the
//!    renderer, and the new snapshot is published to readers.
//!
//! If any token fails, none of step 3 happens. The error is reported through
//! [`Renderer::display_error`] and also returned.
//!
//! # Example
//!
//! ```
//! use rcalc::{Engine, EngineConfig, NullRenderer, Value};
//!
//! let mut engine = Engine::new(EngineConfig::default(), NullRenderer).unwrap();
//! engine.submit_text("3 4 add 2 mul").unwrap();
//! assert_eq!(engine.snapshot().values(), vec![Value::int(14)]);
//! ```

use std::sync::Arc;

use smallvec::{SmallVec, smallvec};
use tracing::{debug, error, trace, warn};

use crate::autocomplete::SuggestionSource;
use crate::commands::{Command, CommandTable};
use crate::config::EngineConfig;
use crate::displayable::DisplayChain;
use crate::error::{Error, Result};
use crate::history::History;
use crate::libs::{EvalContext, Operator};
use crate::literal::parse_literal;
use crate::registry::OperatorRegistry;
use crate::renderer::{NullRenderer, RenderedItem, Renderer};
use crate::stack::{Deltas, Snapshot, SnapshotReader, Stack, StackDelta, StackItem};
use crate::token::tokenize;
use crate::units;
use crate::value::{FormatTags, Type, Value};

/// An example line of an operator and the stack it leaves behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorExample {
    pub line: &'static str,
    pub items: Vec<RenderedItem>,
}

// ============================================================================
// Dispatcher
// ============================================================================

/// What the caller must still do after a token was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Done,
    /// A `\`-command the renderer claimed, run once the line commits.
    Claimed,
    /// An `\undo` or `\redo`, which only the engine can carry out.
    History(Command),
}

/// Resolves tokens against a working stack.
///
/// Holds no mutable state, so the engine can use it both for real
/// submissions and for autocomplete dry runs.
#[derive(Clone, Copy, Debug)]
struct Dispatcher {
    registry: &'static OperatorRegistry,
    ctx: EvalContext,
    /// Tags applied to literals that carry none of their own.
    defaults: FormatTags,
}

impl Dispatcher {
    /// Apply one token to `work`, appending the resulting deltas.
    ///
    /// `claims` is asked about every `\`-token before the command table.
    fn step(
        &self,
        work: &mut Stack,
        token: &str,
        deltas: &mut Vec<StackDelta>,
        claims: &dyn Fn(&str) -> bool,
    ) -> Result<Step> {
        if let Some(literal) = parse_literal(token)? {
            trace!(token, ty = %literal.value.type_of(), "literal");
            let tags = literal.tags.or(self.defaults);
            let item = StackItem::new(DisplayChain::value(literal.value.clone(), tags), literal.value);
            deltas.push(work.push(item)?);
            return Ok(Step::Done);
        }

        if let Some(op) = self.registry.find_by_name(token) {
            trace!(token, op = op.name, "operator");
            deltas.extend(self.apply_operator(work, op)?);
            return Ok(Step::Done);
        }

        if token.starts_with('\\') {
            if claims(token) {
                trace!(token, "command claimed by renderer");
                return Ok(Step::Claimed);
            }
            let info =
                CommandTable::find(token).ok_or_else(|| Error::UnknownCommand(token.to_string()))?;
            trace!(token, command = info.name, "command");
            if info.command.is_history() {
                return Ok(Step::History(info.command));
            }
            deltas.extend(run_command(work, info.command)?);
            return Ok(Step::Done);
        }

        Err(Error::parse(token, "not a literal, operator, or command"))
    }

    /// Replace the operator's operands with its result.
    fn apply_operator(&self, work: &mut Stack, op: &Operator) -> Result<Deltas> {
        let arity = op.arity();
        let available = work.len();
        if arity > available {
            return Err(Error::StackUnderflow {
                op: op.name.to_string(),
                needed: arity,
                available,
            });
        }

        let start = available - arity;
        let (args, inputs): (SmallVec<[Value; 4]>, SmallVec<[Arc<DisplayChain>; 4]>) = work
            .iter()
            .skip(start)
            .map(|item| (item.result().clone(), Arc::clone(item.input())))
            .unzip();

        let result = op.apply(&args, &self.ctx)?;
        let input = DisplayChain::application(&inputs, op.name);
        work.replace_range(start, arity, vec![StackItem::new(input, result)])
    }

    /// Stack types after evaluating `line` on top of `stack`, without
    /// committing anything or touching the renderer.
    fn dry_run(
        &self,
        stack: &Stack,
        line: &str,
        claims: &dyn Fn(&str) -> bool,
    ) -> Result<Vec<Type>> {
        let mut work = stack.clone();
        let mut deltas = Vec::new();
        for token in tokenize(line)? {
            if let Step::History(command) = self.step(&mut work, token.text, &mut deltas, claims)? {
                return Err(Error::parse(
                    token.text,
                    format!("{command:?} cannot be previewed"),
                ));
            }
        }
        Ok(work.types())
    }
}

fn underflow(op: &str, needed: usize, available: usize) -> Error {
    Error::StackUnderflow {
        op: op.to_string(),
        needed,
        available,
    }
}

/// Run a non-history command on `work`.
fn run_command(work: &mut Stack, command: Command) -> Result<Deltas> {
    match command {
        Command::Clear => Ok(smallvec![work.clear()]),
        Command::Pop => work.pop().map(|(_, delta)| smallvec![delta]),
        Command::Dup => {
            let top = work.top().cloned().ok_or_else(|| underflow("dup", 1, 0))?;
            Ok(smallvec![work.push(top)?])
        }
        Command::Swap => {
            let len = work.len();
            if len < 2 {
                return Err(underflow("swap", 2, len));
            }
            let (Some(below), Some(top)) = (work.get(len - 2).cloned(), work.get(len - 1).cloned())
            else {
                return Err(Error::Unreachable("swap operands vanished".to_string()));
            };
            work.replace_range(len - 2, 2, vec![top, below])
        }
        Command::Undo | Command::Redo => Err(Error::Unreachable(format!(
            "{command:?} reached the stack command runner"
        ))),
    }
}

// ============================================================================
// Engine
// ============================================================================

/// The calculator engine.
pub struct Engine<R: Renderer> {
    dispatcher: Dispatcher,
    stack: Stack,
    history: History,
    reader: SnapshotReader,
    config: EngineConfig,
    renderer: R,
}

impl<R: Renderer> Engine<R> {
    /// Create an engine over the standard operator libraries.
    ///
    /// Fails only if the standard registry cannot be built.
    pub fn new(config: EngineConfig, renderer: R) -> Result<Self> {
        Self::with_registry(OperatorRegistry::standard()?, config, renderer)
    }

    /// Create an engine over a custom registry.
    pub fn with_registry(
        registry: &'static OperatorRegistry,
        config: EngineConfig,
        renderer: R,
    ) -> Result<Self> {
        let stack = Stack::with_max_depth(config.max_stack_depth);
        let dispatcher = Dispatcher {
            registry,
            ctx: EvalContext::new(config.integer_promotion)
                .with_max_integer_bits(config.max_integer_bits),
            defaults: FormatTags::default().with_precision(config.real_precision),
        };
        debug!(
            operators = registry.len(),
            promotion = ?config.integer_promotion,
            "engine created"
        );
        Ok(Self {
            dispatcher,
            reader: SnapshotReader::new(stack.snapshot()),
            history: History::new(config.history_limit),
            stack,
            config,
            renderer,
        })
    }

    /// Evaluate one line of input atomically.
    ///
    /// An empty or whitespace-only line does nothing.
    pub fn submit_text(&mut self, text: &str) -> Result<()> {
        debug!(text, "submission");
        match self.evaluate(text) {
            Ok(()) => Ok(()),
            Err(err) => {
                if matches!(err, Error::Unreachable(_)) {
                    error!(%err, text, "internal error, submission aborted");
                } else {
                    debug!(%err, "submission rejected");
                }
                self.renderer.display_error(&err.to_string());
                Err(err)
            }
        }
    }

    fn evaluate(&mut self, text: &str) -> Result<()> {
        let tokens = tokenize(text)?;
        if tokens.is_empty() {
            return Ok(());
        }

        let mut work = self.stack.clone();
        let mut deltas = Vec::new();
        let mut history_step = None;
        let mut claimed = Vec::new();
        let renderer = &self.renderer;
        for token in &tokens {
            let step = self.dispatcher.step(&mut work, token.text, &mut deltas, &|cmd| {
                renderer.handles_command(cmd)
            })?;
            match step {
                Step::Done => {}
                Step::Claimed => claimed.push(token.text),
                Step::History(command) => {
                    if tokens.len() != 1 {
                        return Err(Error::parse(
                            token.text,
                            "must be the only token of its line",
                        ));
                    }
                    history_step = Some(command);
                }
            }
        }

        match history_step {
            Some(command) => self.step_history(command),
            None => {
                if !deltas.is_empty() {
                    let previous = std::mem::replace(&mut self.stack, work);
                    self.history.record(previous.snapshot());
                }
                self.commit(&deltas);
            }
        }

        for command in claimed {
            if !self.renderer.try_render_command(command) {
                warn!(command, "claimed command was not handled");
            }
        }
        Ok(())
    }

    fn step_history(&mut self, command: Command) {
        let current = self.stack.snapshot();
        let target = match command {
            Command::Undo => self.history.undo(current),
            _ => self.history.redo(current),
        };
        match target {
            Some(snapshot) => {
                let delta = self.stack.restore(&snapshot);
                self.commit(&[delta]);
            }
            None => {
                let message = match command {
                    Command::Undo => "nothing to undo",
                    _ => "nothing to redo",
                };
                self.renderer.display_info(message);
            }
        }
    }

    /// Flush deltas for the already-installed stack and publish it.
    fn commit(&mut self, deltas: &[StackDelta]) {
        if deltas.is_empty() {
            return;
        }
        let defaults = self.dispatcher.defaults;
        if deltas.iter().any(|d| matches!(d, StackDelta::Replace(_))) {
            let items: Vec<RenderedItem> = self
                .stack
                .iter()
                .map(|item| RenderedItem::from_item(item, defaults))
                .collect();
            self.renderer.replace_stack_items(&items);
        } else {
            for delta in deltas {
                match delta {
                    StackDelta::Add(item) => self
                        .renderer
                        .add_stack_item(&RenderedItem::from_item(item, defaults)),
                    StackDelta::Remove => self.renderer.remove_stack_item(),
                    StackDelta::Replace(_) => {}
                }
            }
        }

        let snapshot = self.stack.snapshot();
        debug!(depth = snapshot.len(), version = snapshot.version(), "committed");
        self.reader.publish(snapshot);
    }

    /// Handle for reading committed snapshots from other threads.
    pub fn reader(&self) -> SnapshotReader {
        self.reader.clone()
    }

    /// The last committed snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.stack.snapshot()
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Current stack rendered with the configured defaults, oldest first.
    pub fn rendered_stack(&self) -> Vec<RenderedItem> {
        self.stack
            .iter()
            .map(|item| RenderedItem::from_item(item, self.dispatcher.defaults))
            .collect()
    }

    pub fn registry(&self) -> &'static OperatorRegistry {
        self.dispatcher.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Evaluate each example line of operator `name` in a scratch engine.
    pub fn operator_examples(&self, name: &str) -> Result<Vec<OperatorExample>> {
        let op = self
            .registry()
            .find_by_name(name)
            .ok_or_else(|| Error::parse(name, "no such operator"))?;
        let config = EngineConfig {
            history_limit: 0,
            ..self.config.clone()
        };

        op.examples
            .iter()
            .map(|&line| {
                let mut scratch = Engine::with_registry(self.registry(), config.clone(), NullRenderer)?;
                scratch.submit_text(line)?;
                Ok(OperatorExample {
                    line,
                    items: scratch.rendered_stack(),
                })
            })
            .collect()
    }
}

impl<R: Renderer> SuggestionSource for Engine<R> {
    /// Complete the last word of `partial`.
    ///
    /// Operator candidates are filtered by the stack the preceding words
    /// would leave behind.
    fn suggestions(&self, partial: &str) -> Vec<String> {
        let split = match partial.rfind(char::is_whitespace) {
            Some(at) => at + partial[at..].chars().next().map_or(1, char::len_utf8),
            None => 0,
        };
        let (prefix, word) = partial.split_at(split);

        if word.starts_with('\\') {
            return CommandTable::complete(word)
                .into_iter()
                .map(|name| format!("{prefix}{name}"))
                .collect();
        }
        if let Some(name) = word.strip_prefix('_') {
            return units::complete(name)
                .into_iter()
                .map(|usage| format!("{prefix}{usage}"))
                .collect();
        }

        let types = if prefix.trim().is_empty() {
            self.stack.types()
        } else {
            self.dispatcher
                .dry_run(&self.stack, prefix, &|cmd| self.renderer.handles_command(cmd))
                .unwrap_or_else(|err| {
                    trace!(%err, "dry run failed, completing against committed stack");
                    self.stack.types()
                })
        };
        self.registry()
            .find_applicable(&types, word)
            .into_iter()
            .map(|candidate| format!("{prefix}{}", candidate.name))
            .collect()
    }
}
