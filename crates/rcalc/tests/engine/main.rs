//! End-to-end engine tests.
//!
//! These tests drive the engine through `submit_text`, the way a
//! presentation layer does, and check the stack, the renderer
//! notifications, and the published snapshots.
//! Tests are organized into modules by functionality.

use rcalc::{Engine, EngineConfig, ErrorKind, RenderedItem, Renderer, Value};

// Test modules
mod arithmetic;
mod autocomplete;
mod concurrency;
mod errors;
mod history;
mod literals;
mod properties;
mod rendering;
mod units;
mod vectors;

// ============================================================================
// Recording renderer
// ============================================================================

/// One renderer notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Info(String),
    Error(String),
    Add(RenderedItem),
    Remove,
    Replace(Vec<RenderedItem>),
    /// A claimed `\`-command was run.
    Command(String),
}

/// Renderer that records everything and handles `\help` itself.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
    pub handled: Vec<String>,
}

impl Recorder {
    pub fn take(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

impl Renderer for Recorder {
    fn display_info(&mut self, message: &str) {
        self.events.push(Event::Info(message.to_string()));
    }

    fn display_error(&mut self, message: &str) {
        self.events.push(Event::Error(message.to_string()));
    }

    fn handles_command(&self, command: &str) -> bool {
        command == "\\help"
    }

    fn try_render_command(&mut self, command: &str) -> bool {
        self.handled.push(command.to_string());
        self.events.push(Event::Command(command.to_string()));
        true
    }

    fn add_stack_item(&mut self, item: &RenderedItem) {
        self.events.push(Event::Add(item.clone()));
    }

    fn remove_stack_item(&mut self) {
        self.events.push(Event::Remove);
    }

    fn replace_stack_items(&mut self, items: &[RenderedItem]) {
        self.events.push(Event::Replace(items.to_vec()));
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub fn engine() -> Engine<Recorder> {
    engine_with(EngineConfig::default())
}

pub fn engine_with(config: EngineConfig) -> Engine<Recorder> {
    Engine::new(config, Recorder::default()).unwrap_or_else(|e| panic!("engine failed: {e}"))
}

/// Evaluate `line` in a fresh engine and return the stack values.
pub fn eval(line: &str) -> Vec<Value> {
    let mut engine = engine();
    engine
        .submit_text(line)
        .unwrap_or_else(|e| panic!("eval failed for '{line}': {e}"));
    engine.snapshot().values()
}

/// Evaluate `line` in a fresh engine and return the formatted results.
pub fn outputs(line: &str) -> Vec<String> {
    let mut engine = engine();
    engine
        .submit_text(line)
        .unwrap_or_else(|e| panic!("eval failed for '{line}': {e}"));
    engine.rendered_stack().into_iter().map(|item| item.output).collect()
}

/// Evaluate `line` in a fresh engine, expecting an error.
pub fn eval_err(line: &str) -> ErrorKind {
    match engine().submit_text(line) {
        Ok(()) => panic!("expected '{line}' to fail"),
        Err(e) => e.kind(),
    }
}

/// Events reduced to short strings: `+out`, `-`, `=[outs]`, `!msg`, `i:msg`, `\cmd`.
pub fn summarize(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .map(|event| match event {
            Event::Info(msg) => format!("i:{msg}"),
            Event::Error(msg) => format!("!{msg}"),
            Event::Add(item) => format!("+{}", item.output),
            Event::Remove => "-".to_string(),
            Event::Command(command) => command.clone(),
            Event::Replace(items) => {
                let outs: Vec<&str> = items.iter().map(|i| i.output.as_str()).collect();
                format!("=[{}]", outs.join(" "))
            }
        })
        .collect()
}
