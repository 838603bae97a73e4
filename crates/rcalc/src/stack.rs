//! Calculator operand stack.
//!
//! The stack is a persistent [`im::Vector`] of [`StackItem`]s, so taking a
//! snapshot is O(1) and shares structure with the live stack. Index 0 is the
//! bottom (oldest) item.
//!
//! Every mutation returns the [`StackDelta`]s that describe it. Observers
//! replay deltas; they never diff two stacks themselves.

use std::sync::Arc;

use im::Vector;
use parking_lot::RwLock;
use smallvec::{SmallVec, smallvec};

use crate::displayable::DisplayChain;
use crate::error::{Error, Result};
use crate::value::{Type, Value};

/// One committed stack entry: the input that produced it and its result.
#[derive(Clone, Debug, PartialEq)]
pub struct StackItem {
    input: Arc<DisplayChain>,
    result: Value,
}

impl StackItem {
    pub fn new(input: DisplayChain, result: Value) -> Self {
        Self {
            input: Arc::new(input),
            result,
        }
    }

    pub fn from_shared(input: Arc<DisplayChain>, result: Value) -> Self {
        Self { input, result }
    }

    pub fn input(&self) -> &Arc<DisplayChain> {
        &self.input
    }

    pub fn result(&self) -> &Value {
        &self.result
    }
}

/// A change to the stack, as seen by an observer.
#[derive(Clone, Debug, PartialEq)]
pub enum StackDelta {
    /// An item was pushed on top.
    Add(StackItem),
    /// The top item was removed.
    Remove,
    /// The whole stack was replaced by these items, oldest first.
    Replace(Vec<StackItem>),
}

/// Deltas produced by one mutation.
pub type Deltas = SmallVec<[StackDelta; 4]>;

/// Immutable point-in-time view of the stack.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    items: Vector<StackItem>,
    version: u64,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StackItem> {
        self.items.get(index)
    }

    /// Items from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &StackItem> {
        self.items.iter()
    }

    /// Result values from bottom to top.
    pub fn values(&self) -> Vec<Value> {
        self.items.iter().map(|item| item.result.clone()).collect()
    }

    /// Number of stack mutations this snapshot reflects.
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// The operand stack.
#[derive(Clone, Debug, Default)]
pub struct Stack {
    items: Vector<StackItem>,
    max_depth: Option<usize>,
    version: u64,
}

impl Stack {
    /// Create a new empty, unbounded stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stack that refuses to grow beyond `max_depth` items.
    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StackItem> {
        self.items.get(index)
    }

    /// Top of stack.
    pub fn top(&self) -> Option<&StackItem> {
        self.items.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StackItem> {
        self.items.iter()
    }

    /// Result types from bottom to top.
    pub fn types(&self) -> Vec<Type> {
        self.items.iter().map(|item| item.result.type_of()).collect()
    }

    fn check_depth(&self, new_len: usize) -> Result<()> {
        match self.max_depth {
            Some(limit) if new_len > limit => Err(Error::StackOverflow { limit }),
            _ => Ok(()),
        }
    }

    fn underflow(op: &str, needed: usize, available: usize) -> Error {
        Error::StackUnderflow {
            op: op.to_string(),
            needed,
            available,
        }
    }

    /// Push an item on top.
    pub fn push(&mut self, item: StackItem) -> Result<StackDelta> {
        self.check_depth(self.items.len() + 1)?;
        self.items.push_back(item.clone());
        self.version += 1;
        Ok(StackDelta::Add(item))
    }

    /// Remove and return the top item.
    pub fn pop(&mut self) -> Result<(StackItem, StackDelta)> {
        let item = self
            .items
            .pop_back()
            .ok_or_else(|| Self::underflow("pop", 1, 0))?;
        self.version += 1;
        Ok((item, StackDelta::Remove))
    }

    /// Replace `count` items starting at `start` with `items`.
    ///
    /// Replacing a suffix yields one `Remove` per removed item followed by
    /// one `Add` per new item. Replacing an interior range yields a single
    /// `Replace` of the whole stack.
    pub fn replace_range(
        &mut self,
        start: usize,
        count: usize,
        items: Vec<StackItem>,
    ) -> Result<Deltas> {
        let len = self.items.len();
        let end = start
            .checked_add(count)
            .filter(|end| *end <= len)
            .ok_or_else(|| Self::underflow("replace", start.saturating_add(count), len))?;
        self.check_depth(len - count + items.len())?;

        let mut tail = self.items.split_off(start);
        let rest = tail.split_off(count);
        let suffix = end == len;

        let deltas = if suffix {
            let mut deltas: Deltas = (0..count).map(|_| StackDelta::Remove).collect();
            deltas.extend(items.iter().cloned().map(StackDelta::Add));
            deltas
        } else {
            Deltas::new()
        };

        self.items.extend(items);
        self.items.append(rest);
        self.version += 1;

        if suffix {
            Ok(deltas)
        } else {
            Ok(smallvec![StackDelta::Replace(self.items.iter().cloned().collect())])
        }
    }

    /// Remove every item.
    pub fn clear(&mut self) -> StackDelta {
        self.items.clear();
        self.version += 1;
        StackDelta::Replace(Vec::new())
    }

    /// O(1) immutable view of the current contents.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            items: self.items.clone(),
            version: self.version,
        }
    }

    /// Replace the contents with a snapshot's items.
    pub fn restore(&mut self, snapshot: &Snapshot) -> StackDelta {
        self.items = snapshot.items.clone();
        self.version += 1;
        StackDelta::Replace(self.items.iter().cloned().collect())
    }
}

/// Shared, thread-safe handle to the last committed snapshot.
///
/// The engine publishes only at commit, so readers see whole versions.
#[derive(Clone, Debug, Default)]
pub struct SnapshotReader {
    shared: Arc<RwLock<Snapshot>>,
}

impl SnapshotReader {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            shared: Arc::new(RwLock::new(initial)),
        }
    }

    /// The last committed snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.shared.read().clone()
    }

    pub(crate) fn publish(&self, snapshot: Snapshot) {
        *self.shared.write() = snapshot;
    }
}
