//! Renderable input fragments.
//!
//! A stack item remembers the input that produced it as a [`DisplayChain`]:
//! literal text, owned text, values with formatting tags, and nested chains
//! for operator applications. Renderers never see the nesting. They walk
//! [`DisplayChain::fragments`], which yields only leaf [`Fragment`]s.

use std::sync::Arc;

use crate::value::{FormatTags, Value};

/// One piece of renderable input.
#[derive(Clone, Debug, PartialEq)]
pub enum Displayable {
    /// Static text such as an operator name.
    Literal(&'static str),
    /// Owned text.
    Text(String),
    /// A value rendered with its tags.
    Value { value: Value, tags: FormatTags },
    /// A nested chain, e.g. the input of a consumed operand.
    Recursive(Arc<DisplayChain>),
}

/// An ordered sequence of displayables with chain-level tags.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayChain {
    items: Vec<Displayable>,
    tags: FormatTags,
}

/// A flattened leaf of a chain.
///
/// There is no recursive variant: a leaf can only be text or a value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fragment<'a> {
    Text(&'a str),
    Value(&'a Value, FormatTags),
}

impl Fragment<'_> {
    pub fn render(&self) -> String {
        match self {
            Fragment::Text(text) => (*text).to_string(),
            Fragment::Value(value, tags) => value.to_string_with(*tags),
        }
    }
}

impl DisplayChain {
    pub fn new(items: Vec<Displayable>, tags: FormatTags) -> Self {
        Self { items, tags }
    }

    /// Chain holding a single literal value.
    pub fn value(value: Value, tags: FormatTags) -> Self {
        Self::new(vec![Displayable::Value { value, tags }], tags)
    }

    /// Chain for an operator applied to operands with the given inputs.
    ///
    /// The chain inherits the tags of the first operand, so `0x10 0x01 add`
    /// keeps rendering in hexadecimal.
    pub fn application(operands: &[Arc<DisplayChain>], op_name: &'static str) -> Self {
        let tags = operands.first().map(|c| c.tags).unwrap_or_default();
        let mut items: Vec<Displayable> = operands
            .iter()
            .map(|c| Displayable::Recursive(Arc::clone(c)))
            .collect();
        items.push(Displayable::Literal(op_name));
        Self::new(items, tags)
    }

    pub fn tags(&self) -> FormatTags {
        self.tags
    }

    pub fn items(&self) -> &[Displayable] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.fragments().next().is_none()
    }

    /// Depth-first iterator over leaf fragments.
    pub fn fragments(&self) -> Fragments<'_> {
        Fragments {
            stack: vec![self.items.iter()],
        }
    }

    /// Rendered leaf fragments, in order.
    pub fn rendered(&self) -> Vec<String> {
        self.fragments().map(|f| f.render()).collect()
    }
}

/// Iterator returned by [`DisplayChain::fragments`].
pub struct Fragments<'a> {
    stack: Vec<std::slice::Iter<'a, Displayable>>,
}

impl<'a> Iterator for Fragments<'a> {
    type Item = Fragment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                None => {
                    self.stack.pop();
                }
                Some(Displayable::Literal(text)) => return Some(Fragment::Text(text)),
                Some(Displayable::Text(text)) => return Some(Fragment::Text(text)),
                Some(Displayable::Value { value, tags }) => {
                    return Some(Fragment::Value(value, *tags));
                }
                Some(Displayable::Recursive(chain)) => self.stack.push(chain.items.iter()),
            }
        }
    }
}
