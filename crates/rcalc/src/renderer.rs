//! Renderer contract.
//!
//! The engine reports everything it does through a [`Renderer`] supplied at
//! construction. Stack changes arrive as explicit add/remove/replace calls
//! carrying [`RenderedItem`]s, so a renderer never has to inspect values or
//! walk display chains itself.

use crate::stack::StackItem;
use crate::value::{FormatTags, Type, accessibility_description};

/// A stack item flattened for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedItem {
    /// Input fragments, each plain text or a formatted value.
    pub input: Vec<String>,
    /// Formatted result.
    pub output: String,
    pub output_type: Type,
    /// Long-form description for screen readers.
    pub accessibility: String,
}

impl RenderedItem {
    /// Render `item`, filling unset result tags from `defaults`.
    pub fn from_item(item: &StackItem, defaults: FormatTags) -> Self {
        let tags = item.input().tags().or(defaults);
        Self {
            input: item.input().rendered(),
            output: item.result().to_string_with(tags),
            output_type: item.result().type_of(),
            accessibility: accessibility_description(item.result()),
        }
    }
}

/// Presentation-layer callbacks.
pub trait Renderer {
    fn display_info(&mut self, message: &str);

    fn display_error(&mut self, message: &str);

    /// Whether the presentation layer takes over a `\`-command.
    ///
    /// Asked while a line is evaluated, before the built-in command table,
    /// so it must not have side effects. A claimed command is run through
    /// [`Renderer::try_render_command`] only if the whole line commits.
    fn handles_command(&self, _command: &str) -> bool {
        false
    }

    /// Run a claimed command, after the line's stack changes were reported.
    ///
    /// Returning `true` means the command was handled.
    fn try_render_command(&mut self, _command: &str) -> bool {
        false
    }

    /// An item was pushed on top.
    fn add_stack_item(&mut self, item: &RenderedItem);

    /// The top item was removed.
    fn remove_stack_item(&mut self);

    /// The whole stack was replaced; `items` are oldest first.
    fn replace_stack_items(&mut self, items: &[RenderedItem]);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn display_info(&mut self, message: &str) {
        (**self).display_info(message);
    }

    fn display_error(&mut self, message: &str) {
        (**self).display_error(message);
    }

    fn handles_command(&self, command: &str) -> bool {
        (**self).handles_command(command)
    }

    fn try_render_command(&mut self, command: &str) -> bool {
        (**self).try_render_command(command)
    }

    fn add_stack_item(&mut self, item: &RenderedItem) {
        (**self).add_stack_item(item);
    }

    fn remove_stack_item(&mut self) {
        (**self).remove_stack_item();
    }

    fn replace_stack_items(&mut self, items: &[RenderedItem]) {
        (**self).replace_stack_items(items);
    }
}

/// Renderer that discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn display_info(&mut self, _message: &str) {}

    fn display_error(&mut self, _message: &str) {}

    fn add_stack_item(&mut self, _item: &RenderedItem) {}

    fn remove_stack_item(&mut self) {}

    fn replace_stack_items(&mut self, _items: &[RenderedItem]) {}
}
