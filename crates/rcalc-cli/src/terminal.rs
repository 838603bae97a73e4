//! Terminal renderer.
//!
//! Mirrors the engine stack by replaying add/remove/replace notifications
//! and prints it RPL-style, deepest level first:
//!
//! ```text
//! 2: 3
//! 1: [1, 2]
//! ```

use rcalc::{CommandTable, OperatorRegistry, RenderedItem, Renderer, units};

/// Commands the terminal runs itself.
const TERMINAL_COMMANDS: &[&str] = &["\\help", "\\units", "\\quit", "\\q"];

/// Renderer writing to stdout and stderr.
#[derive(Debug)]
pub struct TerminalRenderer {
    registry: &'static OperatorRegistry,
    items: Vec<RenderedItem>,
    quit: bool,
}

impl TerminalRenderer {
    /// `registry` is the catalog `\help` lists; pass the engine's own.
    pub fn new(registry: &'static OperatorRegistry) -> Self {
        Self {
            registry,
            items: Vec::new(),
            quit: false,
        }
    }

    /// Mirrored stack, oldest first.
    pub fn items(&self) -> &[RenderedItem] {
        &self.items
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn stack_lines(&self) -> Vec<String> {
        let items = self.items();
        items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}: {}", items.len() - i, item.output))
            .collect()
    }

    pub fn print_stack(&self) {
        for line in self.stack_lines() {
            println!("{line}");
        }
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("  \\help               Show this help");
        println!("  \\units              List unit families");
        println!("  \\quit (\\q)          Exit");
        for info in CommandTable::commands() {
            let names: Vec<String> = info.names().map(|n| format!("\\{n}")).collect();
            println!("  {:<20} {}", names.join(" "), info.description);
        }
        println!();
        print_operators(self.registry);
    }
}

/// Print every unit family with its base type and units.
pub fn print_units() {
    for family in units::families() {
        println!("{} (base type: {}):", family.name, family.base_type);
        for unit in family.units {
            println!("  {:<20} {}", unit.usage(), unit.description);
        }
    }
}

/// Print every operator, grouped by category.
pub fn print_operators(registry: &OperatorRegistry) {
    for category in registry.categories() {
        println!("{}:", category.name);
        for op in &category.operators {
            let mut names = vec![op.name];
            names.extend(op.aliases.iter().copied());
            println!("  {:<20} {}", names.join(" "), op.description);
        }
    }
}

impl Renderer for TerminalRenderer {
    fn display_info(&mut self, message: &str) {
        println!("{message}");
    }

    fn display_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }

    fn handles_command(&self, command: &str) -> bool {
        TERMINAL_COMMANDS.contains(&command)
    }

    fn try_render_command(&mut self, command: &str) -> bool {
        match command {
            "\\help" => {
                self.print_help();
                true
            }
            "\\units" => {
                print_units();
                true
            }
            "\\quit" | "\\q" => {
                self.quit = true;
                true
            }
            _ => false,
        }
    }

    fn add_stack_item(&mut self, item: &RenderedItem) {
        self.items.push(item.clone());
    }

    fn remove_stack_item(&mut self) {
        self.items.pop();
    }

    fn replace_stack_items(&mut self, items: &[RenderedItem]) {
        self.items = items.to_vec();
    }
}
