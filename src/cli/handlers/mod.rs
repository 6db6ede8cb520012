// src/cli/handlers/mod.rs

//! Built-in commands of the interactive shell. They are registered through
//! the same builder as any host command, so they route, overload and
//! complete the same way.

pub mod help;
pub mod history;
pub mod logger;
pub mod session;

use crate::cli::shell::ShellState;
use crate::cli::terminal_logger::TerminalLogger;
use crate::core::registry::{CommandBuilder, CommandSource};
use std::rc::Rc;
use std::sync::Arc;

/// The shell's built-in command set.
#[derive(Debug, Clone)]
pub struct Builtins {
    state: Rc<ShellState>,
    terminal: Arc<TerminalLogger>,
}

impl Builtins {
    pub fn new(state: Rc<ShellState>, terminal: Arc<TerminalLogger>) -> Self {
        Self { state, terminal }
    }
}

impl CommandSource for Builtins {
    fn register(&self, builder: &mut CommandBuilder<'_>) {
        help::register(builder, &self.state);
        history::register(builder, &self.state);
        logger::register(builder, &self.terminal);
        session::register(builder, &self.state);
    }
}
