// src/cli/handlers/help.rs

use crate::cli::shell::ShellState;
use crate::core::registry::CommandBuilder;
use colored::*;
use std::rc::Rc;

/// `help`: lists every command with its argument hint.
pub fn register(builder: &mut CommandBuilder<'_>, state: &Rc<ShellState>) {
    let state = Rc::clone(state);
    builder.add("help", move || {
        println!("\n{}", t!("help.header").yellow().bold());
        for usage in state.help_index().iter() {
            println!("  {}", usage.cyan());
        }
        println!();
    });
}
