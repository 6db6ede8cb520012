// src/cli/handlers/session.rs

use crate::cli::shell::ShellState;
use crate::core::registry::CommandBuilder;
use std::io::Write;
use std::rc::Rc;

/// `quit`/`exit` end the interactive loop; `clear` wipes the terminal.
pub fn register(builder: &mut CommandBuilder<'_>, state: &Rc<ShellState>) {
    for route in ["quit", "exit"] {
        let state = Rc::clone(state);
        builder.add(route, move || state.request_quit());
    }

    builder.add("clear", || {
        print!("\x1b[2J\x1b[H");
        if let Err(e) = std::io::stdout().flush() {
            log::debug!("Failed to flush stdout: {}", e);
        }
    });
}
