// src/cli/handlers/history.rs

use crate::cli::shell::ShellState;
use crate::core::context::Logger;
use crate::core::registry::CommandBuilder;
use colored::*;
use std::rc::Rc;

/// `history` lists this session's lines; `history clear` forgets them.
pub fn register(builder: &mut CommandBuilder<'_>, state: &Rc<ShellState>) {
    let list_state = Rc::clone(state);
    let clear_state = Rc::clone(state);

    builder
        .add("history", move |log: Logger| {
            let history = list_state.history();
            if history.is_empty() {
                log.info(t!("history.empty"));
                return;
            }
            for (index, line) in history.iter().enumerate() {
                let entry = format!(t!("history.entry"), index = index + 1, line = line);
                println!("{}", entry.dimmed());
            }
        })
        .add("history clear", move |log: Logger| {
            let count = clear_state.history_mut().clear();
            log.info(&format!(t!("history.cleared"), count = count));
        });
}
