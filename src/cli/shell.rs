// src/cli/shell.rs

//! The interactive line loop around a [`Console`].

use crate::cli::handlers::Builtins;
use crate::cli::history::History;
use crate::cli::terminal_logger::TerminalLogger;
use crate::console::Console;
use crate::core::context::Logger;
use crate::core::dispatcher::DispatchOutcome;
use crate::core::registry::{CommandSource, RegistrationError};
use crate::system::config::ConsoleConfig;
use colored::*;
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::sync::Arc;

/// Session state the built-in commands read and change.
#[derive(Debug)]
pub struct ShellState {
    history: RefCell<History>,
    help_index: RefCell<Vec<String>>,
    quit_requested: Cell<bool>,
}

impl ShellState {
    pub fn new(max_history: usize) -> Self {
        Self {
            history: RefCell::new(History::new(max_history)),
            help_index: RefCell::new(Vec::new()),
            quit_requested: Cell::new(false),
        }
    }

    pub fn history(&self) -> Ref<'_, History> {
        self.history.borrow()
    }

    pub fn history_mut(&self) -> RefMut<'_, History> {
        self.history.borrow_mut()
    }

    /// One usage line per command path, e.g. `logger level [level]`.
    pub fn help_index(&self) -> Ref<'_, Vec<String>> {
        self.help_index.borrow()
    }

    pub fn request_quit(&self) {
        self.quit_requested.set(true);
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested.get()
    }
}

/// What a single shell line did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line ended in `?` and was answered with suggestions.
    Suggested,
    Executed(DispatchOutcome),
}

/// A console with the built-in commands, driven line by line.
#[derive(Debug)]
pub struct Shell {
    console: Console,
    state: Rc<ShellState>,
    max_suggestions: usize,
}

impl Shell {
    /// Builds the console from the built-ins plus the host's `sources`.
    pub fn new(
        config: &ConsoleConfig,
        terminal: Arc<TerminalLogger>,
        sources: &[&dyn CommandSource],
    ) -> Result<Self, RegistrationError> {
        let state = Rc::new(ShellState::new(config.console.max_history_count));
        let builtins = Builtins::new(Rc::clone(&state), Arc::clone(&terminal));

        let mut builder = Console::builder()
            .logger_handle(Logger::from_shared(terminal))
            .source(&builtins);
        for source in sources {
            builder = builder.source(*source);
        }

        let shell = Self {
            console: builder.build()?,
            state,
            max_suggestions: config.console.max_suggestion_count,
        };
        shell.refresh_help();
        Ok(shell)
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// Registers more commands on the running shell.
    pub fn inject_from(&mut self, source: &dyn CommandSource) -> Result<(), RegistrationError> {
        let result = self.console.inject_from(source);
        self.refresh_help();
        result
    }

    /// Handles one line: a trailing `?` asks for suggestions, anything else is executed.
    pub fn run_line(&self, line: &str, out: &mut impl Write) -> io::Result<LineOutcome> {
        if let Some(partial) = line.trim_end().strip_suffix('?') {
            self.print_suggestions(partial, out)?;
            return Ok(LineOutcome::Suggested);
        }

        self.state.history_mut().push(line);
        Ok(LineOutcome::Executed(self.console.execute(line)))
    }

    /// Prints up to the configured number of suggestions, then the echo hint.
    pub fn print_suggestions(&self, partial: &str, out: &mut impl Write) -> io::Result<()> {
        let suggestions = self.console.suggest(partial);
        if suggestions.is_empty() {
            writeln!(out, "{}", t!("shell.no_suggestions").dimmed())?;
        }
        for suggestion in suggestions.iter().take(self.max_suggestions) {
            writeln!(out, "  {}", suggestion.cyan())?;
        }

        let echo = self.console.echo(partial);
        if !echo.is_empty() {
            writeln!(out, "  {}", echo.dimmed())?;
        }
        Ok(())
    }

    /// Reads lines until end of input or a `quit`.
    pub fn run(&self, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", format!(t!("shell.welcome"), version = env!("CARGO_PKG_VERSION")).bold())?;

        let mut lines = input.lines();
        while !self.state.quit_requested() {
            write!(out, "{}", "> ".green().bold())?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };
            self.run_line(&line?, out)?;
        }
        Ok(())
    }

    fn refresh_help(&self) {
        let mut index: Vec<String> = Vec::new();
        let mut last_path: Option<&str> = None;
        // Overloads sit together and the first one carries every argument.
        for record in self.console.commands() {
            if last_path != Some(record.path()) {
                index.push(record.usage());
                last_path = Some(record.path());
            }
        }
        *self.state.help_index.borrow_mut() = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::Severity;
    use std::io::Cursor;

    fn shell() -> (Shell, Arc<TerminalLogger>) {
        colored::control::set_override(false);
        let terminal = Arc::new(TerminalLogger::new(Severity::Error, true));
        let shell = Shell::new(&ConsoleConfig::default(), Arc::clone(&terminal), &[]).unwrap();
        (shell, terminal)
    }

    fn output(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_help_index_lists_each_path_once() {
        let (shell, _) = shell();
        let index = shell.state().help_index().clone();

        assert!(index.contains(&"logger level [level]".to_string()));
        assert!(index.contains(&"logger enable [enable]".to_string()));
        assert!(index.contains(&"history clear".to_string()));
        assert_eq!(index.iter().filter(|u| u.starts_with("logger level")).count(), 1);
    }

    #[test]
    fn test_logger_builtins_change_the_terminal_logger() {
        let (shell, terminal) = shell();
        let mut out = Vec::new();

        shell.run_line("logger level warn", &mut out).unwrap();
        assert_eq!(terminal.min_severity(), Severity::Warning);

        let unknown = shell.run_line("logger level loud", &mut out).unwrap();
        assert!(matches!(unknown, LineOutcome::Executed(DispatchOutcome::Matched { .. })));
        assert_eq!(terminal.min_severity(), Severity::Warning);

        shell.run_line("logger enable off", &mut out).unwrap();
        assert!(!terminal.is_enabled());
        shell.run_line("logger   enable   yes", &mut out).unwrap();
        assert!(terminal.is_enabled());

        // An unknown boolean finds no overload.
        let outcome = shell.run_line("logger enable maybe", &mut out).unwrap();
        assert_eq!(outcome, LineOutcome::Executed(DispatchOutcome::Exhausted));
    }

    #[test]
    fn test_question_mark_suggests_instead_of_executing() {
        let (shell, _) = shell();
        let mut out = Vec::new();

        let outcome = shell.run_line("logger ?", &mut out).unwrap();
        assert_eq!(outcome, LineOutcome::Suggested);
        let printed = output(out);
        assert!(printed.contains("logger enable"));
        assert!(printed.contains("logger level"));
        assert!(shell.state().history().is_empty());

        let mut out = Vec::new();
        shell.run_line("zz?", &mut out).unwrap();
        assert!(output(out).contains(t!("shell.no_suggestions")));
    }

    #[test]
    fn test_run_records_history_and_stops_on_quit() {
        let (shell, _) = shell();
        let input = Cursor::new("history\n\nhistory\nquit\nhistory clear\n");
        let mut out = Vec::new();

        shell.run(input, &mut out).unwrap();

        assert!(shell.state().quit_requested());
        assert_eq!(shell.state().history().iter().collect::<Vec<_>>(), vec!["history", "quit"]);
    }

    #[test]
    fn test_injected_sources_appear_in_help() {
        struct Ping;

        impl CommandSource for Ping {
            fn register(&self, builder: &mut crate::core::registry::CommandBuilder<'_>) {
                builder.add_named("ping", &["times"], |_times: i32| {});
            }
        }

        let (mut shell, _) = shell();
        shell.inject_from(&Ping).unwrap();
        assert!(shell.state().help_index().contains(&"ping <times>".to_string()));
        assert!(shell.console().execute("ping 3").is_matched());
    }
}
