// src/console.rs

//! The console facade: registration, execution and completion over one command trie.

use crate::core::binder::BindContext;
use crate::core::context::{ConsoleLogger, Logger, ServiceProvider};
use crate::core::dispatcher::{self, DispatchOutcome};
use crate::core::overload_resolver::resolve_overloads;
use crate::core::registry::{CommandBuilder, CommandSource, CommandTable, RegistrationError};
use crate::core::suggestions::{self, ClosestCommand};
use crate::core::tokenizer::tokenize;
use crate::models::CommandRecord;
use std::fmt;

/// Collects commands and wiring, then freezes them into a [`Console`].
pub struct ConsoleBuilder {
    table: CommandTable,
    logger: Option<Logger>,
    services: Option<Box<dyn ServiceProvider>>,
}

impl Default for ConsoleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleBuilder {
    pub fn new() -> Self {
        Self {
            table: CommandTable::new(),
            logger: None,
            services: None,
        }
    }

    /// Sets the sink for operator-facing messages and the injected logger.
    pub fn logger(self, sink: impl ConsoleLogger + 'static) -> Self {
        self.logger_handle(Logger::new(sink))
    }

    /// Like [`ConsoleBuilder::logger`], for a sink the caller also holds.
    pub fn logger_handle(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Sets the provider injected service arguments are resolved from.
    pub fn services(mut self, provider: impl ServiceProvider + 'static) -> Self {
        self.services = Some(Box::new(provider));
        self
    }

    /// Registers commands through a builder rooted at the empty route.
    pub fn register(mut self, f: impl FnOnce(&mut CommandBuilder<'_>)) -> Self {
        f(&mut CommandBuilder::new(&mut self.table));
        self
    }

    pub fn source(mut self, source: &dyn CommandSource) -> Self {
        CommandBuilder::new(&mut self.table).source(source);
        self
    }

    /// Resolves overloads and returns the ready console.
    ///
    /// Fails with the first registration error, if any route was blank.
    pub fn build(mut self) -> Result<Console, RegistrationError> {
        self.table.take_error()?;

        let logger = self.logger.unwrap_or_else(|| {
            log::info!("{}", t!("console.fallback_logger"));
            Logger::fallback()
        });

        let mut console = Console {
            table: self.table,
            logger,
            services: self.services,
        };
        console.resolve();
        Ok(console)
    }
}

impl fmt::Debug for ConsoleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleBuilder")
            .field("registered", &self.table.registered)
            .field("logger", &self.logger)
            .field("services", &self.services.is_some())
            .finish()
    }
}

/// An interactive command console.
///
/// Lines are executed against the registered commands; partial lines can be
/// completed with [`Console::suggest`] and annotated with [`Console::echo`].
pub struct Console {
    table: CommandTable,
    logger: Logger,
    services: Option<Box<dyn ServiceProvider>>,
}

impl Console {
    pub fn builder() -> ConsoleBuilder {
        ConsoleBuilder::new()
    }

    /// Runs one operator line.
    ///
    /// Either exactly one handler runs, or exactly one message is logged:
    /// a warning when nothing matched, an error when a command could not be bound.
    pub fn execute(&self, line: &str) -> DispatchOutcome {
        let tokens = tokenize(line);
        let context = BindContext {
            logger: &self.logger,
            services: self.services.as_deref(),
        };

        let outcome = dispatcher::dispatch(&self.table.root, &tokens, &context);
        match &outcome {
            DispatchOutcome::Matched { path, overload } => {
                log::debug!("'{}' ran overload {} of '{}'", line.trim(), overload, path);
            }
            DispatchOutcome::Unsupported(error) => self.logger.error(&error.to_string()),
            DispatchOutcome::Exhausted => {
                self.logger.warn(&format!(t!("dispatch.no_match"), line = line.trim()));
            }
        }
        outcome
    }

    /// Completion candidates for a partial line, as full lines.
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        suggestions::suggest(&self.table.root, &tokenize(partial))
    }

    /// The deepest command the partial line already names, if any.
    pub fn closest_fitting_command(&self, partial: &str) -> Option<ClosestCommand<'_>> {
        suggestions::closest_fitting_command(&self.table.root, &tokenize(partial))
    }

    /// The trimmed partial line followed by the arguments still to type, e.g. `dice roll 4 [v2]`.
    pub fn argument_hint(&self, partial: &str) -> Option<String> {
        self.closest_fitting_command(partial)
            .map(|closest| suggestions::argument_hint(&closest, partial))
    }

    /// Ghost text for the input field: the argument hint, else the first suggestion, else nothing.
    pub fn echo(&self, partial: &str) -> String {
        self.argument_hint(partial)
            .or_else(|| self.suggest(partial).into_iter().next())
            .unwrap_or_default()
    }

    /// Registers more commands on a live console and re-resolves overloads.
    pub fn reopen(&mut self, f: impl FnOnce(&mut CommandBuilder<'_>)) -> Result<(), RegistrationError> {
        f(&mut CommandBuilder::new(&mut self.table));
        let result = self.table.take_error();
        self.resolve();
        result
    }

    /// Registers a command source on a live console and re-resolves overloads.
    pub fn inject_from(&mut self, source: &dyn CommandSource) -> Result<(), RegistrationError> {
        self.reopen(|builder| {
            builder.source(source);
        })
    }

    /// How many commands (overloads included) are registered.
    pub fn command_count(&self) -> usize {
        self.table.registered
    }

    /// Every registered path once, sorted.
    pub fn command_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.commands().into_iter().map(|r| r.path().to_owned()).collect();
        paths.sort();
        paths.dedup();
        paths
    }

    /// Every registered record, in route order, overloads in resolved order.
    pub fn commands(&self) -> Vec<&CommandRecord> {
        self.table.root.all_records()
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    fn resolve(&mut self) {
        resolve_overloads(&mut self.table.root);
        log::info!("{}", format!(t!("console.registered"), count = self.table.registered));
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("commands", &self.table.registered)
            .field("logger", &self.logger)
            .field("services", &self.services.is_some())
            .finish()
    }
}
