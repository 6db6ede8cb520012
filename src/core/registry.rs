// src/core/registry.rs

//! Registration of commands into the routing trie.
//!
//! Collaborators describe their commands through a [`CommandBuilder`]: a
//! route suffix plus a typed closure, optionally nested under `group`
//! prefixes. A [`CommandSource`] bundles such registrations so a host can hand
//! a whole set of commands to the console at once.

use crate::core::handler::IntoHandler;
use crate::core::tokenizer::{is_blank, tokenize};
use crate::core::trie::CommandNode;
use crate::models::{ArgumentDescriptor, CommandRecord, Handler, SemanticType, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Cannot register a command at a blank route (prefix '{prefix}', route '{route}')")]
    BlankRoute { prefix: String, route: String },
}

/// Anything that can register a batch of commands.
pub trait CommandSource {
    fn register(&self, builder: &mut CommandBuilder<'_>);
}

/// The trie under construction plus what registration has produced so far.
#[derive(Debug, Default)]
pub(crate) struct CommandTable {
    pub(crate) root: CommandNode,
    pub(crate) registered: usize,
    pub(crate) errors: Vec<RegistrationError>,
}

impl CommandTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Takes the first error collected since the last call, clearing the rest.
    pub(crate) fn take_error(&mut self) -> Result<(), RegistrationError> {
        let mut errors = std::mem::take(&mut self.errors).into_iter();
        match errors.next() {
            Some(first) => {
                for other in errors {
                    log::debug!("Further registration error: {}", other);
                }
                Err(first)
            }
            None => Ok(()),
        }
    }

    fn insert(&mut self, prefix: &str, route: &str, arguments: Vec<ArgumentDescriptor>, handler: Handler) {
        let segments = tokenize(&format!("{prefix} {route}"));
        if is_blank(&segments) {
            self.errors.push(RegistrationError::BlankRoute {
                prefix: prefix.to_owned(),
                route: route.to_owned(),
            });
            return;
        }

        let path = segments.join(" ");
        log::debug!("Registering '{}' with {} argument(s)", path, arguments.len());
        self.root.insert(&segments, CommandRecord::new(path, arguments, handler));
        self.registered += 1;
    }
}

/// Registers commands under a route prefix.
///
/// Routes are normalised like console input: surrounding and repeated
/// whitespace is ignored, so `"dice  roll "` registers at `dice roll`.
#[derive(Debug)]
pub struct CommandBuilder<'a> {
    table: &'a mut CommandTable,
    prefix: String,
}

impl<'a> CommandBuilder<'a> {
    pub(crate) fn new(table: &'a mut CommandTable) -> Self {
        Self {
            table,
            prefix: String::new(),
        }
    }

    /// A builder whose routes are nested under `route`.
    pub fn group(&mut self, route: &str) -> CommandBuilder<'_> {
        CommandBuilder {
            prefix: tokenize(&format!("{} {}", self.prefix, route)).join(" "),
            table: &mut *self.table,
        }
    }

    /// The absolute prefix this builder registers under.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Registers a typed closure. Simple arguments are named `arg0`, `arg1`, ...
    pub fn add<Args, F: IntoHandler<Args>>(&mut self, route: &str, handler: F) -> &mut Self {
        self.add_named(route, &[], handler)
    }

    /// Registers a typed closure, naming its simple arguments in order.
    ///
    /// Missing names fall back to `argN`; injected arguments are named after their type.
    pub fn add_named<Args, F: IntoHandler<Args>>(&mut self, route: &str, names: &[&str], handler: F) -> &mut Self {
        let arguments = describe(F::argument_types(), names, route);
        self.add_raw_handler(route, arguments, handler.into_handler())
    }

    /// Registers a handler over already-bound values with explicit descriptors.
    pub fn add_raw(
        &mut self,
        route: &str,
        arguments: Vec<ArgumentDescriptor>,
        handler: impl Fn(Vec<Value>) + 'static,
    ) -> &mut Self {
        self.add_raw_handler(route, arguments, Box::new(handler))
    }

    /// Lets `source` register its commands under this builder's prefix.
    pub fn source(&mut self, source: &dyn CommandSource) -> &mut Self {
        source.register(self);
        self
    }

    fn add_raw_handler(
        &mut self,
        route: &str,
        arguments: Vec<ArgumentDescriptor>,
        handler: Handler,
    ) -> &mut Self {
        self.table.insert(&self.prefix, route, arguments, handler);
        self
    }
}

fn describe(types: Vec<SemanticType>, names: &[&str], route: &str) -> Vec<ArgumentDescriptor> {
    let mut names = names.iter();
    let mut simple_index = 0;

    let arguments: Vec<ArgumentDescriptor> = types
        .into_iter()
        .map(|semantic_type| {
            if semantic_type.is_user_suppliable() {
                let name = names
                    .next()
                    .map_or_else(|| format!("arg{simple_index}"), |name| (*name).to_owned());
                simple_index += 1;
                ArgumentDescriptor::new(semantic_type, name)
            } else {
                ArgumentDescriptor::new(semantic_type, injected_name(semantic_type))
            }
        })
        .collect();

    let surplus = names.count();
    if surplus > 0 {
        log::warn!("'{}': ignoring {} argument name(s) with no matching parameter", route.trim(), surplus);
    }

    arguments
}

/// `logger` for the logger, the bare lowercased type name for services.
fn injected_name(semantic_type: SemanticType) -> String {
    let full = semantic_type.display_name();
    let bare = full.split('<').next().unwrap_or(full);
    bare.rsplit("::").next().unwrap_or(bare).to_lowercase()
}
