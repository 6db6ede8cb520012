// src/models.rs

use crate::core::context::Logger;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

// --- ARGUMENT TYPES ---

/// The type of one formal parameter of a registered command.
///
/// Classification is by type identity: the text-coercible primitives (and
/// other primitives that can be registered but not coerced) are filled from
/// operator input, everything else is injected from context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Integer,
    Float,
    Boolean,
    String,
    /// A primitive that has no text coercion (e.g. `char`). Binding one fails as unsupported.
    Primitive(&'static str),
    /// The logger capability. Always resolvable.
    Logger,
    /// Any other injected value, looked up by type in the service provider.
    Service { id: TypeId, name: &'static str },
}

impl SemanticType {
    /// The injected service type for `T`.
    pub fn service<T: Any + Send + Sync>() -> Self {
        Self::Service {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Whether values of this type come from operator-typed tokens.
    pub fn is_user_suppliable(&self) -> bool {
        matches!(
            self,
            Self::Integer | Self::Float | Self::Boolean | Self::String | Self::Primitive(_)
        )
    }

    /// Short human-readable name, used in diagnostics.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Integer => "int",
            Self::Float => "float",
            Self::Boolean => "bool",
            Self::String => "string",
            Self::Primitive(name) => *name,
            Self::Logger => "logger",
            Self::Service { name, .. } => *name,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A bound argument value, as handed to a command handler.
#[derive(Clone)]
pub enum Value {
    Integer(i32),
    Float(f32),
    Boolean(bool),
    String(String),
    Logger(Logger),
    Service(Arc<dyn Any + Send + Sync>),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => f.debug_tuple("Integer").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Boolean(v) => f.debug_tuple("Boolean").field(v).finish(),
            Self::String(v) => f.debug_tuple("String").field(v).finish(),
            Self::Logger(_) => f.write_str("Logger"),
            Self::Service(_) => f.write_str("Service"),
        }
    }
}

impl PartialEq for Value {
    /// Injected values compare by identity, simple values by content.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Logger(a), Self::Logger(b)) => a.same_sink(b),
            (Self::Service(a), Self::Service(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// --- ARGUMENT DESCRIPTOR ---

/// Describes one formal parameter of a registered command.
///
/// `is_optional` can only ever be set on user-suppliable arguments: an injected
/// argument is a wiring precondition, not something the operator may omit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    semantic_type: SemanticType,
    name: String,
    is_user_suppliable: bool,
    is_optional: bool,
}

impl ArgumentDescriptor {
    /// Creates a required descriptor; suppliability follows from the type.
    pub fn new(semantic_type: SemanticType, name: impl Into<String>) -> Self {
        Self {
            semantic_type,
            name: name.into(),
            is_user_suppliable: semantic_type.is_user_suppliable(),
            is_optional: false,
        }
    }

    pub fn semantic_type(&self) -> SemanticType {
        self.semantic_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_user_suppliable(&self) -> bool {
        self.is_user_suppliable
    }

    pub fn is_optional(&self) -> bool {
        self.is_optional
    }

    /// Marks the argument optional. Injected arguments are left untouched.
    pub(crate) fn mark_optional(&mut self) {
        if self.is_user_suppliable {
            self.is_optional = true;
        }
    }

    /// `<name>` for required arguments, `[name]` for optional ones.
    pub fn hint_fragment(&self) -> String {
        if self.is_optional {
            format!("[{}]", self.name)
        } else {
            format!("<{}>", self.name)
        }
    }
}

// --- COMMAND RECORD ---

/// A type-erased command handler: receives the bound arguments in declaration order.
pub type Handler = Box<dyn Fn(Vec<Value>)>;

/// A registered command: its absolute route, its formal arguments and the handler.
pub struct CommandRecord {
    path: String,
    arguments: Vec<ArgumentDescriptor>,
    handler: Handler,
}

impl CommandRecord {
    pub fn new(path: impl Into<String>, arguments: Vec<ArgumentDescriptor>, handler: Handler) -> Self {
        Self {
            path: path.into(),
            arguments,
            handler,
        }
    }

    /// The absolute route, segments separated by single spaces.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn arguments(&self) -> &[ArgumentDescriptor] {
        &self.arguments
    }

    pub(crate) fn arguments_mut(&mut self) -> &mut [ArgumentDescriptor] {
        &mut self.arguments
    }

    pub fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    /// The arguments filled from operator tokens, in order.
    pub fn simple_arguments(&self) -> impl Iterator<Item = &ArgumentDescriptor> {
        self.arguments.iter().filter(|a| a.is_user_suppliable())
    }

    pub fn simple_argument_names(&self) -> impl Iterator<Item = &str> {
        self.simple_arguments().map(ArgumentDescriptor::name)
    }

    /// `path <a> [b]`, the usage line shown by help output.
    pub fn usage(&self) -> String {
        let hints: Vec<String> = self.simple_arguments().map(ArgumentDescriptor::hint_fragment).collect();
        if hints.is_empty() {
            self.path.clone()
        } else {
            format!("{} {}", self.path, hints.join(" "))
        }
    }

    pub(crate) fn invoke(&self, values: Vec<Value>) {
        (self.handler)(values);
    }
}

impl fmt::Debug for CommandRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRecord")
            .field("path", &self.path)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injected_arguments_never_become_optional() {
        let mut logger = ArgumentDescriptor::new(SemanticType::Logger, "logger");
        logger.mark_optional();
        assert!(!logger.is_user_suppliable());
        assert!(!logger.is_optional());

        let mut count = ArgumentDescriptor::new(SemanticType::Integer, "count");
        count.mark_optional();
        assert!(count.is_optional());
        assert_eq!(count.hint_fragment(), "[count]");
    }

    #[test]
    fn test_classification_is_by_type() {
        assert!(SemanticType::Primitive("char").is_user_suppliable());
        assert!(!SemanticType::service::<String>().is_user_suppliable());
        assert_eq!(SemanticType::Boolean.to_string(), "bool");
    }

    #[test]
    fn test_usage_lists_only_simple_arguments() {
        let record = CommandRecord::new(
            "dice roll",
            vec![
                ArgumentDescriptor::new(SemanticType::Integer, "v1"),
                ArgumentDescriptor::new(SemanticType::Logger, "logger"),
            ],
            Box::new(|_| {}),
        );
        assert_eq!(record.usage(), "dice roll <v1>");
        assert_eq!(record.simple_argument_names().collect::<Vec<_>>(), vec!["v1"]);
    }
}
