// src/core/context.rs

//! Context-provided values for injected command arguments: the logger
//! capability (always available) and an optional service provider.

use crate::constants::CONSOLE_LOG_TARGET;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

// --- SEVERITY ---

/// Severity of an operator-facing log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    #[serde(alias = "log")]
    Info,
    #[serde(alias = "warn")]
    Warning,
    #[serde(alias = "err")]
    Error,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown log level '{0}', options are: debug, log, warn, error")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "log" | "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" | "err" => Ok(Self::Error),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

impl Severity {
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
            Self::Warning => 2,
            Self::Error => 3,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Debug,
            1 => Self::Info,
            2 => Self::Warning,
            _ => Self::Error,
        }
    }
}

// --- LOGGER CAPABILITY ---

/// A sink for operator-facing messages.
pub trait ConsoleLogger: Send + Sync {
    fn log(&self, message: &str, severity: Severity);
}

/// The built-in sink, used when no external logger is wired. Forwards to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackLogger;

impl ConsoleLogger for FallbackLogger {
    fn log(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Debug => log::debug!(target: CONSOLE_LOG_TARGET, "{}", message),
            Severity::Info => log::info!(target: CONSOLE_LOG_TARGET, "{}", message),
            Severity::Warning => log::warn!(target: CONSOLE_LOG_TARGET, "{}", message),
            Severity::Error => log::error!(target: CONSOLE_LOG_TARGET, "{}", message),
        }
    }
}

/// A cheap, cloneable handle to the console's logger.
///
/// This is also the parameter type a handler declares to receive the logger.
#[derive(Clone)]
pub struct Logger(Arc<dyn ConsoleLogger>);

impl Logger {
    pub fn new(sink: impl ConsoleLogger + 'static) -> Self {
        Self(Arc::new(sink))
    }

    /// Wraps a shared sink, so the caller can keep its own handle to it.
    pub fn from_shared(sink: Arc<dyn ConsoleLogger>) -> Self {
        Self(sink)
    }

    pub fn fallback() -> Self {
        Self::new(FallbackLogger)
    }

    pub fn log(&self, message: &str, severity: Severity) {
        self.0.log(message, severity);
    }

    pub fn debug(&self, message: &str) {
        self.log(message, Severity::Debug);
    }

    pub fn info(&self, message: &str) {
        self.log(message, Severity::Info);
    }

    pub fn warn(&self, message: &str) {
        self.log(message, Severity::Warning);
    }

    pub fn error(&self, message: &str) {
        self.log(message, Severity::Error);
    }

    /// Whether both handles write to the same sink.
    pub fn same_sink(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Logger")
    }
}

// --- SERVICES ---

/// Resolves injected arguments that are neither simple values nor the logger.
pub trait ServiceProvider {
    fn get(&self, id: TypeId) -> Option<Arc<dyn Any + Send + Sync>>;
}

/// A type-keyed map of shared services; the stock [`ServiceProvider`].
#[derive(Default)]
pub struct ServiceRegistry {
    services: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the service of type `T`.
    pub fn insert<T: Any + Send + Sync>(&mut self, service: T) -> &mut Self {
        self.insert_shared(Arc::new(service))
    }

    /// Adds a service the caller keeps a handle to.
    pub fn insert_shared<T: Any + Send + Sync>(&mut self, service: Arc<T>) -> &mut Self {
        log::debug!("Registering service '{}'", std::any::type_name::<T>());
        self.services.insert(TypeId::of::<T>(), service);
        self
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl ServiceProvider for ServiceRegistry {
    fn get(&self, id: TypeId) -> Option<Arc<dyn Any + Send + Sync>> {
        self.services.get(&id).cloned()
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.services.len())
            .finish()
    }
}

/// Handler parameter type for an injected service of type `T`.
#[derive(Debug)]
pub struct Service<T>(Arc<T>);

impl<T> Service<T> {
    pub fn new(inner: Arc<T>) -> Self {
        Self(inner)
    }

    pub fn into_inner(self) -> Arc<T> {
        self.0
    }
}

impl<T> Clone for Service<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Deref for Service<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}
