// src/core/binder.rs

use crate::constants::{FALSY_TOKENS, TRUTHY_TOKENS};
use crate::core::context::{Logger, ServiceProvider};
use crate::models::{ArgumentDescriptor, CommandRecord, SemanticType, Value};
use thiserror::Error;

/// Why a record could not be bound against a token slice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A token did not parse as its argument's type, or the arity did not match.
    /// The dispatcher treats this as "this overload does not apply".
    #[error("The input does not fit the command's arguments")]
    FailedToParse,
    /// The record can never be bound: a registration-time contract violation.
    #[error("Parameter <{name} : {type_name}> of '{path}' cannot be bound: {reason}")]
    Unsupported {
        path: String,
        name: String,
        type_name: &'static str,
        reason: UnsupportedReason,
    },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedReason {
    #[error("the type cannot be parsed from console input")]
    UnparsableType,
    #[error("there is no service provider")]
    NoServiceProvider,
    #[error("the service provider has no such service")]
    MissingService,
}

/// Failure of a single simple-argument coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    Malformed,
    UnsupportedType,
}

/// The context injected arguments are resolved from.
#[derive(Clone, Copy)]
pub struct BindContext<'a> {
    pub logger: &'a Logger,
    pub services: Option<&'a dyn ServiceProvider>,
}

impl std::fmt::Debug for BindContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindContext")
            .field("logger", self.logger)
            .field("services", &self.services.is_some())
            .finish()
    }
}

/// Binds `record`'s arguments against the tokens left after its route.
///
/// Simple arguments consume tokens in order; injected arguments never do.
/// Every token must be consumed for the bind to succeed.
pub fn bind(
    record: &CommandRecord,
    tokens: &[String],
    context: &BindContext<'_>,
) -> Result<Vec<Value>, BindError> {
    let mut values = Vec::with_capacity(record.argument_count());
    let mut remaining = tokens.iter();

    for argument in record.arguments() {
        let value = if argument.is_user_suppliable() {
            let token = remaining.next().ok_or(BindError::FailedToParse)?;
            parse_simple_argument(argument.semantic_type(), token).map_err(|failure| match failure {
                ParseFailure::Malformed => BindError::FailedToParse,
                ParseFailure::UnsupportedType => {
                    unsupported(record, argument, UnsupportedReason::UnparsableType)
                }
            })?
        } else {
            resolve_injected(record, argument, context)?
        };
        values.push(value);
    }

    if remaining.next().is_some() {
        return Err(BindError::FailedToParse);
    }

    Ok(values)
}

/// Converts one operator token into a value of the given simple type.
pub fn parse_simple_argument(semantic_type: SemanticType, token: &str) -> Result<Value, ParseFailure> {
    match semantic_type {
        SemanticType::String => Ok(Value::String(token.to_owned())),
        SemanticType::Integer => token
            .parse::<i32>()
            .map(Value::Integer)
            .map_err(|_| ParseFailure::Malformed),
        SemanticType::Float => token
            .parse::<f32>()
            .map(Value::Float)
            .map_err(|_| ParseFailure::Malformed),
        SemanticType::Boolean => parse_bool(token)
            .map(Value::Boolean)
            .ok_or(ParseFailure::Malformed),
        _ => Err(ParseFailure::UnsupportedType),
    }
}

/// Case-insensitive boolean parse over the fixed truthy/falsy vocabularies.
pub fn parse_bool(token: &str) -> Option<bool> {
    let lowered = token.to_lowercase();
    if TRUTHY_TOKENS.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSY_TOKENS.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

fn resolve_injected(
    record: &CommandRecord,
    argument: &ArgumentDescriptor,
    context: &BindContext<'_>,
) -> Result<Value, BindError> {
    match argument.semantic_type() {
        SemanticType::Logger => Ok(Value::Logger(context.logger.clone())),
        SemanticType::Service { id, .. } => {
            let provider = context
                .services
                .ok_or_else(|| unsupported(record, argument, UnsupportedReason::NoServiceProvider))?;
            provider
                .get(id)
                .map(Value::Service)
                .ok_or_else(|| unsupported(record, argument, UnsupportedReason::MissingService))
        }
        // Simple types never reach here; keep the match total anyway.
        _ => Err(unsupported(record, argument, UnsupportedReason::UnparsableType)),
    }
}

fn unsupported(
    record: &CommandRecord,
    argument: &ArgumentDescriptor,
    reason: UnsupportedReason,
) -> BindError {
    BindError::Unsupported {
        path: record.path().to_owned(),
        name: argument.name().to_owned(),
        type_name: argument.semantic_type().display_name(),
        reason,
    }
}
