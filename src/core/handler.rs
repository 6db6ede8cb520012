// src/core/handler.rs

//! Adapts typed Rust closures to the type-erased [`Handler`] the console stores.
//!
//! A closure like `|v1: i32, log: Logger| ...` is classified once at
//! registration (its parameter types become argument descriptors) and wrapped
//! into a handler over the bound `Vec<Value>`.

use crate::core::context::{Logger, Service};
use crate::models::{Handler, SemanticType, Value};
use std::any::Any;

/// A type that can appear as a command handler parameter.
pub trait ConsoleParam: Sized {
    fn semantic_type() -> SemanticType;
    fn from_value(value: Value) -> Option<Self>;
}

impl ConsoleParam for i32 {
    fn semantic_type() -> SemanticType {
        SemanticType::Integer
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Integer(v) => Some(v),
            _ => None,
        }
    }
}

impl ConsoleParam for f32 {
    fn semantic_type() -> SemanticType {
        SemanticType::Float
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl ConsoleParam for bool {
    fn semantic_type() -> SemanticType {
        SemanticType::Boolean
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Boolean(v) => Some(v),
            _ => None,
        }
    }
}

impl ConsoleParam for String {
    fn semantic_type() -> SemanticType {
        SemanticType::String
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(v) => Some(v),
            _ => None,
        }
    }
}

/// `char` registers as a simple argument but has no text coercion, so binding it is unsupported.
impl ConsoleParam for char {
    fn semantic_type() -> SemanticType {
        SemanticType::Primitive("char")
    }

    fn from_value(_value: Value) -> Option<Self> {
        None
    }
}

impl ConsoleParam for Logger {
    fn semantic_type() -> SemanticType {
        SemanticType::Logger
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Logger(logger) => Some(logger),
            _ => None,
        }
    }
}

impl<T: Any + Send + Sync> ConsoleParam for Service<T> {
    fn semantic_type() -> SemanticType {
        SemanticType::service::<T>()
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Service(service) => service.downcast::<T>().ok().map(Service::new),
            _ => None,
        }
    }
}

/// A closure that can be registered as a command. `Args` is the tuple of its parameter types.
pub trait IntoHandler<Args> {
    fn argument_types() -> Vec<SemanticType>;
    fn into_handler(self) -> Handler;
}

macro_rules! impl_into_handler {
    ($($param:ident),*) => {
        impl<F, $($param,)*> IntoHandler<($($param,)*)> for F
        where
            F: Fn($($param),*) + 'static,
            $($param: ConsoleParam + 'static,)*
        {
            fn argument_types() -> Vec<SemanticType> {
                vec![$($param::semantic_type()),*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn into_handler(self) -> Handler {
                Box::new(move |values: Vec<Value>| {
                    let mut values = values.into_iter();
                    $(
                        let Some($param) = values.next().and_then($param::from_value) else {
                            log::error!(
                                "Bound value does not fit a {} parameter; handler skipped",
                                $param::semantic_type()
                            );
                            return;
                        };
                    )*
                    (self)($($param),*);
                })
            }
        }
    };
}

impl_into_handler!();
impl_into_handler!(A1);
impl_into_handler!(A1, A2);
impl_into_handler!(A1, A2, A3);
impl_into_handler!(A1, A2, A3, A4);
impl_into_handler!(A1, A2, A3, A4, A5);
impl_into_handler!(A1, A2, A3, A4, A5, A6);
impl_into_handler!(A1, A2, A3, A4, A5, A6, A7);
impl_into_handler!(A1, A2, A3, A4, A5, A6, A7, A8);
