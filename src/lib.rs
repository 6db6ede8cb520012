//! # trieshell
//!
//! An embeddable command console. Commands are registered under
//! whitespace-separated routes, stored in a routing trie, and invoked from
//! free-text lines typed by an operator. Overloads registered at the same
//! route are sorted and compared so trailing arguments are inferred as
//! optional, and the same trie drives autocompletion and argument hints.
//!
//! ```no_run
//! use trieshell::{Console, Logger};
//!
//! let console = Console::builder()
//!     .register(|b| {
//!         b.group("dice")
//!             .add_named("roll", &["v1"], |v1: i32, log: Logger| log.info(&format!("rolled {v1}")))
//!             .add_named("roll", &["v1", "v2"], |v1: i32, v2: i32, log: Logger| {
//!                 log.info(&format!("rolled {v1} and {v2}"));
//!             });
//!     })
//!     .build()
//!     .expect("routes are valid");
//!
//! console.execute("dice roll 4 4");
//! assert_eq!(console.suggest("di"), vec!["dice".to_string()]);
//! ```

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod console;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;

pub use crate::console::{Console, ConsoleBuilder};
pub use crate::core::context::{
    ConsoleLogger, FallbackLogger, Logger, Service, ServiceProvider, ServiceRegistry, Severity,
};
pub use crate::core::binder::BindError;
pub use crate::core::dispatcher::DispatchOutcome;
pub use crate::core::handler::{ConsoleParam, IntoHandler};
pub use crate::core::registry::{CommandBuilder, CommandSource, RegistrationError};
pub use crate::models::{ArgumentDescriptor, CommandRecord, SemanticType, Value};
