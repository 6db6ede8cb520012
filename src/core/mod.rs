// src/core/mod.rs

pub mod binder;
pub mod context;
pub mod dispatcher;
pub mod handler;
pub mod overload_resolver;
pub mod registry;
pub mod suggestions;
pub mod tokenizer;
pub mod trie;
