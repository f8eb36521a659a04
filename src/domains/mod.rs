//! Domains module containing business logic organized by bounded contexts.
//!
//! The gateway has a single domain, `tools`: the registry, schema validation
//! and dispatch of named tool calls.

pub mod tools;
