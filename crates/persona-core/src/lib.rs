//! Core types, rules and use-case handlers for the persona catalog.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::PersonaStore`]; transports call the
//! handlers in [`commands`] and [`queries`].

pub mod commands;
pub mod error;
pub mod persona;
pub mod queries;
pub mod store;
pub mod validation;

pub use error::{Error, Result};

#[cfg(test)]
mod testing;
