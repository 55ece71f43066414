//! CLI command handlers.

pub mod config;
pub mod form;
pub mod script;
