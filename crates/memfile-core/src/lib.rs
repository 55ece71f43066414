//! Core library for memfile.
//!
//! Holds the per-session file store, configuration loading, export artifacts,
//! logging setup and Ctrl+C handling. Controllers (TUI, script mode) depend on
//! this crate and own exactly one `Session` each.

pub mod config;
pub mod export;
pub mod interrupt;
pub mod logging;
pub mod session;
