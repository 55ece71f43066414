//! Runtime execution modes.
//!
//! - `script`: line-oriented commands from stdin or a file
//! - the interactive form lives in `memfile_tui`

pub mod script;
