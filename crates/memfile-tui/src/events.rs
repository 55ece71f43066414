//! UI events consumed by the reducer.

use std::path::PathBuf;

use crossterm::event::Event;

#[derive(Debug)]
pub enum UiEvent {
    /// Raw terminal input (keys, paste, resize).
    Terminal(Event),

    /// Result of writing an export artifact to disk.
    Exported {
        name: String,
        result: Result<PathBuf, String>,
    },
}
