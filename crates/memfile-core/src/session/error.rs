//! Store error kinds.
//!
//! Every variant is recoverable: controllers show it as a warning and the
//! session continues with unchanged state.

use thiserror::Error;

/// A rejected store operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// File name was empty or whitespace-only.
    #[error("Please enter a valid file name.")]
    InvalidName,

    /// File name exists or was used before and is retired.
    #[error("The file '{0}' already exists! Please use a different name.")]
    NameTaken(String),

    /// Operation needs an open file and none is selected.
    #[error("Please create a file first.")]
    NoFileOpen,

    /// Save or append body was empty or whitespace-only.
    #[error("Please enter some text first.")]
    EmptyInput,

    /// Open requested for a name that is no longer in the store.
    #[error("The file '{0}' no longer exists.")]
    NotFound(String),
}

impl StoreError {
    /// Short machine-friendly label, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidName => "invalid_name",
            Self::NameTaken(_) => "name_taken",
            Self::NoFileOpen => "no_file_open",
            Self::EmptyInput => "empty_input",
            Self::NotFound(_) => "not_found",
        }
    }
}
