//! User-facing outcomes of store operations.

use std::fmt;

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Info,
}

/// Outcome of an accepted (or informationally skipped) store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Created(String),
    Saved,
    Appended,
    Opened(String),
    Deleted(String),
    Cleared { removed: usize },
    /// Viewer flipped; carries the new visibility.
    ViewToggled(bool),
    /// Viewing or exporting is unavailable until content is saved or opened.
    NothingSaved,
}

impl Notice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            Self::NothingSaved | Self::ViewToggled(_) => NoticeLevel::Info,
            _ => NoticeLevel::Success,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created(name) => write!(f, "File '{name}' created successfully!"),
            Self::Saved => write!(
                f,
                "Data saved successfully! You can now view or download it."
            ),
            Self::Appended => write!(
                f,
                "Data appended successfully! You can now view or download the updated file."
            ),
            Self::Opened(name) => write!(f, "Opened '{name}' successfully!"),
            Self::Deleted(name) => write!(f, "File '{name}' deleted successfully!"),
            Self::Cleared { removed } => write!(f, "Cleared {removed} file(s)."),
            Self::ViewToggled(true) => write!(f, "Showing file content."),
            Self::ViewToggled(false) => write!(f, "File content hidden."),
            Self::NothingSaved => write!(f, "Save data first to enable viewing and downloading."),
        }
    }
}
