//! Session-scoped in-memory file store.
//!
//! A `Session` maps file names to text content, remembers every name it has
//! ever handed out, and tracks which file is currently open. It lives for one
//! interactive session and is owned by exactly one controller.
//!
//! ## Invariants
//!
//! - every key in `files` is also in `used_names`
//! - `current`, if set, is a key in `files`
//! - names in `used_names` are never assigned again, even after deletion or
//!   a full reset

mod error;
mod notice;

use std::collections::{BTreeMap, BTreeSet};

pub use error::StoreError;
pub use notice::{Notice, NoticeLevel};
use tracing::debug;

use crate::export::ExportArtifact;

/// Display flags for the current file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Content was saved, appended or opened since the file became current.
    pub saved: bool,
    /// Content is currently displayed.
    pub showing: bool,
}

/// One session's files.
#[derive(Debug, Default)]
pub struct Session {
    files: BTreeMap<String, String>,
    used_names: BTreeSet<String>,
    current: Option<String>,
    view: ViewState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all files, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn content(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Content of the current file.
    pub fn current_content(&self) -> Option<&str> {
        self.current.as_deref().and_then(|name| self.content(name))
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// True once the name has been assigned in this session.
    pub fn is_retired(&self, name: &str) -> bool {
        self.used_names.contains(name)
    }

    /// Content to show in the viewer, if the viewer is on.
    pub fn displayed_content(&self) -> Option<&str> {
        if self.view.saved && self.view.showing {
            self.current_content()
        } else {
            None
        }
    }

    /// Creates an empty file and makes it current.
    ///
    /// The name is stored as given; only the emptiness check trims it.
    pub fn create_file(&mut self, name: &str) -> Result<Notice, StoreError> {
        if name.trim().is_empty() {
            return Err(reject("create", StoreError::InvalidName));
        }
        if self.files.contains_key(name) || self.used_names.contains(name) {
            return Err(reject("create", StoreError::NameTaken(name.to_string())));
        }

        self.files.insert(name.to_string(), String::new());
        self.used_names.insert(name.to_string());
        self.current = Some(name.to_string());
        self.view = ViewState::default();
        debug!(name, "file created");
        Ok(Notice::Created(name.to_string()))
    }

    /// Replaces the current file's content with the trimmed input.
    pub fn save_data(&mut self, content: &str) -> Result<Notice, StoreError> {
        let trimmed = content.trim();
        let slot = self.current_slot("save", trimmed)?;
        *slot = trimmed.to_string();
        self.view = ViewState {
            saved: true,
            showing: false,
        };
        debug!(bytes = trimmed.len(), "data saved");
        Ok(Notice::Saved)
    }

    /// Appends the trimmed input to the current file on a new line.
    pub fn append_data(&mut self, text: &str) -> Result<Notice, StoreError> {
        let trimmed = text.trim();
        let slot = self.current_slot("append", trimmed)?;
        slot.push('\n');
        slot.push_str(trimmed);
        self.view = ViewState {
            saved: true,
            showing: false,
        };
        debug!(bytes = trimmed.len(), "data appended");
        Ok(Notice::Appended)
    }

    /// Makes an existing file current and shows its content.
    pub fn open_file(&mut self, name: &str) -> Result<Notice, StoreError> {
        if !self.files.contains_key(name) {
            return Err(reject("open", StoreError::NotFound(name.to_string())));
        }
        self.current = Some(name.to_string());
        self.view = ViewState {
            saved: true,
            showing: true,
        };
        debug!(name, "file opened");
        Ok(Notice::Opened(name.to_string()))
    }

    /// Flips the viewer, or reports that there is nothing to show yet.
    pub fn toggle_view(&mut self) -> Notice {
        if self.current.is_none() || !self.view.saved {
            return Notice::NothingSaved;
        }
        self.view.showing = !self.view.showing;
        Notice::ViewToggled(self.view.showing)
    }

    /// Removes the current file. Its name stays retired.
    pub fn delete_file(&mut self) -> Result<Notice, StoreError> {
        let Some(name) = self.current.take() else {
            return Err(reject("delete", StoreError::NoFileOpen));
        };
        self.files.remove(&name);
        self.view = ViewState::default();
        debug!(name = %name, "file deleted");
        Ok(Notice::Deleted(name))
    }

    /// Builds the download artifact for the current file.
    ///
    /// Returns `Ok(None)` when the file has not been saved or opened yet.
    /// Never mutates the session.
    pub fn export_file(&self) -> Result<Option<ExportArtifact>, StoreError> {
        let Some(name) = self.current.as_deref() else {
            return Err(reject("export", StoreError::NoFileOpen));
        };
        if !self.view.saved {
            return Ok(None);
        }
        let content = self.content(name).unwrap_or_default();
        Ok(Some(ExportArtifact::new(name, content)))
    }

    /// Drops all files and view state. Used names are kept.
    pub fn clear_all(&mut self) -> Notice {
        let removed = self.files.len();
        self.files.clear();
        self.current = None;
        self.view = ViewState::default();
        debug!(removed, "session cleared");
        Notice::Cleared { removed }
    }

    fn current_slot(&mut self, op: &'static str, input: &str) -> Result<&mut String, StoreError> {
        let Some(name) = self.current.as_deref() else {
            return Err(reject(op, StoreError::NoFileOpen));
        };
        if input.is_empty() {
            return Err(reject(op, StoreError::EmptyInput));
        }
        self.files
            .get_mut(name)
            .ok_or_else(|| reject(op, StoreError::NotFound(name.to_string())))
    }
}

fn reject(op: &'static str, err: StoreError) -> StoreError {
    debug!(op, kind = err.kind(), "operation rejected");
    err
}
