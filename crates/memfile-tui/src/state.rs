//! Application state for the form.
//!
//! ```text
//! AppState
//! ├── session: Session          (files, used names, current file, view flags)
//! ├── focus: Focus              (which widget receives keys)
//! ├── name_input / data_input / append_input: TextBuffer
//! ├── sidebar: SidebarState     (selected entry)
//! ├── viewer: ViewerState       (scroll offset)
//! ├── status: Option<StatusMessage>
//! └── export: ExportSettings    (where downloads go)
//! ```

use std::path::PathBuf;

use memfile_core::session::Session;

use crate::input::TextBuffer;
use crate::sidebar::SidebarState;
use crate::status::StatusMessage;
use crate::viewer::ViewerState;

/// Widget that receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Sidebar,
    #[default]
    Name,
    Data,
    Append,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::Sidebar, Focus::Name, Focus::Data, Focus::Append];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Where and how downloads are written.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub dir: PathBuf,
    pub overwrite: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            overwrite: false,
        }
    }
}

pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    pub session: Session,
    pub focus: Focus,
    /// "Create a File" field.
    pub name_input: TextBuffer,
    /// "Add / Overwrite Data" field.
    pub data_input: TextBuffer,
    /// "Update Data" field.
    pub append_input: TextBuffer,
    pub sidebar: SidebarState,
    pub viewer: ViewerState,
    pub status: Option<StatusMessage>,
    pub export: ExportSettings,
}

impl AppState {
    pub fn new(export: ExportSettings) -> Self {
        Self {
            should_quit: false,
            session: Session::new(),
            focus: Focus::default(),
            name_input: TextBuffer::single_line(),
            data_input: TextBuffer::new(),
            append_input: TextBuffer::new(),
            sidebar: SidebarState::default(),
            viewer: ViewerState::default(),
            status: None,
            export,
        }
    }

    /// File names in sidebar order.
    pub fn file_names(&self) -> Vec<&str> {
        self.session.names().collect()
    }

    /// Name under the sidebar cursor.
    pub fn selected_name(&self) -> Option<&str> {
        self.session.names().nth(self.sidebar.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles_both_ways() {
        let mut focus = Focus::Sidebar;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Sidebar);
        assert_eq!(Focus::Sidebar.prev(), Focus::Append);
        assert_eq!(Focus::Name.next(), Focus::Data);
    }

    #[test]
    fn test_new_state_starts_on_name_field() {
        let app = AppState::new(ExportSettings::default());
        assert_eq!(app.focus, Focus::Name);
        assert!(app.name_input.is_single_line());
        assert!(app.session.is_empty());
        assert!(app.selected_name().is_none());
    }
}
