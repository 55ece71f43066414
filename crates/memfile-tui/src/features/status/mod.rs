//! Status line: the last confirmation, warning or hint.

use memfile_core::session::{Notice, NoticeLevel, StoreError};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::truncate_with_ellipsis;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: NoticeLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }
}

impl From<Notice> for StatusMessage {
    fn from(notice: Notice) -> Self {
        Self {
            level: notice.level(),
            text: notice.to_string(),
        }
    }
}

impl From<StoreError> for StatusMessage {
    fn from(err: StoreError) -> Self {
        Self::warning(err.to_string())
    }
}

pub fn render_status(frame: &mut Frame, area: Rect, status: Option<&StatusMessage>) {
    let Some(status) = status else {
        return;
    };
    let (icon, color) = match status.level {
        NoticeLevel::Success => ("✓", Color::Green),
        NoticeLevel::Warning => ("!", Color::Yellow),
        NoticeLevel::Info => ("i", Color::Blue),
    };
    let width = usize::from(area.width.saturating_sub(3));
    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(color)),
        Span::styled(
            truncate_with_ellipsis(&status.text, width),
            Style::default().fg(color),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
