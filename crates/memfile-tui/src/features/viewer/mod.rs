//! Read-only content viewer.

use memfile_core::session::Session;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Lines moved per PageUp/PageDown.
const PAGE_LINES: u16 = 5;

#[derive(Debug, Default, Clone, Copy)]
pub struct ViewerState {
    pub scroll: u16,
}

impl ViewerState {
    pub fn page_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(PAGE_LINES);
    }

    /// Scrolls down, stopping at the last line of `content`.
    pub fn page_down(&mut self, content: Option<&str>) {
        let max = content.map_or(0, |c| c.lines().count().saturating_sub(1));
        let max = u16::try_from(max).unwrap_or(u16::MAX);
        self.scroll = self.scroll.saturating_add(PAGE_LINES).min(max);
    }

    pub fn reset(&mut self) {
        self.scroll = 0;
    }
}

pub fn render_viewer(frame: &mut Frame, area: Rect, state: &ViewerState, session: &Session) {
    let Some(content) = session.displayed_content() else {
        let hint = if session.current().is_some() && session.view().saved {
            "Press Ctrl+T to show the file content."
        } else {
            "Save data first to enable viewing and downloading."
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Show File Content ");
        let para = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::Blue),
        )))
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(para, area);
        return;
    };

    let name = session.current().unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" File Content: {name} "))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .title_bottom(Line::from(Span::styled(
            " read-only ",
            Style::default().fg(Color::DarkGray),
        )));
    let lines: Vec<Line<'_>> = content.lines().map(Line::raw).collect();
    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0))
        .block(block);
    frame.render_widget(para, area);
}
