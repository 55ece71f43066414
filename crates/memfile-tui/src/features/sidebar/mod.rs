//! Sidebar slice: list of files with a selection cursor.
//!
//! The list itself is read from the session on every render; this slice only
//! owns the selected index, which is clamped whenever the list changes.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::common::truncate_with_ellipsis;

#[derive(Debug, Default, Clone, Copy)]
pub struct SidebarState {
    pub selected: usize,
}

impl SidebarState {
    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Keeps the selection inside a list of `len` entries.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Moves the selection onto `name` if it is listed.
    pub fn follow<'a>(&mut self, names: impl Iterator<Item = &'a str>, name: &str) {
        if let Some(idx) = names.into_iter().position(|n| n == name) {
            self.selected = idx;
        }
    }
}

pub struct SidebarView<'a> {
    pub names: &'a [&'a str],
    pub current: Option<&'a str>,
    pub focused: bool,
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, state: &SidebarState, view: &SidebarView<'_>) {
    let border_color = if view.focused {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Your Files ")
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );

    if view.names.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No files created yet.",
            Style::default().fg(Color::Blue),
        )))
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let name_width = usize::from(area.width.saturating_sub(4));
    let items: Vec<ListItem<'_>> = view
        .names
        .iter()
        .map(|name| {
            let mut style = Style::default();
            if Some(*name) == view.current {
                style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(Span::styled(
                truncate_with_ellipsis(name, name_width),
                style,
            )))
        })
        .collect();

    let highlight = if view.focused {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}
