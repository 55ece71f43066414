//! Pure view/render functions for the form.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::input::{Field, render_field};
use crate::sidebar::{SidebarView, render_sidebar};
use crate::state::{AppState, Focus};
use crate::status::render_status;
use crate::viewer::render_viewer;

/// Width of the file list on the left.
const SIDEBAR_WIDTH: u16 = 28;

/// Heights of the fixed form rows (including borders).
const NAME_HEIGHT: u16 = 3;
const DATA_HEIGHT: u16 = 6;
const APPEND_HEIGHT: u16 = 5;
const ACTIONS_HEIGHT: u16 = 1;

/// Renders the entire form to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(rows[0]);

    let names = app.file_names();
    render_sidebar(
        frame,
        columns[0],
        &app.sidebar,
        &SidebarView {
            names: &names,
            current: app.session.current(),
            focused: app.focus == Focus::Sidebar,
        },
    );

    render_main(app, frame, columns[1]);
    render_status(frame, rows[1], app.status.as_ref());
    render_key_hints(frame, rows[2], app.focus);
}

fn render_main(app: &AppState, frame: &mut Frame, area: Rect) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(NAME_HEIGHT),
            Constraint::Length(DATA_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(APPEND_HEIGHT),
            Constraint::Length(ACTIONS_HEIGHT),
        ])
        .split(area);

    render_field(
        frame,
        sections[0],
        &app.name_input,
        &Field {
            title: "Create a File",
            placeholder: "example.txt",
            submit_hint: "Enter create",
            focused: app.focus == Focus::Name,
        },
    );
    render_field(
        frame,
        sections[1],
        &app.data_input,
        &Field {
            title: "Add / Overwrite Data",
            placeholder: "Write your content here...",
            submit_hint: "Ctrl+S save",
            focused: app.focus == Focus::Data,
        },
    );
    render_viewer(frame, sections[2], &app.viewer, &app.session);
    render_field(
        frame,
        sections[3],
        &app.append_input,
        &Field {
            title: "Update Data",
            placeholder: "Write text to append...",
            submit_hint: "Ctrl+S append",
            focused: app.focus == Focus::Append,
        },
    );
    render_actions(app, frame, sections[4]);
}

/// Download / Delete row. Download is dimmed until there is saved content.
fn render_actions(app: &AppState, frame: &mut Frame, area: Rect) {
    let view = app.session.view();
    let can_download = app.session.current().is_some() && view.saved;
    let can_delete = app.session.current().is_some();

    let enabled = |on: bool, color: Color| {
        if on {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let current = app
        .session
        .current()
        .map_or_else(|| "no file open".to_string(), |name| format!("current: {name}"));
    let line = Line::from(vec![
        Span::styled(" Ctrl+E ", enabled(can_download, Color::Cyan)),
        Span::styled("Download", enabled(can_download, Color::Cyan)),
        Span::raw("   "),
        Span::styled(" Ctrl+D ", enabled(can_delete, Color::Red)),
        Span::styled("Delete", enabled(can_delete, Color::Red)),
        Span::raw("   "),
        Span::styled(current, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_key_hints(frame: &mut Frame, area: Rect, focus: Focus) {
    let mut hints: Vec<(&str, &str)> = vec![("Tab", "next field")];
    match focus {
        Focus::Sidebar => hints.push(("↑↓/Enter", "open")),
        Focus::Name => hints.push(("Enter", "create")),
        Focus::Data | Focus::Append => hints.push(("Ctrl+S", "submit")),
    }
    hints.extend([
        ("Ctrl+T", "show/hide"),
        ("Ctrl+R", "clear all"),
        ("Ctrl+Q", "quit"),
    ]);

    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
