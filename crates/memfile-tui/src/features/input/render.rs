//! Field view.
//!
//! Pure rendering: a bordered box with the buffer's lines, scrolled so the
//! cursor stays visible, and a placeholder when the buffer is empty.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::TextBuffer;

/// Static description of a field box.
pub struct Field<'a> {
    pub title: &'a str,
    pub placeholder: &'a str,
    /// Key hint shown on the right of the border while focused.
    pub submit_hint: &'a str,
    pub focused: bool,
}

pub fn render_field(frame: &mut Frame, area: Rect, buffer: &TextBuffer, field: &Field<'_>) {
    let border_color = if field.focused {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", field.title))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    if field.focused && !field.submit_hint.is_empty() {
        block = block.title_bottom(
            Line::from(Span::styled(
                format!(" {} ", field.submit_hint),
                Style::default().fg(Color::DarkGray),
            ))
            .right_aligned(),
        );
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if buffer.is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            field.placeholder,
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(placeholder, inner);
        if field.focused {
            frame.set_cursor_position(Position::new(inner.x, inner.y));
        }
        return;
    }

    let (cursor_row, cursor_col) = buffer.cursor();
    let top = cursor_row.saturating_sub(usize::from(inner.height) - 1);
    let width = usize::from(inner.width);
    let left = horizontal_offset(&buffer.lines()[cursor_row], cursor_col, width);

    let lines: Vec<Line<'_>> = buffer
        .lines()
        .iter()
        .skip(top)
        .take(usize::from(inner.height))
        .map(|line| Line::raw(line.chars().skip(left).collect::<String>()))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);

    if field.focused {
        let before: String = buffer.lines()[cursor_row]
            .chars()
            .skip(left)
            .take(cursor_col - left)
            .collect();
        let x = inner.x + (before.width() as u16).min(inner.width - 1);
        let y = inner.y + (cursor_row - top) as u16;
        frame.set_cursor_position(Position::new(x, y));
    }
}

/// First visible char so the cursor column fits in `width` cells.
fn horizontal_offset(line: &str, cursor_col: usize, width: usize) -> usize {
    let chars: Vec<char> = line.chars().take(cursor_col).collect();
    let mut left = 0;
    while left < chars.len() {
        let shown: String = chars[left..].iter().collect();
        if shown.width() < width {
            break;
        }
        left += 1;
    }
    left
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_when_cursor_fits() {
        assert_eq!(horizontal_offset("hello", 5, 10), 0);
    }

    #[test]
    fn offset_scrolls_to_keep_cursor_visible() {
        assert_eq!(horizontal_offset("abcdefghij", 10, 5), 6);
    }

    #[test]
    fn offset_counts_wide_chars() {
        assert_eq!(horizontal_offset("日本語", 3, 4), 2);
    }
}
