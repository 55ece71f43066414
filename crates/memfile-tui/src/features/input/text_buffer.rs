//! Editable text for the form fields.
//!
//! Lines plus a (row, col) cursor in char units. Single-line buffers never
//! hold a newline: Enter is left to the caller and pasted newlines become
//! spaces.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Cursor movement commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
    Forward,
    Back,
    Head,
    End,
}

#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
    single_line: bool,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_row: 0,
            cursor_col: 0,
            single_line: false,
        }
    }
}

impl TextBuffer {
    /// A multi-line buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer restricted to one line.
    pub fn single_line() -> Self {
        Self {
            single_line: true,
            ..Self::default()
        }
    }

    pub fn is_single_line(&self) -> bool {
        self.single_line
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the current cursor position as (row, col) in char units.
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// Full text with lines joined by `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(String::is_empty)
    }

    /// Empties the buffer and resets the cursor.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.lines.push(String::new());
        self.cursor_row = 0;
        self.cursor_col = 0;
    }

    /// Inserts text at the cursor, advancing the cursor past it.
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.single_line && text.contains('\n') {
            let flattened = text.replace("\r\n", " ").replace('\n', " ");
            self.insert_str(&flattened);
            return;
        }

        let row = self.cursor_row;
        let current = std::mem::take(&mut self.lines[row]);
        let split_at = char_to_byte_index(&current, self.cursor_col);
        let (prefix, suffix) = current.split_at(split_at);

        let mut parts = text.split('\n').peekable();
        let mut new_lines = Vec::new();
        let mut line = prefix.to_string();
        while let Some(part) = parts.next() {
            line.push_str(part);
            if parts.peek().is_some() {
                new_lines.push(std::mem::take(&mut line));
            }
        }
        self.cursor_row = row + new_lines.len();
        self.cursor_col = line_char_len(&line);
        line.push_str(suffix);
        new_lines.push(line);

        self.lines.splice(row..=row, new_lines);
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Splits the line at the cursor. Ignored in single-line buffers.
    pub fn insert_newline(&mut self) {
        if !self.single_line {
            self.insert_str("\n");
        }
    }

    /// Backspace.
    pub fn delete_prev_char(&mut self) {
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_row];
            let start = char_to_byte_index(line, self.cursor_col - 1);
            let end = char_to_byte_index(line, self.cursor_col);
            line.replace_range(start..end, "");
            self.cursor_col -= 1;
            return;
        }
        if self.cursor_row == 0 {
            return;
        }
        let current = self.lines.remove(self.cursor_row);
        self.cursor_row -= 1;
        self.cursor_col = line_char_len(&self.lines[self.cursor_row]);
        self.lines[self.cursor_row].push_str(&current);
    }

    /// Delete.
    pub fn delete_next_char(&mut self) {
        let row = self.cursor_row;
        if self.cursor_col < line_char_len(&self.lines[row]) {
            let line = &mut self.lines[row];
            let start = char_to_byte_index(line, self.cursor_col);
            let end = char_to_byte_index(line, self.cursor_col + 1);
            line.replace_range(start..end, "");
        } else if row + 1 < self.lines.len() {
            let next = self.lines.remove(row + 1);
            self.lines[row].push_str(&next);
        }
    }

    /// Deletes from the cursor to the end of the line.
    pub fn delete_to_end(&mut self) {
        let line = &mut self.lines[self.cursor_row];
        let idx = char_to_byte_index(line, self.cursor_col);
        line.truncate(idx);
    }

    /// Deletes the word left of the cursor, stopping at the line start.
    pub fn delete_word_left(&mut self) {
        if self.cursor_col == 0 {
            self.delete_prev_char();
            return;
        }
        let line = &mut self.lines[self.cursor_row];
        let chars: Vec<char> = line.chars().collect();
        let target = word_start_before(&chars, self.cursor_col);
        let start = char_to_byte_index(line, target);
        let end = char_to_byte_index(line, self.cursor_col);
        line.replace_range(start..end, "");
        self.cursor_col = target;
    }

    pub fn move_cursor(&mut self, movement: CursorMove) {
        match movement {
            CursorMove::Up => {
                if self.cursor_row > 0 {
                    self.cursor_row -= 1;
                    self.clamp_col();
                }
            }
            CursorMove::Down => {
                if self.cursor_row + 1 < self.lines.len() {
                    self.cursor_row += 1;
                    self.clamp_col();
                }
            }
            CursorMove::Forward => {
                if self.cursor_col < line_char_len(&self.lines[self.cursor_row]) {
                    self.cursor_col += 1;
                } else if self.cursor_row + 1 < self.lines.len() {
                    self.cursor_row += 1;
                    self.cursor_col = 0;
                }
            }
            CursorMove::Back => {
                if self.cursor_col > 0 {
                    self.cursor_col -= 1;
                } else if self.cursor_row > 0 {
                    self.cursor_row -= 1;
                    self.cursor_col = line_char_len(&self.lines[self.cursor_row]);
                }
            }
            CursorMove::Head => self.cursor_col = 0,
            CursorMove::End => self.cursor_col = line_char_len(&self.lines[self.cursor_row]),
        }
    }

    /// Applies an editing key. Returns false for keys the buffer ignores, so
    /// the caller can route them elsewhere.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('a') if ctrl => self.move_cursor(CursorMove::Head),
            KeyCode::Char('k') if ctrl => self.delete_to_end(),
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char('w') if ctrl => self.delete_word_left(),
            KeyCode::Backspace if alt || ctrl => self.delete_word_left(),
            KeyCode::Char(ch) if !ctrl && !alt => self.insert_char(ch),
            KeyCode::Enter if !self.single_line => self.insert_newline(),
            KeyCode::Backspace => self.delete_prev_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left => self.move_cursor(CursorMove::Back),
            KeyCode::Right => self.move_cursor(CursorMove::Forward),
            KeyCode::Up if !self.single_line => self.move_cursor(CursorMove::Up),
            KeyCode::Down if !self.single_line => self.move_cursor(CursorMove::Down),
            KeyCode::Home => self.move_cursor(CursorMove::Head),
            KeyCode::End => self.move_cursor(CursorMove::End),
            _ => return false,
        }
        true
    }

    fn clamp_col(&mut self) {
        self.cursor_col = self
            .cursor_col
            .min(line_char_len(&self.lines[self.cursor_row]));
    }
}

fn line_char_len(line: &str) -> usize {
    line.chars().count()
}

fn char_to_byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(idx, _)| idx)
}

/// Skips whitespace, then one run of word or punctuation chars.
fn word_start_before(chars: &[char], mut idx: usize) -> usize {
    idx = idx.min(chars.len());
    while idx > 0 && chars[idx - 1].is_whitespace() {
        idx -= 1;
    }
    if idx == 0 {
        return 0;
    }
    let word = is_word_char(chars[idx - 1]);
    while idx > 0 && !chars[idx - 1].is_whitespace() && is_word_char(chars[idx - 1]) == word {
        idx -= 1;
    }
    idx
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
