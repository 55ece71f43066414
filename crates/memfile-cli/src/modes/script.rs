//! Script mode: drive a session from a line-oriented command stream.
//!
//! One command per line. Blank lines and `#` comments are skipped. In text
//! arguments the two-character sequence `\n` is a newline and `\\` a
//! backslash. Every command prints one status line prefixed with `ok:`,
//! `warning:` or `info:`.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use memfile_core::interrupt;
use memfile_core::session::{Notice, NoticeLevel, Session, StoreError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Where `export` writes.
#[derive(Debug, Clone)]
pub struct ScriptOptions {
    pub export_dir: PathBuf,
    pub overwrite: bool,
}

/// A parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Create(String),
    Save(String),
    Append(String),
    Open(String),
    View,
    Cat,
    Delete,
    Export,
    List,
    Clear,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command '{0}'.")]
    Unknown(String),
    #[error("'{0}' takes no arguments.")]
    UnexpectedArgument(&'static str),
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    pub commands: usize,
    pub warnings: usize,
}

/// Parses one line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = trimmed
        .split_once(char::is_whitespace)
        .map_or((trimmed, ""), |(verb, rest)| (verb, rest.trim_start()));

    let bare = |command: ScriptCommand, name: &'static str| {
        if rest.trim().is_empty() {
            Ok(Some(command))
        } else {
            Err(ParseError::UnexpectedArgument(name))
        }
    };

    match verb {
        "create" => Ok(Some(ScriptCommand::Create(rest.trim_end().to_string()))),
        "open" => Ok(Some(ScriptCommand::Open(rest.trim_end().to_string()))),
        "save" => Ok(Some(ScriptCommand::Save(unescape(rest)))),
        "append" => Ok(Some(ScriptCommand::Append(unescape(rest)))),
        "view" => bare(ScriptCommand::View, "view"),
        "cat" => bare(ScriptCommand::Cat, "cat"),
        "delete" => bare(ScriptCommand::Delete, "delete"),
        "export" => bare(ScriptCommand::Export, "export"),
        "list" => bare(ScriptCommand::List, "list"),
        "clear" => bare(ScriptCommand::Clear, "clear"),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

/// Expands `\n` and `\\`. Any other backslash is kept as is.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('n') => {
                chars.next();
                out.push('\n');
            }
            Some('\\') => {
                chars.next();
                out.push('\\');
            }
            _ => out.push('\\'),
        }
    }
    out
}

/// Owns a session for the lifetime of one script.
pub struct ScriptRunner<W: Write> {
    session: Session,
    options: ScriptOptions,
    out: W,
    summary: ScriptSummary,
}

impl<W: Write> ScriptRunner<W> {
    pub fn new(options: ScriptOptions, out: W) -> Self {
        Self {
            session: Session::new(),
            options,
            out,
            summary: ScriptSummary::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Executes every line of `input`. Stops early on Ctrl+C.
    pub fn run(&mut self, input: impl BufRead) -> Result<ScriptSummary> {
        for (index, line) in input.lines().enumerate() {
            interrupt::check()?;
            let line = line.context("read script line")?;
            let line_no = index + 1;

            match parse_line(&line) {
                Ok(None) => {}
                Ok(Some(command)) => {
                    debug!(line = line_no, ?command, "script command");
                    self.execute(&command)?;
                }
                Err(e) => {
                    debug!(line = line_no, error = %e, "script parse error");
                    self.warning(&format!("line {line_no}: {e}"))?;
                }
            }
        }

        self.out.flush()?;
        Ok(self.summary)
    }

    /// Runs one command and prints its outcome.
    pub fn execute(&mut self, command: &ScriptCommand) -> Result<()> {
        self.summary.commands += 1;
        match command {
            ScriptCommand::Create(name) => {
                let result = self.session.create_file(name);
                self.report(result)
            }
            ScriptCommand::Save(text) => {
                let result = self.session.save_data(text);
                self.report(result)
            }
            ScriptCommand::Append(text) => {
                let result = self.session.append_data(text);
                self.report(result)
            }
            ScriptCommand::Open(name) => {
                let result = self.session.open_file(name);
                self.report(result)
            }
            ScriptCommand::View => {
                let notice = self.session.toggle_view();
                self.notice(&notice)?;
                if let Some(content) = self.session.displayed_content() {
                    writeln!(self.out, "{content}")?;
                }
                Ok(())
            }
            ScriptCommand::Cat => self.cat(),
            ScriptCommand::Delete => {
                let result = self.session.delete_file();
                self.report(result)
            }
            ScriptCommand::Export => self.export(),
            ScriptCommand::List => self.list(),
            ScriptCommand::Clear => {
                let notice = self.session.clear_all();
                self.notice(&notice)
            }
        }
    }

    /// Prints the current file's content without touching the viewer.
    fn cat(&mut self) -> Result<()> {
        if self.session.current().is_none() {
            return self.warning(&StoreError::NoFileOpen.to_string());
        }
        if !self.session.view().saved {
            return self.notice(&Notice::NothingSaved);
        }
        let content = self.session.current_content().unwrap_or_default();
        writeln!(self.out, "{content}")?;
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        let artifact = match self.session.export_file() {
            Ok(Some(artifact)) => artifact,
            Ok(None) => return self.notice(&Notice::NothingSaved),
            Err(e) => return self.warning(&e.to_string()),
        };

        match artifact.write_to_dir(&self.options.export_dir, self.options.overwrite) {
            Ok(path) => {
                info!(name = artifact.file_name(), path = %path.display(), "download written");
                let message = format!(
                    "Downloaded '{}' to {}",
                    artifact.file_name(),
                    path.display()
                );
                self.emit(NoticeLevel::Success, &message)
            }
            Err(e) => {
                warn!(name = artifact.file_name(), error = %format!("{e:#}"), "download failed");
                self.warning(&format!("Download failed: {e:#}"))
            }
        }
    }

    fn list(&mut self) -> Result<()> {
        if self.session.is_empty() {
            return self.emit(NoticeLevel::Info, "No files created yet.");
        }
        let current = self.session.current();
        for name in self.session.names() {
            let marker = if Some(name) == current { '*' } else { ' ' };
            writeln!(self.out, "{marker} {name}")?;
        }
        Ok(())
    }

    fn report(&mut self, result: Result<Notice, StoreError>) -> Result<()> {
        match result {
            Ok(notice) => self.notice(&notice),
            Err(e) => self.warning(&e.to_string()),
        }
    }

    fn notice(&mut self, notice: &Notice) -> Result<()> {
        self.emit(notice.level(), &notice.to_string())
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        self.emit(NoticeLevel::Warning, message)
    }

    /// Prints one status line. The only place warnings are counted.
    fn emit(&mut self, level: NoticeLevel, message: &str) -> Result<()> {
        let prefix = match level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => {
                self.summary.warnings += 1;
                "warning"
            }
        };
        writeln!(self.out, "{prefix}: {message}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn run_script(script: &str) -> (String, ScriptSummary) {
        let dir = tempdir().unwrap();
        run_script_in(script, dir.path().to_path_buf())
    }

    fn run_script_in(script: &str, export_dir: PathBuf) -> (String, ScriptSummary) {
        let mut out = Vec::new();
        let summary = {
            let mut runner = ScriptRunner::new(
                ScriptOptions {
                    export_dir,
                    overwrite: false,
                },
                &mut out,
            );
            runner.run(script.as_bytes()).unwrap()
        };
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# create a.txt"), Ok(None));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_line("create notes.txt"),
            Ok(Some(ScriptCommand::Create("notes.txt".to_string())))
        );
        assert_eq!(
            parse_line("save Hello\\nWorld\r"),
            Ok(Some(ScriptCommand::Save("Hello\nWorld".to_string())))
        );
        assert_eq!(parse_line("export"), Ok(Some(ScriptCommand::Export)));
        assert_eq!(parse_line("create"), Ok(Some(ScriptCommand::Create(String::new()))));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_line("rename a b"),
            Err(ParseError::Unknown("rename".to_string()))
        );
        assert_eq!(
            parse_line("list everything"),
            Err(ParseError::UnexpectedArgument("list"))
        );
    }

    #[test]
    fn test_unescape_keeps_unknown_sequences() {
        assert_eq!(unescape(r"a\tb"), r"a\tb");
        assert_eq!(unescape(r"a\\nb"), r"a\nb");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_notes_scenario_exports_joined_content() {
        let dir = tempdir().unwrap();
        let (out, summary) = run_script_in(
            "create notes.txt\nsave Hello\nappend World\nexport\n",
            dir.path().to_path_buf(),
        );

        assert_eq!(summary.warnings, 0);
        assert!(out.contains("ok: File 'notes.txt' created successfully!"));
        assert!(out.contains("ok: Downloaded 'notes.txt'"));
        let written = fs::read_to_string(dir.path().join("notes.txt")).unwrap();
        assert_eq!(written, "Hello\nWorld");
    }

    #[test]
    fn test_duplicate_name_is_a_warning() {
        let (out, summary) = run_script("create a.txt\ncreate a.txt\nlist\n");

        assert_eq!(summary.warnings, 1);
        assert!(out.contains("warning: "));
        assert!(out.contains("* a.txt"));
    }

    #[test]
    fn test_save_without_file() {
        let (out, summary) = run_script("save text\nlist\n");

        assert_eq!(summary.warnings, 1);
        assert!(out.contains("warning: Please create a file first."));
        assert!(out.contains("info: No files created yet."));
    }

    #[test]
    fn test_view_prints_content_when_shown() {
        let (out, _) = run_script("create a\nview\nsave one\\ntwo\nview\nview\n");

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "ok: File 'a' created successfully!",
                "info: Save data first to enable viewing and downloading.",
                "ok: Data saved successfully! You can now view or download it.",
                "info: Showing file content.",
                "one",
                "two",
                "info: File content hidden.",
            ]
        );
    }

    #[test]
    fn test_cat_and_export_before_saving_are_informational() {
        let (out, summary) = run_script("cat\ncreate a\ncat\nexport\n");

        assert_eq!(summary.warnings, 1);
        assert!(out.starts_with("warning: Please create a file first."));
        assert_eq!(
            out.matches("info: Save data first to enable viewing and downloading.")
                .count(),
            2
        );
    }

    #[test]
    fn test_clear_keeps_names_retired() {
        let (out, summary) = run_script("create a\ncreate b\nclear\ncreate a\n");

        assert!(out.contains("ok: Cleared 2 file(s)."));
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.commands, 4);
    }

    #[test]
    fn test_unknown_command_reports_line_number() {
        let (out, summary) = run_script("# header\nfrobnicate\n");

        assert_eq!(summary.warnings, 1);
        assert_eq!(out.trim_end(), "warning: line 2: Unknown command 'frobnicate'.");
    }

    #[test]
    fn test_export_collision_gets_numbered_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "old").unwrap();

        let (out, _) = run_script_in("create a.txt\nsave new\nexport\n", dir.path().to_path_buf());

        assert!(out.contains("a (1).txt"));
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "old");
        assert_eq!(
            fs::read_to_string(dir.path().join("a (1).txt")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_name_arguments_ignore_trailing_whitespace() {
        assert_eq!(
            parse_line("create a.txt \t"),
            Ok(Some(ScriptCommand::Create("a.txt".to_string())))
        );

        let (out, summary) = run_script("create a.txt  \nsave body\ncreate b\nopen a.txt \n");

        assert_eq!(summary.warnings, 0);
        assert!(out.contains("ok: Opened 'a.txt' successfully!"));
    }

    #[test]
    fn test_warning_count_matches_printed_warnings() {
        let (out, summary) = run_script("save x\ndelete\nbogus\ncreate a\ncreate a\nexport\n");

        assert_eq!(summary.warnings, out.matches("warning: ").count());
        assert_eq!(summary.warnings, 4);
    }
}
