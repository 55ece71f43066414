//! Export ("download") artifacts.
//!
//! An artifact is the UTF-8 content of one file plus a suggested file name and
//! a content type hint. Writing it to disk is the controller's job; this
//! module only supplies the helpers for doing so safely.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::info;

/// Content type hint attached to every artifact.
pub const CONTENT_TYPE: &str = "text/plain";

/// File name used when the suggested name has no usable component.
const FALLBACK_FILE_NAME: &str = "export.txt";

/// Upper bound on numbered alternatives tried before giving up.
const MAX_NUMBERED_ATTEMPTS: usize = 1000;

/// Bytes ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    file_name: String,
    bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn new(file_name: &str, content: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            bytes: content.as_bytes().to_vec(),
        }
    }

    /// Suggested download name (the in-store key, unmodified).
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    /// Name safe to create inside an export directory.
    ///
    /// Keeps the last path component of the suggested name and drops
    /// anything that would escape the directory.
    pub fn disk_file_name(&self) -> String {
        let last = self
            .file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim();
        if last.is_empty() || last == "." || last == ".." {
            FALLBACK_FILE_NAME.to_string()
        } else {
            last.to_string()
        }
    }

    /// Writes the artifact into `dir` and returns the path written.
    ///
    /// The bytes go to a uniquely named temp file first, then are moved into
    /// place. When `overwrite` is false an existing file is never replaced: a
    /// numbered name such as `notes (1).txt` is used instead. On failure the
    /// temp file is removed.
    pub fn write_to_dir(&self, dir: &Path, overwrite: bool) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;

        let mut staged = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        staged
            .write_all(&self.bytes)
            .with_context(|| format!("Failed to write {}", staged.path().display()))?;

        let name = self.disk_file_name();
        let path = if overwrite {
            let path = dir.join(&name);
            staged
                .persist(&path)
                .map_err(|e| e.error)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            path
        } else {
            persist_numbered(staged, dir, &name)?
        };

        info!(path = %path.display(), bytes = self.bytes.len(), "file exported");
        Ok(path)
    }
}

/// Moves `staged` to the first free name among `name`, `name (1)`, ...
///
/// `persist_noclobber` fails atomically when the target exists, so a file
/// created by someone else between attempts is never replaced.
fn persist_numbered(mut staged: NamedTempFile, dir: &Path, name: &str) -> Result<PathBuf> {
    let (stem, ext) = split_extension(name);
    for n in 0..=MAX_NUMBERED_ATTEMPTS {
        let candidate = dir.join(numbered_name(stem, ext, n));
        match staged.persist_noclobber(&candidate) {
            Ok(_) => return Ok(candidate),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => staged = e.file,
            Err(e) => {
                return Err(e.error)
                    .with_context(|| format!("Failed to write {}", candidate.display()));
            }
        }
    }
    anyhow::bail!("No free file name for {name} in {}", dir.display())
}

/// `notes.txt` for 0, `notes (n).txt` otherwise.
fn numbered_name(stem: &str, ext: Option<&str>, n: usize) -> String {
    match (n, ext) {
        (0, Some(ext)) => format!("{stem}.{ext}"),
        (0, None) => stem.to_string(),
        (n, Some(ext)) => format!("{stem} ({n}).{ext}"),
        (n, None) => format!("{stem} ({n})"),
    }
}

/// Splits `notes.txt` into `("notes", Some("txt"))`. Dotfiles keep their dot.
fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}
