//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They carry the only I/O the form performs, so the reducer stays free of
//! side effects and can be driven directly in tests.

use std::path::PathBuf;

use memfile_core::export::ExportArtifact;

#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Write an artifact into the export directory ("download").
    WriteExport {
        artifact: ExportArtifact,
        dir: PathBuf,
        overwrite: bool,
    },
}
