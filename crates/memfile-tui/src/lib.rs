//! Full-screen form for memfile.
//!
//! Elm-style layout: `state` holds everything the form shows, `update` is the
//! reducer, `render` draws, `runtime` owns the terminal and performs effects.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr, stdout};

use anyhow::Result;
pub use features::{input, sidebar, status, viewer};
pub use runtime::TuiRuntime;
pub use state::{AppState, ExportSettings};
use tracing::info;

/// Runs the interactive form until the user quits.
///
/// All files are discarded on return.
pub fn run_interactive(export: ExportSettings) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The interactive form requires a terminal.\n\
             Use `memfile script` for non-interactive use."
        );
    }

    info!(export_dir = %export.dir.display(), "starting form");
    let mut runtime = TuiRuntime::new(AppState::new(export))?;
    let result = runtime.run();
    let discarded = runtime.state.session.len();
    drop(runtime);
    result?;

    info!(discarded, "form closed");
    writeln!(stderr(), "Goodbye! {discarded} file(s) discarded.")?;
    Ok(())
}
