//! Interactive form handler.

use anyhow::Result;
use memfile_core::config::Config;
use memfile_tui::ExportSettings;

pub fn run(config: &Config) -> Result<()> {
    memfile_tui::run_interactive(ExportSettings {
        dir: config.effective_export_dir(),
        overwrite: config.overwrite_exports,
    })
}
