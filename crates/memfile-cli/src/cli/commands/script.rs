//! Script command handler.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use memfile_core::config::Config;
use tracing::info;

use crate::modes::script::{ScriptOptions, ScriptRunner};

pub fn run(file: Option<&Path>, strict: bool, config: &Config) -> Result<()> {
    let options = ScriptOptions {
        export_dir: config.effective_export_dir(),
        overwrite: config.overwrite_exports,
    };
    let mut runner = ScriptRunner::new(options, io::stdout().lock());

    let summary = match file {
        Some(path) => {
            let reader = File::open(path)
                .with_context(|| format!("open script {}", path.display()))?;
            runner.run(BufReader::new(reader))?
        }
        None => runner.run(io::stdin().lock())?,
    };

    let discarded = runner.session().len();
    info!(
        commands = summary.commands,
        warnings = summary.warnings,
        discarded,
        "script finished"
    );

    if strict && summary.warnings > 0 {
        anyhow::bail!("{} warning(s) in strict mode", summary.warnings);
    }
    Ok(())
}
