//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use memfile_core::{config, interrupt, logging};

mod commands;

#[derive(Parser)]
#[command(name = "memfile")]
#[command(version = "0.1")]
#[command(about = "Scratch text files that vanish when the session ends")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory downloads are written into (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    export_dir: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run commands from a file or stdin, one per line
    Script {
        /// Script file (default: stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Exit with status 1 if any command produced a warning
        #[arg(long)]
        strict: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Write the default config file
    Init,
    /// Print the effective configuration
    Show,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    interrupt::init()?;

    let mut config = config::Config::load().context("load config")?;
    if let Some(dir) = cli.export_dir.as_deref() {
        config.export_dir = Some(dir.to_string_lossy().into_owned());
    }

    // keep the guard alive until exit so buffered log lines are flushed
    let _log_guard = logging::init(&config.log).context("init logging")?;

    dispatch(cli.command, &config)
}

fn dispatch(command: Option<Commands>, config: &config::Config) -> Result<()> {
    // default to the interactive form
    let Some(command) = command else {
        return commands::form::run(config);
    };

    match command {
        Commands::Script { file, strict } => commands::script::run(file.as_deref(), strict, config),

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Show => commands::config::show(config),
        },
    }
}
