//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the boundary where side effects happen: the reducer mutates state
//! and returns effects, this module performs them (quitting, writing export
//! files) and feeds results back as events.

use std::io::Stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event;
use memfile_core::interrupt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Poll timeout while waiting for input. Bounds how long a pending Ctrl+C
/// signal goes unnoticed.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop, panic,
/// or a forced Ctrl+C exit.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
}

impl TuiRuntime {
    pub fn new(state: AppState) -> Result<Self> {
        // Panic hook goes in BEFORE entering the alternate screen
        terminal::install_panic_hook();
        interrupt::set_restore_hook(|| {
            let _ = terminal::restore_terminal();
        });
        interrupt::reset();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        Ok(Self { terminal, state })
    }

    /// Runs the event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            if interrupt::is_interrupted() {
                debug!("interrupt received, quitting");
                self.state.should_quit = true;
                break;
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }

            for event in collect_events()? {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
                dirty = true;
            }
        }

        Ok(())
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::WriteExport {
                artifact,
                dir,
                overwrite,
            } => {
                let result = artifact
                    .write_to_dir(&dir, overwrite)
                    .map_err(|e| format!("{e:#}"));
                let event = UiEvent::Exported {
                    name: artifact.file_name().to_string(),
                    result,
                };
                let follow_up = update::update(&mut self.state, event);
                self.execute_effects(follow_up);
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}

/// Blocks up to `IDLE_POLL_DURATION` for input, then drains whatever else is
/// already buffered.
fn collect_events() -> Result<Vec<UiEvent>> {
    let mut events = Vec::new();
    if event::poll(IDLE_POLL_DURATION)? {
        events.push(UiEvent::Terminal(event::read()?));
        while event::poll(Duration::ZERO)? {
            events.push(UiEvent::Terminal(event::read()?));
        }
    }
    Ok(events)
}
