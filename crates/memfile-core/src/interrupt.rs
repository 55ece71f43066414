//! Ctrl+C handling.
//!
//! The signal handler only flips a flag. Controllers poll `is_interrupted()`
//! between actions and decide how to stop. A second Ctrl+C force-exits after
//! running the registered restore hook, because `process::exit()` skips Drop.
//!
//! While the TUI is in raw mode Ctrl+C arrives as a key event instead, so
//! this path mainly serves script mode and the moments around the TUI.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static RESTORE_HOOK: OnceLock<Box<dyn Fn() + Send + Sync>> = OnceLock::new();

/// Error returned when processing stopped because of Ctrl+C.
#[derive(Debug)]
pub struct InterruptedError;

impl std::fmt::Display for InterruptedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interrupted")
    }
}

impl std::error::Error for InterruptedError {}

/// Registers the Ctrl+C handler.
///
/// # Errors
/// Returns an error if a handler is already registered or registration fails.
pub fn init() -> Result<()> {
    ctrlc::set_handler(trigger_ctrl_c).context("Failed to set Ctrl+C handler")
}

/// Records an interrupt, force-exiting on the second one.
pub fn trigger_ctrl_c() {
    if INTERRUPTED.swap(true, Ordering::SeqCst) {
        if let Some(hook) = RESTORE_HOOK.get() {
            hook();
        }
        std::process::exit(130);
    }
}

/// Checks if an interrupt has been requested.
pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Clears the interrupt flag.
pub fn reset() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

/// Sets the hook run before a forced exit. Only the first call takes effect.
pub fn set_restore_hook<F>(hook: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let _ = RESTORE_HOOK.set(Box::new(hook));
}

/// Returns `Err(InterruptedError)` if an interrupt is pending.
pub fn check() -> Result<()> {
    if is_interrupted() {
        return Err(InterruptedError.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_round_trip() {
        reset();
        assert!(check().is_ok());

        trigger_ctrl_c();
        assert!(is_interrupted());
        let err = check().unwrap_err();
        assert!(err.downcast_ref::<InterruptedError>().is_some());

        reset();
        assert!(!is_interrupted());
    }
}
