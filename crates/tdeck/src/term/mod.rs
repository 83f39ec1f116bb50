//! Terminal lifecycle management: raw mode and the alternate screen are
//! acquired scoped and restored on every exit path, including panics.

pub mod canvas;
pub mod image;
pub mod input;

use std::io;
use std::panic;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

pub fn setup() -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen, Hide)
        .context("Failed to enter alternate screen")?;
    Ok(())
}

/// Idempotent; safe to call from Drop, the panic hook, and error paths.
pub fn restore() {
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Install a panic hook that restores the terminal before printing the
/// panic. Call before `TerminalGuard::acquire`.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore();
        original_hook(panic_info);
    }));
}

/// Scoped terminal acquisition: the session holds one of these for its
/// whole lifetime and the terminal comes back on Drop no matter how the
/// session ends.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn acquire() -> Result<Self> {
        setup()?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}
