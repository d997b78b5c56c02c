//! Visual-inspection launcher for the backup/restore wizard
//!
//! Prints what the tester should look at, constructs the wizard and hands
//! control to its event loop until the window is closed.

pub mod process;

pub use process::*;

use anyhow::{Error, Result};
use std::io::Write;

use crate::{
    config::LaunchConfig,
    utils::{rule, MARK_FAIL, MARK_OK},
};

pub const STARTED_LINE: &str = "Application started, close the wizard window to finish.";

/// External wizard contract: built by a no-argument constructor, then driven
/// by a blocking event loop that returns once the main window closes.
pub trait Wizard {
    fn mainloop(&mut self) -> Result<()>;
}

/// Visual criteria printed before the wizard opens.
pub fn checklist(config: &LaunchConfig) -> Vec<String> {
    let (width, height) = config.geometry;
    vec![
        format!("Window opens at its default size of {width}x{height}"),
        "No yellow \"DEBUG: Content Frame Rendered\" banner on any page".to_string(),
        "Page content starts directly under the header without a gap".to_string(),
        "The Tailscale wizard is reachable from the main menu".to_string(),
        "Tailscale configuration page shows its fields and buttons".to_string(),
        "Back returns from the configuration page to the wizard".to_string(),
        "Return to Main Menu works from every Tailscale page".to_string(),
        "Nothing is clipped or hidden at the default window size".to_string(),
    ]
}

pub fn write_checklist(out: &mut impl Write, config: &LaunchConfig) -> Result<()> {
    writeln!(out, "{}", rule())?;
    writeln!(out, "Visual test: backup/restore wizard layout")?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "Check the following:")?;
    for (idx, item) in checklist(config).iter().enumerate() {
        writeln!(out, "  {}. {item}", idx + 1)?;
    }
    writeln!(out, "{}", rule())?;
    out.flush()?;
    Ok(())
}

/// Run the visual test and return the process exit status.
///
/// Any error raised while constructing the wizard or inside its event loop
/// is written to `err` with its cause chain and backtrace; the status is then
/// 1. `out` only sees the started line once construction succeeded.
pub fn launch<W, F>(
    config: &LaunchConfig,
    construct: F,
    out: &mut impl Write,
    err: &mut impl Write,
) -> i32
where
    W: Wizard,
    F: FnOnce() -> Result<W>,
{
    match drive(config, construct, out) {
        Ok(()) => 0,
        Err(error) => {
            log::debug!("Wizard launch failed: {error:#}");
            let _ = write_failure(err, &error);
            1
        }
    }
}

fn drive<W, F>(config: &LaunchConfig, construct: F, out: &mut impl Write) -> Result<()>
where
    W: Wizard,
    F: FnOnce() -> Result<W>,
{
    write_checklist(out, config)?;

    let mut wizard = construct()?;
    writeln!(out, "{MARK_OK} {STARTED_LINE}")?;
    out.flush()?;

    wizard.mainloop()?;

    writeln!(out, "{MARK_OK} Wizard closed")?;
    out.flush()?;
    Ok(())
}

/// Traceback-style diagnostic: message, cause chain and captured backtrace.
pub fn write_failure(err: &mut impl Write, error: &Error) -> Result<()> {
    writeln!(err, "{MARK_FAIL} Wizard failed: {error}")?;
    writeln!(err)?;
    writeln!(err, "Traceback:")?;
    writeln!(err, "{error:?}")?;
    err.flush()?;
    Ok(())
}
