//! Manual-test instruction viewer
//!
//! Shows the fixed Tailscale navigation test instructions in a scrollable,
//! read-only panel and returns once the tester closes it. The panel is a
//! native window when a desktop session is available and a terminal panel
//! otherwise; `--print` writes the text to stdout instead.

pub mod gui;
pub mod scroll;
pub mod tui;

pub use scroll::ScrollRegion;

use anyhow::Result;
use std::io::Write;

use crate::{config::ViewerConfig, utils::rule};

/// The instruction block shown to the tester.
pub const INSTRUCTIONS: &str = include_str!("../../res/instructions.txt");

/// Top-level window description shared by both panel frontends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerWindow {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ViewerWindow {
    fn default() -> Self {
        Self::from(&ViewerConfig::default())
    }
}

impl From<&ViewerConfig> for ViewerWindow {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            title: config.title.clone(),
            width: config.width,
            height: config.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frontend {
    Gui,
    Tui,
    Print,
}

impl Frontend {
    /// Pick the panel frontend when none was forced.
    pub fn detect() -> Self {
        if crate::utils::has_desktop_env() {
            log::info!("Desktop environment detected, using the native window");
            Frontend::Gui
        } else {
            log::info!("No desktop environment detected, using the terminal panel");
            Frontend::Tui
        }
    }
}

/// Show the instructions and block until the viewer is closed.
pub fn start(frontend: Frontend, window: &ViewerWindow) -> Result<()> {
    match frontend {
        Frontend::Gui => gui::start(window),
        Frontend::Tui => tui::start(window),
        Frontend::Print => {
            let stdout = std::io::stdout();
            print_instructions(&mut stdout.lock(), window)
        }
    }
}

/// Plain-text rendition framed by horizontal rules.
pub fn print_instructions(out: &mut impl Write, window: &ViewerWindow) -> Result<()> {
    writeln!(out, "{}", rule())?;
    writeln!(out, "{}", window.title)?;
    writeln!(out, "{}", rule())?;
    write!(out, "{INSTRUCTIONS}")?;
    if !INSTRUCTIONS.ends_with('\n') {
        writeln!(out)?;
    }
    writeln!(out, "{}", rule())?;
    out.flush()?;
    Ok(())
}
