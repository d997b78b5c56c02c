//! Shared utilities for wizcheck
//!
//! - Desktop-session detection used to pick a viewer frontend
//! - Plain-text presentation helpers shared by every report
//! - Location of the running executable

pub mod desktop;
pub mod text;

pub use desktop::*;
pub use text::*;

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Directory containing the running executable.
pub fn exe_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    exe.parent()
        .map(|dir| dir.to_path_buf())
        .with_context(|| format!("Executable path {} has no parent", exe.display()))
}
