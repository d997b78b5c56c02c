//! Debug-banner removal verifier
//!
//! Reads the wizard's main application file once and confirms, by literal
//! substring search, that the yellow "Content Frame Rendered" debug banner is
//! gone while both Tailscale wizard entry points are still defined.

pub mod report;

pub use report::*;

use serde::Serialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use strum::{EnumIter, IntoEnumIterator};

pub const DEBUG_BANNER_TEXT: &str = "🔍 DEBUG: Content Frame Rendered";
pub const DEBUG_BANNER_CAPTION: &str = "DEBUG: Content Frame Rendered";
pub const DEBUG_BANNER_BACKGROUND: &str = r##"bg="#FFD700""##;
pub const WIZARD_ENTRY_POINT: &str = "def show_tailscale_wizard(self):";
pub const CONFIG_ENTRY_POINT: &str = "def _show_tailscale_config(self):";

/// Whether a substring is required to be found or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Present,
    Absent,
}

impl Polarity {
    pub fn holds(self, found: bool) -> bool {
        match self {
            Polarity::Present => found,
            Polarity::Absent => !found,
        }
    }
}

/// One of the four checks, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Observation {
    DebugText,
    DebugStyle,
    WizardFn,
    ConfigFn,
}

impl Observation {
    pub fn label(self) -> &'static str {
        match self {
            Observation::DebugText => "Debug banner text",
            Observation::DebugStyle => "Debug banner styling",
            Observation::WizardFn => "show_tailscale_wizard()",
            Observation::ConfigFn => "_show_tailscale_config()",
        }
    }

    pub fn required(self) -> Polarity {
        match self {
            Observation::DebugText | Observation::DebugStyle => Polarity::Absent,
            Observation::WizardFn | Observation::ConfigFn => Polarity::Present,
        }
    }

    /// Literal, case-sensitive substring test against the whole file.
    pub fn observe(self, source: &str) -> bool {
        match self {
            Observation::DebugText => source.contains(DEBUG_BANNER_TEXT),
            Observation::DebugStyle => {
                source.contains(DEBUG_BANNER_BACKGROUND) && source.contains(DEBUG_BANNER_CAPTION)
            }
            Observation::WizardFn => source.contains(WIZARD_ENTRY_POINT),
            Observation::ConfigFn => source.contains(CONFIG_ENTRY_POINT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Check {
    pub observation: Observation,
    pub found: bool,
    pub required: Polarity,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub checks: Vec<Check>,
}

impl VerificationReport {
    pub fn success(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }

    pub fn check(&self, observation: Observation) -> Option<&Check> {
        self.checks
            .iter()
            .find(|check| check.observation == observation)
    }
}

/// Result of verifying one target file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Checked {
        target: PathBuf,
        report: VerificationReport,
    },
    NotFound {
        target: PathBuf,
    },
    Unreadable {
        target: PathBuf,
        error: String,
    },
}

impl Outcome {
    pub fn success(&self) -> bool {
        matches!(self, Outcome::Checked { report, .. } if report.success())
    }

    pub fn target(&self) -> &Path {
        match self {
            Outcome::Checked { target, .. }
            | Outcome::NotFound { target }
            | Outcome::Unreadable { target, .. } => target,
        }
    }
}

/// Evaluate every observation against an in-memory source blob.
pub fn verify_source(source: &str) -> VerificationReport {
    let checks = Observation::iter()
        .map(|observation| {
            let found = observation.observe(source);
            let required = observation.required();
            Check {
                observation,
                found,
                required,
                passed: required.holds(found),
            }
        })
        .collect();

    VerificationReport { checks }
}

/// Read `target` once and verify it.
///
/// A missing file short-circuits to [`Outcome::NotFound`]; any other read
/// failure, including content that is not valid UTF-8, is
/// [`Outcome::Unreadable`].
pub fn verify_path(target: &Path) -> Outcome {
    let target_buf = target.to_path_buf();
    match fs::read_to_string(target) {
        Ok(source) => {
            log::debug!("Read {} bytes from {}", source.len(), target.display());
            Outcome::Checked {
                target: target_buf,
                report: verify_source(&source),
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::warn!("Verification target {} not found", target.display());
            Outcome::NotFound { target: target_buf }
        }
        Err(err) => {
            log::warn!("Failed to read {}: {err}", target.display());
            Outcome::Unreadable {
                target: target_buf,
                error: err.to_string(),
            }
        }
    }
}
