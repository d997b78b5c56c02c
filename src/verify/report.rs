use anyhow::Result;
use std::io::Write;

use super::{Check, Outcome, Polarity};
use crate::utils::{mark, rule, MARK_FAIL};

pub const VERDICT_SUCCESS: &str = "SUCCESS";
pub const VERDICT_FAILURE: &str = "FAILURE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Write `outcome` in the requested format.
pub fn write_report(out: &mut impl Write, outcome: &Outcome, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Text => write_text_report(out, outcome)?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, outcome)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_text_report(out: &mut impl Write, outcome: &Outcome) -> Result<()> {
    writeln!(out, "{}", rule())?;
    writeln!(out, "Debug banner removal check")?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "Target: {}", outcome.target().display())?;
    writeln!(out)?;

    match outcome {
        Outcome::NotFound { target } => {
            writeln!(out, "{MARK_FAIL} File not found: {}", target.display())?;
        }
        Outcome::Unreadable { target, error } => {
            writeln!(out, "{MARK_FAIL} Could not read {}: {error}", target.display())?;
        }
        Outcome::Checked { report, .. } => {
            for check in &report.checks {
                writeln!(out, "{}", check_line(check))?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", rule())?;
    if outcome.success() {
        writeln!(
            out,
            "{VERDICT_SUCCESS}: debug banner removed, Tailscale wizard entry points intact"
        )?;
    } else {
        writeln!(out, "{VERDICT_FAILURE}: cleanup incomplete, see the ✗ lines above")?;
    }
    writeln!(out, "{}", rule())?;
    Ok(())
}

/// One report line, e.g. `✓ Debug banner text: absent`.
pub fn check_line(check: &Check) -> String {
    let state = if check.found { "present" } else { "absent" };
    let expected = match check.required {
        Polarity::Present => "present",
        Polarity::Absent => "absent",
    };

    if check.passed {
        format!("{} {}: {state}", mark(true), check.observation.label())
    } else {
        format!(
            "{} {}: {state} (expected {expected})",
            mark(false),
            check.observation.label()
        )
    }
}
