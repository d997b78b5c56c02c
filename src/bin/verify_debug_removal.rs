use std::process::ExitCode;

use wizcheck::{cli::actions, verify::ReportFormat};

/// Confirms the debug banner is gone from the wizard source while both
/// Tailscale entry points remain.
fn main() -> ExitCode {
    wizcheck::init_common();
    match actions::load_default_config() {
        Ok(config) => actions::run_verify(&config.verify, ReportFormat::Text),
        Err(err) => {
            eprintln!("✗ {err:#}");
            ExitCode::FAILURE
        }
    }
}
