use anyhow::Result;
use clap::ArgMatches;
use std::{io, path::PathBuf, process::ExitCode};

use crate::{
    config::{HarnessConfig, LaunchConfig, VerifyConfig},
    launcher::{self, ProcessWizard},
    utils::{self, MARK_FAIL},
    verify::{self, ReportFormat},
    viewer::{self, Frontend, ViewerWindow},
};

/// Route parsed arguments to the matching harness.
pub fn dispatch(matches: &ArgMatches) -> ExitCode {
    let Some((name, sub)) = matches.subcommand() else {
        return ExitCode::FAILURE;
    };

    // Global values are propagated into the subcommand matches
    let config_path = sub
        .get_one::<PathBuf>("config")
        .or_else(|| matches.get_one::<PathBuf>("config"));
    let config = match HarnessConfig::load(config_path.map(PathBuf::as_path)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{MARK_FAIL} {err:#}");
            return ExitCode::FAILURE;
        }
    };

    match name {
        "instructions" => {
            let frontend = if sub.get_flag("gui") {
                Some(Frontend::Gui)
            } else if sub.get_flag("tui") {
                Some(Frontend::Tui)
            } else if sub.get_flag("print") {
                Some(Frontend::Print)
            } else {
                None
            };
            run_instructions(&config, frontend)
        }
        "launch" => {
            let mut launch = config.launch;
            if let Some(module) = sub.get_one::<String>("module") {
                launch.module = module.clone();
            }
            if let Some(dirs) = sub.get_many::<PathBuf>("search-path") {
                launch.search_path.extend(dirs.cloned());
            }
            run_launch(&launch)
        }
        "verify" => {
            let mut verify = config.verify;
            if let Some(target) = sub.get_one::<PathBuf>("target") {
                verify.target = target.clone();
            }
            let format = if sub.get_flag("json") {
                ReportFormat::Json
            } else {
                ReportFormat::Text
            };
            run_verify(&verify, format)
        }
        _ => ExitCode::FAILURE,
    }
}

/// Instruction viewer. `None` picks the frontend from the environment.
pub fn run_instructions(config: &HarnessConfig, frontend: Option<Frontend>) -> ExitCode {
    let window = ViewerWindow::from(&config.viewer);
    let frontend = frontend.unwrap_or_else(Frontend::detect);

    match viewer::start(frontend, &window) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("Instruction viewer failed: {err:#}");
            eprintln!("{MARK_FAIL} Could not show the instructions: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Wizard launcher with Ctrl+C forwarded to the wizard.
pub fn run_launch(config: &LaunchConfig) -> ExitCode {
    enable_backtraces();

    let (interrupt_tx, interrupt_rx) = flume::bounded::<()>(1);
    if let Err(err) = ctrlc::set_handler(move || {
        let _ = interrupt_tx.try_send(());
    }) {
        log::warn!("Failed to install Ctrl+C handler: {err}");
    }

    let launcher_dir = utils::exe_dir()
        .map_err(|err| log::warn!("Launcher directory unavailable: {err:#}"))
        .ok();

    let stdout = io::stdout();
    let stderr = io::stderr();
    let code = launcher::launch(
        config,
        || ProcessWizard::construct(config, launcher_dir.as_deref(), Some(interrupt_rx)),
        &mut stdout.lock(),
        &mut stderr.lock(),
    );

    exit_code(code)
}

/// Debug-banner verifier.
pub fn run_verify(config: &VerifyConfig, format: ReportFormat) -> ExitCode {
    let outcome = verify::verify_path(&config.target);
    let stdout = io::stdout();

    if let Err(err) = verify::write_report(&mut stdout.lock(), &outcome, format) {
        eprintln!("{MARK_FAIL} Failed to write report: {err:#}");
        return ExitCode::FAILURE;
    }

    if outcome.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Configuration for the argument-less entrypoints.
pub fn load_default_config() -> Result<HarnessConfig> {
    HarnessConfig::load(None)
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

// Launcher diagnostics include the stack trace unless the user chose a
// backtrace setting explicitly.
fn enable_backtraces() {
    if std::env::var_os("RUST_BACKTRACE").is_none() && std::env::var_os("RUST_LIB_BACKTRACE").is_none()
    {
        std::env::set_var("RUST_LIB_BACKTRACE", "1");
    }
}
