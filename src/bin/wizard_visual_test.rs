use std::process::ExitCode;

use wizcheck::cli::actions;

/// Visual test: opens the backup/restore wizard at its default size.
fn main() -> ExitCode {
    wizcheck::init_common();
    match actions::load_default_config() {
        Ok(config) => actions::run_launch(&config.launch),
        Err(err) => {
            eprintln!("✗ {err:#}");
            ExitCode::FAILURE
        }
    }
}
