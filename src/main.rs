use std::process::ExitCode;

fn main() -> ExitCode {
    wizcheck::init_common();
    let matches = wizcheck::cli::parse_args();
    wizcheck::cli::actions::dispatch(&matches)
}
