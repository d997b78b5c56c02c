pub mod actions;

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Build the command-line interface.
pub fn command() -> Command {
    Command::new("wizcheck")
        .about("Manual, visual and static test harnesses for the backup/restore wizard")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file (default: ./wizcheck.toml when present)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(
            Command::new("instructions")
                .about("Show the Tailscale navigation manual-test instructions")
                .arg(
                    Arg::new("gui")
                        .long("gui")
                        .short('g')
                        .help("Force the native window")
                        .action(ArgAction::SetTrue)
                        .conflicts_with_all(["tui", "print"]),
                )
                .arg(
                    Arg::new("tui")
                        .long("tui")
                        .short('t')
                        .help("Force the terminal panel")
                        .action(ArgAction::SetTrue)
                        .conflicts_with_all(["gui", "print"]),
                )
                .arg(
                    Arg::new("print")
                        .long("print")
                        .short('p')
                        .help("Write the instructions to stdout and exit")
                        .action(ArgAction::SetTrue)
                        .conflicts_with_all(["gui", "tui"]),
                ),
        )
        .subcommand(
            Command::new("launch")
                .about("Open the backup/restore wizard for visual inspection")
                .arg(
                    Arg::new("module")
                        .long("module")
                        .short('m')
                        .help("Wizard module name looked up on the search path")
                        .value_name("NAME"),
                )
                .arg(
                    Arg::new("search-path")
                        .long("search-path")
                        .short('s')
                        .help("Extra directory to search for the wizard module (repeatable)")
                        .value_name("DIR")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Check that the debug banner was removed from the wizard source")
                .arg(
                    Arg::new("target")
                        .long("target")
                        .help("File to inspect (default: nextcloud_restore_and_backup-v9.py)")
                        .value_name("FILE")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .short('j')
                        .help("Output the result in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Parse command line arguments and return ArgMatches.
pub fn parse_args() -> ArgMatches {
    command().get_matches()
}
