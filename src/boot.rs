use chrono::Local;
use log::LevelFilter;
use std::io::{self, Write};

use env_logger::{Builder, Env, Target};

/// Common initialization shared by every entrypoint.
///
/// Records go to stderr, filtered by `RUST_LOG` (default `warn`). When
/// `WIZCHECK_LOG_FILE` is set they are appended to that file instead, so a
/// terminal frontend is never scribbled over.
pub fn init_common() {
    if let Ok(path) = std::env::var("WIZCHECK_LOG_FILE") {
        if let Err(err) = init_file_logger(&path) {
            eprintln!("Failed to initialize file logger at '{path}': {err}");
            init_stderr_logger();
        }
    } else {
        init_stderr_logger();
    }
}

fn init_stderr_logger() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .try_init();
}

fn init_file_logger(path: &str) -> io::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let mut builder = Builder::new();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:{} {} [{}] - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(file)))
        .filter_level(LevelFilter::Debug)
        .parse_default_env();

    if builder.try_init().is_err() {
        return Err(io::Error::other("a logger is already installed"));
    }

    log::info!("File logger initialized at {path}");

    Ok(())
}
