//! NoteDeck terminal front end.
//!
//! # Responsibility
//! - Resolve configuration, start logging and load the note store.
//! - Dispatch one command and print its output.
//!
//! # Invariants
//! - Logging failure is reported but never blocks note operations.
//! - Exit code `2` means bad usage, `1` means the command failed.

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use log::{info, warn};
use notedeck_core::{
    init_logging, AppConfig, JsonFileNoteRepository, NoteStore, RenderOptions, SystemClock,
};
use std::io::IsTerminal;
use std::process::ExitCode;

const DEFAULT_WIDTH: usize = 80;

fn main() -> ExitCode {
    // clap exits with status 2 on bad usage and 0 for `--help`/`--version`.
    let command = Cli::parse().into_command();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    // Why: `version` and `path` must work even when the log dir is
    // unwritable, so they never touch it.
    if needs_logging(&command) {
        if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let options = RenderOptions {
        width: terminal_width(),
        ansi: std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    };
    let mut store = NoteStore::load(JsonFileNoteRepository::new(&config.data_file), SystemClock);

    match commands::execute(&mut store, command, &config.data_file, &options) {
        Ok(output) => {
            info!("event=cli_command module=cli status=ok");
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            warn!("event=cli_command module=cli status=error error={}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn needs_logging(command: &Command) -> bool {
    !matches!(command, Command::Version | Command::Path)
}

fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|width| *width > 0)
        .unwrap_or(DEFAULT_WIDTH)
}

