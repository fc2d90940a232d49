//! Command handlers for the metro compiler CLI.
//!
//! Each submodule implements one command. Handlers return the process exit
//! code instead of exiting, so they can be driven from tests.

mod check;
mod debug;
mod explain;

pub use check::{check_files, check_source, FileReport};
pub use debug::{lex_file, parse_file};
pub use explain::explain_error;

use crate::config::{Command, Config};

/// Run the command `config` describes.
pub fn run(config: &Config) -> i32 {
    match config.command {
        Command::Check => check_files(config),
        Command::Lex => lex_file(&config.inputs[0]),
        Command::Parse => parse_file(&config.inputs[0], config),
        Command::Explain => explain_error(&config.inputs[0]),
    }
}

/// Read a definition file, with a readable message on failure.
pub(crate) fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {e}"),
    })
}
