//! circ - Local-first circulation manager for small libraries

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = circ_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
