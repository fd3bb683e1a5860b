use std::error::Error;
use std::process::ExitCode;

use framealign::AlignError;

fn main() -> ExitCode {
    match framealign::run() {
        Ok(()) => ExitCode::SUCCESS,
        // The report itself is already on stdout.
        Err(err @ AlignError::CheckFailed { .. }) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
