//! climdir binary entry point.

use std::process::ExitCode;

use climdir::ui::output;

fn main() -> ExitCode {
    match climdir::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
