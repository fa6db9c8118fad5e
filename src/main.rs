use std::process::ExitCode;

use ann::cli::{Arguments, ExitStatus, init_logger};
use clap::Parser;

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logger(args.common.verbose);

    match ann::cli::run_cli(args) {
        Ok(code) => code.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
