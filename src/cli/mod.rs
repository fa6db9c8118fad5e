use anyhow::Result;

mod args;
mod exit_status;
mod logging;
mod report;
mod run;

pub use args::*;
pub use exit_status::ExitStatus;
pub use logging::init_logger;
pub use run::CommandOutput;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let output = run::run(args)?;
    report::print(&output);

    Ok(ExitStatus::Success)
}
