//! CLI command implementations

mod eval;
mod info;
mod init;
mod setup;
mod train;
mod validate;

#[cfg(test)]
mod tests;

pub use setup::TrainBackend;

use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Train(args) => train::run_train(args, log_level),
        Command::Eval(args) => eval::run_eval(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Info(args) => info::run_info(args, log_level),
        Command::Init(args) => init::run_init(args, log_level),
    }
}
