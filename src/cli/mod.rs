//! Command-line front end
//!
//! Parsing lives in [`crate::config::cli`]; this module runs the parsed
//! commands against the library.

mod commands;
mod logging;

pub use commands::{run_command, TrainBackend};
pub use logging::{log, LogLevel};

pub use crate::config::Cli;
