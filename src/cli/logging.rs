//! Console output levels for the CLI

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Errors only
    Quiet,
    /// Epoch summaries and results
    #[default]
    Normal,
    /// Also per-batch progress and configuration details
    Verbose,
}

impl LogLevel {
    /// `--quiet` wins over `--verbose`
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }

    /// Whether a message of level `required` is shown at this level
    pub fn allows(self, required: LogLevel) -> bool {
        match self {
            LogLevel::Quiet => false,
            LogLevel::Normal => required == LogLevel::Normal,
            LogLevel::Verbose => true,
        }
    }
}

/// Print `msg` if `level` allows messages of level `required`
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level.allows(required) {
        println!("{msg}");
    }
}
