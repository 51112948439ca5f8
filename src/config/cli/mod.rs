//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! endurecer train config.yaml
//! endurecer train config.yaml --epochs 10 --replays 4 --download
//! endurecer train config.yaml --resume checkpoint/bestCIFAR10
//! endurecer eval config.yaml --attack pgd20 --attack fgsm
//! endurecer validate config.yaml
//! endurecer info config.yaml --format json
//! endurecer init --output adv.yaml
//! ```

mod core;
mod init;
mod types;

pub use core::{
    apply_overrides, parse_args, Cli, Command, EvalArgs, InfoArgs, TrainArgs, ValidateArgs,
};
pub use init::InitArgs;
pub use types::OutputFormat;
