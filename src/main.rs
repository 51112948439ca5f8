//! Endurecer CLI
//!
//! # Usage
//!
//! ```bash
//! # Train, then attack the best checkpoint
//! endurecer train configs/cifar10.yaml --download
//!
//! # Train with overrides
//! endurecer train configs/cifar10.yaml --epochs 10 --replays 4
//!
//! # Continue an interrupted run
//! endurecer train configs/cifar10.yaml --resume checkpoint/bestCIFAR10
//!
//! # Evaluate a checkpoint
//! endurecer eval configs/cifar10.yaml --attack pgd20 --attack fgsm
//!
//! # Validate config
//! endurecer validate configs/cifar10.yaml --detailed
//! ```

use clap::Parser;
use endurecer::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
