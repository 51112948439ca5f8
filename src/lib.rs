//! Endurecer: free adversarial training for CIFAR classifiers
//!
//! Trains a PreAct-ResNet18 with "free" adversarial training: every
//! minibatch is replayed several times, and the input gradient of each
//! replay's backward pass also drives a persistent L∞ perturbation that is
//! reused on the next minibatch. The best checkpoint under PGD-20 is then
//! attacked with PGD-20, PGD-50 and FGSM.
//!
//! # Architecture
//!
//! - `config` - YAML run description, validation and CLI argument parsing
//! - `data` - CIFAR binary reader, download, augmentation and batching
//! - `model` - PreAct-ResNet18 on burn
//! - `attack` - L∞ PGD and FGSM
//! - `train` - perturbation buffer, trainer loop and callbacks
//! - `optim` - SGD construction and learning rate schedules
//! - `eval` - accuracy under attack and robustness reports
//! - `io` - checkpoint records and metadata
//! - `cli` - command implementations behind the `endurecer` binary
//!
//! # Example
//!
//! ```no_run
//! use endurecer::config::load_config;
//! use endurecer::cli::{run_command, Cli};
//! use clap::Parser;
//!
//! let spec = load_config("configs/cifar10.yaml").unwrap();
//! println!("training for {} epochs", spec.training.epochs);
//!
//! let cli = Cli::parse_from(["endurecer", "validate", "configs/cifar10.yaml"]);
//! run_command(cli).unwrap();
//! ```

pub mod attack;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod eval;
pub mod io;
pub mod model;
pub mod optim;
pub mod train;

pub use error::{Error, Result};
