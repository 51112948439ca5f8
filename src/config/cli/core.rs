//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::init::InitArgs;
use super::types::OutputFormat;
use crate::attack::AttackSpec;
use crate::config::AdvTrainSpec;
use crate::data::Dataset;

/// Endurecer: free adversarial training for CIFAR classifiers
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "endurecer")]
#[command(version)]
#[command(
    about = "Free adversarial training of PreAct-ResNet18 with PGD and FGSM robustness evaluation"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Adversarially train a model, then evaluate the best checkpoint
    Train(TrainArgs),

    /// Evaluate a saved checkpoint against attacks
    Eval(EvalArgs),

    /// Validate a configuration file without training
    Validate(ValidateArgs),

    /// Display information about a configuration
    Info(InfoArgs),

    /// Write a configuration with reference defaults
    Init(InitArgs),
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct TrainArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Resume from a checkpoint stem (weights `<stem>.bin`, metadata `<stem>.json`)
    #[arg(short, long, value_name = "CHECKPOINT")]
    pub resume: Option<PathBuf>,

    /// Override number of epochs
    #[arg(short, long)]
    pub epochs: Option<usize>,

    /// Override batch size
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Override learning rate
    #[arg(short, long)]
    pub lr: Option<f64>,

    /// Override the L∞ perturbation bound
    #[arg(long)]
    pub epsilon: Option<f32>,

    /// Override minibatch replays
    #[arg(short = 'm', long)]
    pub replays: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override dataset (cifar10, cifar100)
    #[arg(short, long)]
    pub dataset: Option<Dataset>,

    /// Download the dataset if it is missing
    #[arg(long)]
    pub download: bool,

    /// Dry run (validate config but don't train)
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the attack suite after training
    #[arg(long)]
    pub skip_final_eval: bool,
}

/// Arguments for the eval command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct EvalArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Checkpoint stem (defaults to the configured best checkpoint)
    #[arg(short, long)]
    pub checkpoint: Option<PathBuf>,

    /// Attacks to run, e.g. `--attack pgd20 --attack fgsm`
    #[arg(short, long = "attack")]
    pub attacks: Vec<AttackSpec>,

    /// Write the robustness report to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format printed to stdout (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to an AdvTrainSpec
pub fn apply_overrides(spec: &mut AdvTrainSpec, args: &TrainArgs) {
    if let Some(output_dir) = &args.output_dir {
        spec.training.output_dir = output_dir.clone();
    }
    if let Some(epochs) = args.epochs {
        spec.training.epochs = epochs;
    }
    if let Some(batch_size) = args.batch_size {
        spec.data.batch_size = batch_size;
    }
    if let Some(lr) = args.lr {
        spec.optimizer.lr = lr;
    }
    if let Some(epsilon) = args.epsilon {
        spec.adversarial.epsilon = epsilon;
    }
    if let Some(replays) = args.replays {
        spec.adversarial.replays = replays;
    }
    if let Some(seed) = args.seed {
        spec.training.seed = seed;
    }
    if let Some(dataset) = args.dataset {
        spec.data.dataset = dataset;
    }
    if args.download {
        spec.data.download = true;
    }
}
