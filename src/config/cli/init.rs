//! Init command types

use crate::data::Dataset;
use clap::Parser;
use std::path::PathBuf;

/// Arguments for the init command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InitArgs {
    /// Output path (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Dataset the generated config trains on
    #[arg(short, long, default_value = "cifar10")]
    pub dataset: Dataset,

    /// Data root written into the config
    #[arg(long)]
    pub data_root: Option<PathBuf>,
}
