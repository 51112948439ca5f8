//! Declarative YAML configuration
//!
//! A run is fully described by an [`AdvTrainSpec`]; command-line flags only
//! override fields of it.

pub mod cli;
mod loader;
mod schema;
mod validate;

pub use cli::{
    apply_overrides, parse_args, Cli, Command, EvalArgs, InfoArgs, InitArgs, OutputFormat,
    TrainArgs, ValidateArgs,
};
pub use loader::{load_config, parse_config};
pub use schema::{
    AdvTrainSpec, AdversarialSpec, DataSpec, EvaluationSpec, ModelSpec, OptimSpec, SchedulerSpec,
    TrainingParams,
};
pub use validate::{validate_config, ValidationError};
