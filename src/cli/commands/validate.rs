//! Validate command implementation

use crate::attack::AttackSpec;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, AdvTrainSpec, SchedulerSpec, ValidateArgs};

/// Format data configuration as a string
pub fn format_data_info(spec: &AdvTrainSpec) -> String {
    let mut lines = vec![
        format!("  Dataset: {}", spec.data.dataset),
        format!("  Data root: {}", spec.data.root.display()),
        format!("  Batch size: {}", spec.data.batch_size),
    ];
    if spec.data.eval_batch_size.is_some() {
        lines.push(format!("  Eval batch size: {}", spec.data.eval_batch_size()));
    }
    if !spec.data.augment {
        lines.push("  Augmentation: off".to_string());
    }
    if let Some(n) = spec.data.train_limit {
        lines.push(format!("  Training images: first {n}"));
    }
    if let Some(n) = spec.data.test_limit {
        lines.push(format!("  Test images: first {n}"));
    }
    lines.join("\n")
}

/// Format optimizer and schedule as a string
pub fn format_optimizer_info(spec: &AdvTrainSpec) -> String {
    let schedule = match &spec.scheduler {
        SchedulerSpec::MultiStep { milestones, gamma } => {
            format!("x{gamma} at epochs {milestones:?}")
        }
        SchedulerSpec::StepDecay { step_size, gamma } => {
            format!("x{gamma} every {step_size} epochs")
        }
        SchedulerSpec::Constant => "constant".to_string(),
    };
    [
        format!("  Optimizer: {}", spec.optimizer.name),
        format!("  Learning rate: {} ({schedule})", spec.optimizer.lr),
        format!("  Momentum: {}", spec.optimizer.momentum),
        format!("  Weight decay: {}", spec.optimizer.weight_decay),
    ]
    .join("\n")
}

/// Format free adversarial training parameters as a string
pub fn format_adversarial_info(spec: &AdvTrainSpec) -> String {
    format!(
        "  Epsilon: {:.5} ({:.1}/255)\n  Replays: {}",
        spec.adversarial.epsilon,
        spec.adversarial.epsilon * 255.0,
        spec.adversarial.replays
    )
}

/// Format robustness evaluation as a string
pub fn format_evaluation_info(spec: &AdvTrainSpec) -> String {
    let finals: Vec<String> = spec
        .evaluation
        .final_attacks
        .iter()
        .map(AttackSpec::label)
        .collect();
    format!(
        "  Epoch attack: {}\n  Final attacks: {}",
        spec.evaluation.epoch_attack,
        finals.join(", ")
    )
}

/// Format training configuration as a string
pub fn format_training_info(spec: &AdvTrainSpec) -> String {
    let mut lines = vec![
        format!("  Epochs: {}", spec.training.epochs),
        format!("  Seed: {}", spec.training.seed),
        format!("  Checkpoint: {}", spec.checkpoint_path().display()),
    ];
    if let Some(patience) = spec.training.early_stopping_patience {
        lines.push(format!("  Early stopping patience: {patience}"));
    }
    lines.join("\n")
}

/// Print detailed configuration summary
pub fn print_detailed_summary(spec: &AdvTrainSpec) {
    println!();
    println!("Configuration Summary:");
    println!(
        "  Model: {} (base width {}, {} classes)",
        spec.model.arch,
        spec.model.base_width,
        spec.num_classes()
    );
    println!();
    println!("{}", format_data_info(spec));
    println!();
    println!("{}", format_optimizer_info(spec));
    println!();
    println!("{}", format_adversarial_info(spec));
    println!();
    println!("{}", format_evaluation_info(spec));
    println!();
    println!("{}", format_training_info(spec));
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    // load_config validates as it parses
    let spec = load_config(&args.config).map_err(|e| format!("Validation failed: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        print_detailed_summary(&spec);
    }

    Ok(())
}
