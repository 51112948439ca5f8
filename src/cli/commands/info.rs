//! Info command implementation

use super::validate::{format_adversarial_info, format_evaluation_info};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, InfoArgs, OutputFormat};
use crate::io::{checkpoint_exists, read_meta};

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    match args.format {
        OutputFormat::Text => {
            log(level, LogLevel::Normal, "Configuration Info:");
            println!();
            println!("Dataset: {} ({} classes)", spec.data.dataset, spec.num_classes());
            println!("Model: {} (base width {})", spec.model.arch, spec.model.base_width);
            println!(
                "Optimizer: {} (lr={}, momentum={}, weight_decay={})",
                spec.optimizer.name,
                spec.optimizer.lr,
                spec.optimizer.momentum,
                spec.optimizer.weight_decay
            );
            println!("Epochs: {}", spec.training.epochs);
            println!("Batch size: {}", spec.data.batch_size);
            println!("{}", format_adversarial_info(&spec));
            println!("{}", format_evaluation_info(&spec));

            let stem = spec.checkpoint_path();
            if checkpoint_exists(&stem) {
                match read_meta(&stem) {
                    Ok(meta) => println!(
                        "Checkpoint: {} (epoch {}, {} {:.2}%)",
                        stem.display(),
                        meta.epoch + 1,
                        meta.robust_attack,
                        meta.robust_acc
                    ),
                    Err(e) => println!("Checkpoint: {} (unreadable: {e})", stem.display()),
                }
            } else {
                println!("Checkpoint: none yet at {}", stem.display());
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&spec)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&spec)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}
