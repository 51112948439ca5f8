//! Eval command implementation

use super::setup::{build_model, prepare_data, test_loader, Device, TrainBackend};
use crate::attack::AttackSpec;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, AdvTrainSpec, EvalArgs, OutputFormat};
use crate::error::Result;
use crate::eval::{evaluate_suite, with_clean, RobustnessReport};
use crate::io::{load_checkpoint, read_meta};
use burn::tensor::backend::Backend;
use std::path::Path;

/// Attack the checkpoint at `stem` with each of `attacks` on the test split.
///
/// The architecture and dataset come from the checkpoint metadata, so a
/// checkpoint can be evaluated under a config for a different run.
pub(super) fn evaluate_checkpoint(
    spec: &AdvTrainSpec,
    stem: &Path,
    attacks: &[AttackSpec],
    level: LogLevel,
) -> Result<RobustnessReport> {
    let meta = read_meta(stem)?;
    prepare_data(spec, meta.dataset, level)?;
    let loader = test_loader(spec, meta.dataset)?;

    let device: Device = Default::default();
    let model = build_model(meta.num_classes, meta.base_width, &device);
    let (model, meta) = load_checkpoint(model, stem, &device)?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Evaluating {} (epoch {}) on {} test images",
            stem.display(),
            meta.epoch + 1,
            loader.num_samples()
        ),
    );

    TrainBackend::seed(meta.seed);
    let results = evaluate_suite(&model, &loader, attacks, meta.seed, &device, |report| {
        log(level, LogLevel::Normal, &format!("  {report}"));
    });

    Ok(RobustnessReport::new(
        meta.dataset,
        stem.display().to_string(),
        meta.epoch,
        results,
    ))
}

pub fn run_eval(args: EvalArgs, level: LogLevel) -> std::result::Result<(), String> {
    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    let stem = args.checkpoint.clone().unwrap_or_else(|| spec.checkpoint_path());
    let attacks = if args.attacks.is_empty() {
        with_clean(&spec.evaluation.final_attacks)
    } else {
        args.attacks.clone()
    };

    // structured formats own stdout
    let progress = match args.format {
        OutputFormat::Text => level,
        OutputFormat::Json | OutputFormat::Yaml => LogLevel::Quiet,
    };
    let report = evaluate_checkpoint(&spec, &stem, &attacks, progress)
        .map_err(|e| format!("Evaluation error: {e}"))?;

    match args.format {
        OutputFormat::Text => {}
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&report)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    if let Some(path) = &args.output {
        report
            .write_json(path)
            .map_err(|e| format!("Failed to write report: {e}"))?;
        log(
            progress,
            LogLevel::Normal,
            &format!("Report saved to: {}", path.display()),
        );
    }

    Ok(())
}
