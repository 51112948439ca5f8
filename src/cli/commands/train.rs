//! Train command implementation

use super::eval::evaluate_checkpoint;
use super::setup::{build_model, prepare_data, test_loader, train_loader, Device, TrainBackend};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_overrides, load_config, validate_config, AdvTrainSpec, TrainArgs};
use crate::error::{Error, Result};
use crate::eval::{with_clean, REPORT_FILE};
use crate::io::{load_checkpoint, read_meta};
use crate::model::PreActResNet;
use crate::optim::{build_scheduler, build_sgd};
use crate::train::{EarlyStopping, FreeAdvTrainer, ProgressCallback, TrainConfig, TrainResult};
use burn::tensor::backend::Backend;
use std::path::Path;

pub fn run_train(args: TrainArgs, level: LogLevel) -> std::result::Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Endurecer: training from {}", args.config.display()),
    );

    let mut spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    apply_overrides(&mut spec, &args);
    validate_config(&spec).map_err(|e| format!("Validation failed: {e}"))?;

    log(level, LogLevel::Verbose, &summary(&spec));

    if args.dry_run {
        log(
            level,
            LogLevel::Normal,
            "Dry run - config validated successfully",
        );
        return Ok(());
    }

    let result = train(&spec, args.resume.as_deref(), level)
        .map_err(|e| format!("Training error: {e}"))?;

    if args.skip_final_eval {
        log(level, LogLevel::Normal, "Training complete!");
        return Ok(());
    }
    if !result.has_checkpoint() {
        return Err("Training produced no checkpoint to evaluate".to_string());
    }

    let stem = spec.checkpoint_path();
    let attacks = with_clean(&spec.evaluation.final_attacks);
    let report = evaluate_checkpoint(&spec, &stem, &attacks, level)
        .map_err(|e| format!("Evaluation error: {e}"))?;
    let report_path = spec.training.output_dir.join(REPORT_FILE);
    report
        .write_json(&report_path)
        .map_err(|e| format!("Failed to write report: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!("Report saved to: {}", report_path.display()),
    );
    Ok(())
}

fn summary(spec: &AdvTrainSpec) -> String {
    [
        format!("  Dataset: {} (batch {})", spec.data.dataset, spec.data.batch_size),
        format!(
            "  Model: {} (base width {})",
            spec.model.arch, spec.model.base_width
        ),
        format!(
            "  Optimizer: {} (lr={}, momentum={}, weight_decay={})",
            spec.optimizer.name, spec.optimizer.lr, spec.optimizer.momentum, spec.optimizer.weight_decay
        ),
        format!(
            "  Free AT: eps={:.5}, replays={}",
            spec.adversarial.epsilon, spec.adversarial.replays
        ),
        format!("  Epochs: {}", spec.training.epochs),
        format!("  Checkpoint: {}", spec.checkpoint_path().display()),
    ]
    .join("\n")
}

fn train(spec: &AdvTrainSpec, resume: Option<&Path>, level: LogLevel) -> Result<TrainResult> {
    TrainBackend::seed(spec.training.seed);
    let device: Device = Default::default();

    prepare_data(spec, spec.data.dataset, level)?;
    let train = train_loader(spec)?;
    let test = test_loader(spec, spec.data.dataset)?;
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Loaded {} training / {} test images",
            train.num_samples(),
            test.num_samples()
        ),
    );

    let model = build_model(spec.num_classes(), spec.model.base_width, &device);
    let mut trainer = FreeAdvTrainer::new(
        build_sgd::<TrainBackend, PreActResNet<TrainBackend>>(&spec.optimizer),
        build_scheduler(&spec.scheduler, spec.optimizer.lr),
        TrainConfig::from_spec(spec),
        device.clone(),
    );
    if level != LogLevel::Quiet {
        trainer.add_callback(ProgressCallback::new(spec.training.log_interval));
    }
    if let Some(patience) = spec.training.early_stopping_patience {
        trainer.add_callback(EarlyStopping::new(patience, 0.0));
    }

    let model = match resume {
        Some(stem) => {
            // check before loading: burn records carry no architecture
            let saved = read_meta(stem)?;
            if saved.dataset != spec.data.dataset
                || saved.num_classes != spec.num_classes()
                || saved.base_width != spec.model.base_width
            {
                return Err(Error::Checkpoint {
                    path: stem.to_path_buf(),
                    message: format!(
                        "saved for {} ({} classes, width {}), config wants {} ({} classes, width {})",
                        saved.dataset,
                        saved.num_classes,
                        saved.base_width,
                        spec.data.dataset,
                        spec.num_classes(),
                        spec.model.base_width
                    ),
                });
            }
            let (model, meta) = load_checkpoint(model, stem, &device)?;
            log(
                level,
                LogLevel::Normal,
                &format!(
                    "Resumed from {} (epoch {}, robust acc {:.2}%)",
                    stem.display(),
                    meta.epoch + 1,
                    meta.robust_acc
                ),
            );
            trainer.resume_from(&meta);
            model
        }
        None => model,
    };

    let (_, result) = trainer.fit(model, &train, &test)?;
    if let (Some(epoch), Some(acc)) = (result.best_epoch, result.best_robust_acc) {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "Best {}: {acc:.2}% after epoch {} ({:.1}s)",
                spec.evaluation.epoch_attack,
                epoch + 1,
                result.elapsed_secs
            ),
        );
    }
    Ok(result)
}
