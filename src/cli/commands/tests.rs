//! CLI command tests
//!
//! Commands run against synthetic CIFAR-10 binaries in a temp directory and
//! a very narrow network so a full train/eval cycle stays fast.

use super::*;
use crate::cli::LogLevel;
use crate::config::*;
use crate::data::{Dataset, Split, IMAGE_BYTES};
use crate::eval::{RobustnessReport, REPORT_FILE};
use crate::io::read_meta;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `per_file` records per split file, bright images labelled 1
fn write_synthetic_cifar10(root: &Path, per_file: usize) {
    for split in [Split::Train, Split::Test] {
        for path in Dataset::Cifar10.split_paths(root, split) {
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            let mut bytes = Vec::new();
            for i in 0..per_file {
                let label = (i % 2) as u8;
                bytes.push(label);
                let value = if label == 1 { 220 } else { 30 };
                bytes.extend(std::iter::repeat(value).take(IMAGE_BYTES));
            }
            std::fs::write(path, bytes).unwrap();
        }
    }
}

/// Config for a one-epoch run on 4 training images
fn create_test_config(dir: &TempDir) -> PathBuf {
    let config_path = dir.path().join("adv.yaml");
    let config = format!(
        r"
data:
  dataset: CIFAR10
  root: {}
  batch_size: 2
  train_limit: 4
  test_limit: 3

model:
  base_width: 2

adversarial:
  replays: 2

evaluation:
  epoch_attack:
    kind: pgd
    eps: 0.0313725
    eps_iter: 0.0078431
    nb_iter: 1
  final_attacks:
    - kind: fgsm
      eps: 0.0313725

training:
  epochs: 1
  log_interval: 1
  output_dir: {}
",
        dir.path().join("data").display(),
        dir.path().join("out").display()
    );
    std::fs::write(&config_path, config).unwrap();
    config_path
}

fn train_args(config: PathBuf) -> TrainArgs {
    TrainArgs {
        config,
        output_dir: None,
        resume: None,
        epochs: None,
        batch_size: None,
        lr: None,
        epsilon: None,
        replays: None,
        seed: None,
        dataset: None,
        download: false,
        dry_run: false,
        skip_final_eval: false,
    }
}

#[test]
fn test_validate_command() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    for detailed in [false, true] {
        let args = ValidateArgs {
            config: config.clone(),
            detailed,
        };
        assert!(validate::run_validate(args, LogLevel::Quiet).is_ok());
    }
}

#[test]
fn test_validate_command_rejects_bad_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.yaml");
    std::fs::write(&config, "adversarial:\n  replays: 0\n").unwrap();
    let args = ValidateArgs {
        config,
        detailed: false,
    };
    let err = validate::run_validate(args, LogLevel::Quiet).unwrap_err();
    assert!(err.contains("Validation failed"));
}

#[test]
fn test_validate_command_missing_file() {
    let args = ValidateArgs {
        config: PathBuf::from("/nonexistent/config.yaml"),
        detailed: false,
    };
    assert!(validate::run_validate(args, LogLevel::Quiet).is_err());
}

#[test]
fn test_info_command_all_formats() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Yaml] {
        let args = InfoArgs {
            config: config.clone(),
            format,
        };
        assert!(info::run_info(args, LogLevel::Quiet).is_ok());
    }
}

#[test]
fn test_init_command_writes_loadable_config() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("init.yaml");
    let args = InitArgs {
        output: Some(output.clone()),
        dataset: Dataset::Cifar10,
        data_root: None,
    };
    init::run_init(args, LogLevel::Quiet).unwrap();
    assert_eq!(load_config(&output).unwrap(), AdvTrainSpec::default());
}

#[test]
fn test_train_dry_run_touches_nothing() {
    let dir = TempDir::new().unwrap();
    let mut args = train_args(create_test_config(&dir));
    args.dry_run = true;
    assert!(train::run_train(args, LogLevel::Quiet).is_ok());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_train_rejects_invalid_override() {
    let dir = TempDir::new().unwrap();
    let mut args = train_args(create_test_config(&dir));
    args.epsilon = Some(2.0);
    args.dry_run = true;
    assert!(train::run_train(args, LogLevel::Quiet).is_err());
}

#[test]
fn test_train_without_data_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    let args = train_args(create_test_config(&dir));
    let err = train::run_train(args, LogLevel::Quiet).unwrap_err();
    assert!(err.contains("Dataset file not found"));
}

#[test]
fn test_train_then_eval() {
    let dir = TempDir::new().unwrap();
    write_synthetic_cifar10(&dir.path().join("data"), 4);
    let config = create_test_config(&dir);

    train::run_train(train_args(config.clone()), LogLevel::Quiet).unwrap();

    let stem = dir.path().join("out").join("bestCIFAR10");
    let meta = read_meta(&stem).unwrap();
    assert_eq!(meta.epoch, 0);
    assert_eq!(meta.robust_attack, "PGD-1");
    assert_eq!(meta.base_width, 2);

    let json = std::fs::read_to_string(dir.path().join("out").join(REPORT_FILE)).unwrap();
    let report: RobustnessReport = serde_json::from_str(&json).unwrap();
    let names: Vec<_> = report.results.iter().map(|r| r.attack.as_str()).collect();
    assert_eq!(names, vec!["Clean", "FGSM"]);
    assert!(report.results.iter().all(|r| r.total == 3));

    let output = dir.path().join("eval.json");
    let args = EvalArgs {
        config,
        checkpoint: Some(stem),
        attacks: vec!["pgd2".parse().unwrap()],
        output: Some(output.clone()),
        format: OutputFormat::Json,
    };
    eval::run_eval(args, LogLevel::Quiet).unwrap();
    let report: RobustnessReport =
        serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].attack, "PGD-2");
}

#[test]
fn test_train_resume_continues_run() {
    let dir = TempDir::new().unwrap();
    write_synthetic_cifar10(&dir.path().join("data"), 4);
    let config = create_test_config(&dir);

    let mut first = train_args(config.clone());
    first.skip_final_eval = true;
    train::run_train(first, LogLevel::Quiet).unwrap();
    let stem = dir.path().join("out").join("bestCIFAR10");

    let mut resumed = train_args(config);
    resumed.resume = Some(stem.clone());
    resumed.epochs = Some(2);
    resumed.skip_final_eval = true;
    train::run_train(resumed, LogLevel::Quiet).unwrap();

    // epoch 0 is kept unless epoch 1 is strictly better
    let meta = read_meta(&stem).unwrap();
    assert!(meta.epoch <= 1);
    assert!(!dir.path().join("out").join(REPORT_FILE).exists());
}

#[test]
fn test_eval_missing_checkpoint() {
    let dir = TempDir::new().unwrap();
    let args = EvalArgs {
        config: create_test_config(&dir),
        checkpoint: Some(dir.path().join("nope")),
        attacks: vec![],
        output: None,
        format: OutputFormat::Text,
    };
    assert!(eval::run_eval(args, LogLevel::Quiet).is_err());
}

#[test]
fn test_run_command_dispatches() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let cli = parse_args([
        "endurecer",
        "--quiet",
        "validate",
        config.to_str().unwrap(),
    ])
    .unwrap();
    assert!(run_command(cli).is_ok());
}
