//! Shipped configuration files load and validate

use endurecer::attack::AttackSpec;
use endurecer::config::{load_config, parse_config, validate_config, SchedulerSpec};
use endurecer::data::Dataset;
use std::path::Path;

fn config_path(filename: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("configs").join(filename)
}

#[test]
fn cifar10_config_is_the_reference_run() {
    let spec = load_config(config_path("cifar10.yaml")).unwrap();
    validate_config(&spec).unwrap();

    assert_eq!(spec.data.dataset, Dataset::Cifar10);
    assert_eq!(spec.data.batch_size, 128);
    assert_eq!(spec.adversarial.replays, 8);
    assert_eq!(spec.training.epochs, 27);
    assert_eq!(spec.training.seed, 11111);
    assert_eq!(
        spec.scheduler,
        SchedulerSpec::MultiStep {
            milestones: vec![12, 22],
            gamma: 0.1
        }
    );
    let finals: Vec<_> = spec
        .evaluation
        .final_attacks
        .iter()
        .map(AttackSpec::label)
        .collect();
    assert_eq!(finals, vec!["PGD-20", "PGD-50", "FGSM"]);
}

#[test]
fn cifar100_config_fills_defaults() {
    let spec = load_config(config_path("cifar100.yaml")).unwrap();
    assert_eq!(spec.num_classes(), 100);
    assert_eq!(spec.checkpoint_name(), "bestCIFAR100");
    assert_eq!(spec.evaluation.epoch_attack, AttackSpec::pgd20());
    assert_eq!(spec.training.early_stopping_patience, Some(6));
}

#[test]
fn smoke_config_is_small() {
    let spec = load_config(config_path("smoke.yaml")).unwrap();
    assert_eq!(spec.scheduler, SchedulerSpec::Constant);
    assert_eq!(spec.data.train_limit, Some(512));
    assert_eq!(spec.evaluation.epoch_attack.label(), "PGD-3");
    assert!(spec.data.download);
}

#[test]
fn invalid_documents_are_rejected() {
    for yaml in [
        "data:\n  batch_size: 0\n",
        "optimizer:\n  momentum: 1.0\n",
        "adversarial:\n  epsilon: 0.0\n",
        "scheduler:\n  kind: multi_step\n  milestones: [10, 5]\n  gamma: 0.1\n",
        "evaluation:\n  epoch_attack:\n    kind: pgd\n    eps: 0.03\n    eps_iter: 0.01\n    nb_iter: 0\n",
        "data:\n  dataset: MNIST\n",
    ] {
        assert!(parse_config(yaml).is_err(), "accepted:\n{yaml}");
    }
}
