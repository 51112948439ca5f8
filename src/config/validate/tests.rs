//! Unit tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::attack::AttackSpec;
use crate::config::schema::*;

fn create_valid_spec() -> AdvTrainSpec {
    AdvTrainSpec::default()
}

#[test]
fn test_valid_config() {
    assert!(validate_config(&create_valid_spec()).is_ok());
}

#[test]
fn test_invalid_batch_size() {
    let mut spec = create_valid_spec();
    spec.data.batch_size = 0;
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidBatchSize(0)));
}

#[test]
fn test_invalid_eval_batch_size() {
    let mut spec = create_valid_spec();
    spec.data.eval_batch_size = Some(0);
    assert_eq!(
        validate_config(&spec).unwrap_err(),
        ValidationError::InvalidEvalBatchSize(0)
    );
}

#[test]
fn test_invalid_learning_rate() {
    let mut spec = create_valid_spec();
    spec.optimizer.lr = 0.0;
    assert!(matches!(
        validate_config(&spec).unwrap_err(),
        ValidationError::InvalidLearningRate(_)
    ));
    spec.optimizer.lr = 1.5;
    assert!(validate_config(&spec).is_err());
}

#[test]
fn test_invalid_momentum() {
    let mut spec = create_valid_spec();
    spec.optimizer.momentum = 1.0;
    assert!(matches!(
        validate_config(&spec).unwrap_err(),
        ValidationError::InvalidMomentum(_)
    ));
}

#[test]
fn test_negative_weight_decay() {
    let mut spec = create_valid_spec();
    spec.optimizer.weight_decay = -1e-4;
    assert!(matches!(
        validate_config(&spec).unwrap_err(),
        ValidationError::InvalidWeightDecay(_)
    ));
}

#[test]
fn test_unknown_optimizer() {
    let mut spec = create_valid_spec();
    spec.optimizer.name = "adam".into();
    assert_eq!(
        validate_config(&spec).unwrap_err(),
        ValidationError::InvalidOptimizer("adam".into())
    );
}

#[test]
fn test_unknown_architecture() {
    let mut spec = create_valid_spec();
    spec.model.arch = "wide_resnet34".into();
    assert!(matches!(
        validate_config(&spec).unwrap_err(),
        ValidationError::InvalidArchitecture(_)
    ));
}

#[test]
fn test_num_classes_override() {
    let mut spec = create_valid_spec();
    spec.model.num_classes = Some(12);
    assert!(validate_config(&spec).is_ok());
    assert_eq!(spec.num_classes(), 12);

    spec.model.num_classes = Some(5);
    assert!(matches!(
        validate_config(&spec).unwrap_err(),
        ValidationError::InvalidNumClasses { required: 10, .. }
    ));
}

#[test]
fn test_invalid_epsilon() {
    let mut spec = create_valid_spec();
    spec.adversarial.epsilon = 0.0;
    assert!(matches!(
        validate_config(&spec).unwrap_err(),
        ValidationError::InvalidEpsilon(_)
    ));
}

#[test]
fn test_zero_replays() {
    let mut spec = create_valid_spec();
    spec.adversarial.replays = 0;
    assert_eq!(
        validate_config(&spec).unwrap_err(),
        ValidationError::InvalidReplays(0)
    );
}

#[test]
fn test_milestones_must_increase() {
    let mut spec = create_valid_spec();
    spec.scheduler = SchedulerSpec::MultiStep {
        milestones: vec![22, 12],
        gamma: 0.1,
    };
    assert!(matches!(
        validate_config(&spec).unwrap_err(),
        ValidationError::InvalidMilestones(_)
    ));
}

#[test]
fn test_invalid_gamma() {
    let mut spec = create_valid_spec();
    spec.scheduler = SchedulerSpec::StepDecay {
        step_size: 5,
        gamma: 0.0,
    };
    assert!(matches!(
        validate_config(&spec).unwrap_err(),
        ValidationError::InvalidGamma(_)
    ));
}

#[test]
fn test_zero_step_size() {
    let mut spec = create_valid_spec();
    spec.scheduler = SchedulerSpec::StepDecay {
        step_size: 0,
        gamma: 0.5,
    };
    assert_eq!(
        validate_config(&spec).unwrap_err(),
        ValidationError::InvalidStepSize(0)
    );
}

#[test]
fn test_constant_scheduler_is_valid() {
    let mut spec = create_valid_spec();
    spec.scheduler = SchedulerSpec::Constant;
    assert!(validate_config(&spec).is_ok());
}

#[test]
fn test_invalid_pgd_iterations() {
    let mut spec = create_valid_spec();
    spec.evaluation.epoch_attack = AttackSpec::Pgd {
        eps: 0.03,
        eps_iter: 0.01,
        nb_iter: 0,
        rand_init: true,
    };
    let err = validate_config(&spec).unwrap_err();
    assert!(err.to_string().contains("nb_iter"));
}

#[test]
fn test_empty_final_attacks() {
    let mut spec = create_valid_spec();
    spec.evaluation.final_attacks.clear();
    assert_eq!(
        validate_config(&spec).unwrap_err(),
        ValidationError::EmptyFinalAttacks
    );
}

#[test]
fn test_zero_epochs() {
    let mut spec = create_valid_spec();
    spec.training.epochs = 0;
    assert_eq!(
        validate_config(&spec).unwrap_err(),
        ValidationError::InvalidEpochs(0)
    );
}

#[test]
fn test_zero_patience() {
    let mut spec = create_valid_spec();
    spec.training.early_stopping_patience = Some(0);
    assert_eq!(
        validate_config(&spec).unwrap_err(),
        ValidationError::InvalidPatience(0)
    );
}

#[test]
fn test_zero_data_limit() {
    let mut spec = create_valid_spec();
    spec.data.test_limit = Some(0);
    assert_eq!(
        validate_config(&spec).unwrap_err(),
        ValidationError::InvalidDataLimit(0)
    );
}
