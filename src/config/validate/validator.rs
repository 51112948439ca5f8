//! Configuration validation logic
//!
//! Validates adversarial training specifications for correctness before execution.

use super::error::ValidationError;
use crate::attack::AttackSpec;
use crate::config::schema::{AdvTrainSpec, SchedulerSpec};

/// Validate an adversarial training specification
///
/// Checks:
/// - Numeric values are in valid ranges
/// - Enums match allowed values
/// - Schedules and attack parameters are well formed
///
/// Dataset presence is checked at load time, where it can be downloaded.
pub fn validate_config(spec: &AdvTrainSpec) -> Result<(), ValidationError> {
    if spec.data.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(spec.data.batch_size));
    }
    if spec.data.eval_batch_size() == 0 {
        return Err(ValidationError::InvalidEvalBatchSize(0));
    }
    for limit in [spec.data.train_limit, spec.data.test_limit].into_iter().flatten() {
        if limit == 0 {
            return Err(ValidationError::InvalidDataLimit(limit));
        }
    }

    if spec.model.arch != "preact_resnet18" {
        return Err(ValidationError::InvalidArchitecture(spec.model.arch.clone()));
    }
    if spec.model.base_width == 0 {
        return Err(ValidationError::InvalidBaseWidth(spec.model.base_width));
    }
    let required = spec.data.dataset.num_classes();
    if spec.num_classes() < required {
        return Err(ValidationError::InvalidNumClasses {
            num_classes: spec.num_classes(),
            dataset: spec.data.dataset.to_string(),
            required,
        });
    }

    if spec.optimizer.name != "sgd" {
        return Err(ValidationError::InvalidOptimizer(spec.optimizer.name.clone()));
    }
    if !(spec.optimizer.lr > 0.0 && spec.optimizer.lr <= 1.0) {
        return Err(ValidationError::InvalidLearningRate(spec.optimizer.lr));
    }
    if !(0.0..1.0).contains(&spec.optimizer.momentum) {
        return Err(ValidationError::InvalidMomentum(spec.optimizer.momentum));
    }
    if !(spec.optimizer.weight_decay >= 0.0) {
        return Err(ValidationError::InvalidWeightDecay(spec.optimizer.weight_decay));
    }

    validate_scheduler(&spec.scheduler)?;

    let eps = spec.adversarial.epsilon;
    if !(eps > 0.0 && eps <= 1.0) {
        return Err(ValidationError::InvalidEpsilon(eps));
    }
    if spec.adversarial.replays == 0 {
        return Err(ValidationError::InvalidReplays(0));
    }

    validate_attack(&spec.evaluation.epoch_attack)?;
    if spec.evaluation.final_attacks.is_empty() {
        return Err(ValidationError::EmptyFinalAttacks);
    }
    for attack in &spec.evaluation.final_attacks {
        validate_attack(attack)?;
    }

    if spec.training.epochs == 0 {
        return Err(ValidationError::InvalidEpochs(0));
    }
    if spec.training.log_interval == 0 {
        return Err(ValidationError::InvalidLogInterval(0));
    }
    if let Some(0) = spec.training.early_stopping_patience {
        return Err(ValidationError::InvalidPatience(0));
    }

    Ok(())
}

fn validate_scheduler(scheduler: &SchedulerSpec) -> Result<(), ValidationError> {
    let gamma = match scheduler {
        SchedulerSpec::Constant => return Ok(()),
        SchedulerSpec::MultiStep { milestones, gamma } => {
            if milestones.windows(2).any(|w| w[0] >= w[1]) {
                return Err(ValidationError::InvalidMilestones(milestones.clone()));
            }
            *gamma
        }
        SchedulerSpec::StepDecay { step_size, gamma } => {
            if *step_size == 0 {
                return Err(ValidationError::InvalidStepSize(0));
            }
            *gamma
        }
    };
    if !(gamma > 0.0 && gamma <= 1.0) {
        return Err(ValidationError::InvalidGamma(gamma));
    }
    Ok(())
}

fn validate_attack(attack: &AttackSpec) -> Result<(), ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidAttack {
        attack: attack.label(),
        reason: reason.to_string(),
    };
    match *attack {
        AttackSpec::Clean => Ok(()),
        AttackSpec::Fgsm { eps } => {
            if eps > 0.0 && eps <= 1.0 {
                Ok(())
            } else {
                Err(invalid("eps must be > 0.0 and <= 1.0"))
            }
        }
        AttackSpec::Pgd {
            eps,
            eps_iter,
            nb_iter,
            ..
        } => {
            if !(eps > 0.0 && eps <= 1.0) {
                Err(invalid("eps must be > 0.0 and <= 1.0"))
            } else if !(eps_iter > 0.0) {
                Err(invalid("eps_iter must be > 0.0"))
            } else if nb_iter == 0 {
                Err(invalid("nb_iter must be > 0"))
            } else {
                Ok(())
            }
        }
    }
}
