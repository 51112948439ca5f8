//! Trainer configuration

use crate::attack::AttackSpec;
use crate::config::AdvTrainSpec;
use crate::data::Dataset;
use std::path::PathBuf;

/// Everything the free adversarial training loop needs besides the model,
/// optimizer and data
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    /// Replays of each minibatch (`m`)
    pub replays: usize,
    /// L∞ bound and ascent step of the perturbation
    pub epsilon: f32,
    /// Total epochs; a resumed run stops at the same count
    pub epochs: usize,
    pub seed: u64,
    /// Report running accuracy every N batches
    pub log_interval: usize,
    /// Attack deciding which epoch's weights are kept
    pub epoch_attack: AttackSpec,
    /// Stem of the best checkpoint
    pub checkpoint_stem: PathBuf,
    pub dataset: Dataset,
    pub num_classes: usize,
    pub base_width: usize,
}

impl TrainConfig {
    pub fn from_spec(spec: &AdvTrainSpec) -> Self {
        Self {
            replays: spec.adversarial.replays,
            epsilon: spec.adversarial.epsilon,
            epochs: spec.training.epochs,
            seed: spec.training.seed,
            log_interval: spec.training.log_interval,
            epoch_attack: spec.evaluation.epoch_attack,
            checkpoint_stem: spec.checkpoint_path(),
            dataset: spec.data.dataset,
            num_classes: spec.num_classes(),
            base_width: spec.model.base_width,
        }
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_replays(mut self, replays: usize) -> Self {
        self.replays = replays;
        self
    }

    pub fn with_checkpoint_stem(mut self, stem: impl Into<PathBuf>) -> Self {
        self.checkpoint_stem = stem.into();
        self
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self::from_spec(&AdvTrainSpec::default())
    }
}
