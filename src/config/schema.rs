//! YAML schema definitions for adversarial training runs
//!
//! Every section has defaults matching the reference CIFAR-10 run, so an
//! empty document is a valid configuration.

use crate::attack::{AttackSpec, DEFAULT_EPSILON};
use crate::data::Dataset;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Deserialize a bool from either a YAML boolean (`true`) or a quoted string (`"true"`).
fn deserialize_bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected 'true' or 'false', got '{other}'"
            ))),
        },
    }
}

fn default_true() -> bool {
    true
}

/// Complete adversarial training specification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvTrainSpec {
    /// Dataset and batching
    #[serde(default)]
    pub data: DataSpec,

    /// Classifier architecture
    #[serde(default)]
    pub model: ModelSpec,

    /// Optimizer hyperparameters
    #[serde(default)]
    pub optimizer: OptimSpec,

    /// Learning rate schedule
    #[serde(default)]
    pub scheduler: SchedulerSpec,

    /// Free adversarial training parameters
    #[serde(default)]
    pub adversarial: AdversarialSpec,

    /// Robustness evaluation
    #[serde(default)]
    pub evaluation: EvaluationSpec,

    /// Loop, seeding and output
    #[serde(default)]
    pub training: TrainingParams,
}

impl AdvTrainSpec {
    /// Output classes: the model override, else the dataset's label count
    pub fn num_classes(&self) -> usize {
        self.model
            .num_classes
            .unwrap_or_else(|| self.data.dataset.num_classes())
    }

    /// File stem of the best checkpoint, e.g. `bestCIFAR10`
    pub fn checkpoint_name(&self) -> String {
        self.training
            .checkpoint_name
            .clone()
            .unwrap_or_else(|| format!("best{}", self.data.dataset))
    }

    /// Path stem of the best checkpoint inside the output directory
    pub fn checkpoint_path(&self) -> PathBuf {
        self.training.output_dir.join(self.checkpoint_name())
    }
}

/// Data configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSpec {
    /// CIFAR10 or CIFAR100
    #[serde(default)]
    pub dataset: Dataset,

    /// Directory holding the unpacked binary archives
    #[serde(default = "default_data_root")]
    pub root: PathBuf,

    /// Training batch size; also the perturbation buffer's leading dimension
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Evaluation batch size (defaults to `batch_size`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_batch_size: Option<usize>,

    /// Download the archive when files are missing
    #[serde(default, deserialize_with = "deserialize_bool_lenient")]
    pub download: bool,

    /// Random crop + flip on training images
    #[serde(default = "default_true", deserialize_with = "deserialize_bool_lenient")]
    pub augment: bool,

    /// Use only the first N training images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub train_limit: Option<usize>,

    /// Use only the first N test images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_limit: Option<usize>,
}

impl DataSpec {
    /// Batch size used by the test loader
    pub fn eval_batch_size(&self) -> usize {
        self.eval_batch_size.unwrap_or(self.batch_size)
    }
}

impl Default for DataSpec {
    fn default() -> Self {
        Self {
            dataset: Dataset::default(),
            root: default_data_root(),
            batch_size: default_batch_size(),
            eval_batch_size: None,
            download: false,
            augment: true,
            train_limit: None,
            test_limit: None,
        }
    }
}

fn default_data_root() -> PathBuf {
    PathBuf::from("./data")
}

fn default_batch_size() -> usize {
    128
}

/// Model architecture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Architecture name; only `preact_resnet18` is supported
    #[serde(default = "default_arch")]
    pub arch: String,

    /// Channels of the first stage
    #[serde(default = "default_base_width")]
    pub base_width: usize,

    /// Classifier outputs, when wider than the dataset's label count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_classes: Option<usize>,
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self {
            arch: default_arch(),
            base_width: default_base_width(),
            num_classes: None,
        }
    }
}

fn default_arch() -> String {
    "preact_resnet18".to_string()
}

fn default_base_width() -> usize {
    64
}

/// SGD with momentum and coupled weight decay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimSpec {
    /// Optimizer name; only `sgd` is supported
    #[serde(default = "default_optimizer")]
    pub name: String,

    /// Initial learning rate
    #[serde(default = "default_lr")]
    pub lr: f64,

    #[serde(default = "default_momentum")]
    pub momentum: f64,

    #[serde(default = "default_weight_decay")]
    pub weight_decay: f32,
}

impl Default for OptimSpec {
    fn default() -> Self {
        Self {
            name: default_optimizer(),
            lr: default_lr(),
            momentum: default_momentum(),
            weight_decay: default_weight_decay(),
        }
    }
}

fn default_optimizer() -> String {
    "sgd".to_string()
}

fn default_lr() -> f64 {
    0.1
}

fn default_momentum() -> f64 {
    0.9
}

fn default_weight_decay() -> f32 {
    5e-4
}

/// Learning rate schedule, stepped once per epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchedulerSpec {
    /// Multiply by `gamma` at each milestone epoch
    MultiStep { milestones: Vec<usize>, gamma: f64 },
    /// Multiply by `gamma` every `step_size` epochs
    StepDecay { step_size: usize, gamma: f64 },
    /// Keep the initial learning rate
    Constant,
}

impl Default for SchedulerSpec {
    fn default() -> Self {
        SchedulerSpec::MultiStep {
            milestones: vec![12, 22],
            gamma: 0.1,
        }
    }
}

/// Free adversarial training parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdversarialSpec {
    /// L∞ bound of the persistent perturbation; also its ascent step
    #[serde(default = "default_epsilon")]
    pub epsilon: f32,

    /// Replays of each minibatch (`m`)
    #[serde(default = "default_replays")]
    pub replays: usize,
}

impl Default for AdversarialSpec {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            replays: default_replays(),
        }
    }
}

fn default_epsilon() -> f32 {
    DEFAULT_EPSILON
}

fn default_replays() -> usize {
    8
}

/// Robustness evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSpec {
    /// Attack run after every epoch; selects the best checkpoint
    #[serde(default = "default_epoch_attack")]
    pub epoch_attack: AttackSpec,

    /// Attacks run against the best checkpoint after training
    #[serde(default = "AttackSpec::final_suite")]
    pub final_attacks: Vec<AttackSpec>,
}

impl Default for EvaluationSpec {
    fn default() -> Self {
        Self {
            epoch_attack: default_epoch_attack(),
            final_attacks: AttackSpec::final_suite(),
        }
    }
}

fn default_epoch_attack() -> AttackSpec {
    AttackSpec::pgd20()
}

/// Training loop parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Total epochs (resumed runs continue up to this count)
    #[serde(default = "default_epochs")]
    pub epochs: usize,

    /// Seed for weights, shuffling, augmentation and attack starts
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Where checkpoints and reports are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Checkpoint file stem (defaults to `best<DATASET>`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint_name: Option<String>,

    /// Print running accuracy every N batches
    #[serde(default = "default_log_interval")]
    pub log_interval: usize,

    /// Stop after N epochs without robust accuracy improvement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_stopping_patience: Option<usize>,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            seed: default_seed(),
            output_dir: default_output_dir(),
            checkpoint_name: None,
            log_interval: default_log_interval(),
            early_stopping_patience: None,
        }
    }
}

fn default_epochs() -> usize {
    27
}

fn default_seed() -> u64 {
    11111
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./checkpoint")
}

fn default_log_interval() -> usize {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_reference_defaults() {
        let spec: AdvTrainSpec = serde_yaml::from_str("{}").unwrap();
        assert_eq!(spec.data.dataset, Dataset::Cifar10);
        assert_eq!(spec.data.batch_size, 128);
        assert_eq!(spec.training.seed, 11111);
        assert_eq!(spec.training.epochs, 27);
        assert_eq!(spec.adversarial.replays, 8);
        assert!((spec.adversarial.epsilon - 8.0 / 255.0).abs() < 1e-7);
        assert!((spec.optimizer.lr - 0.1).abs() < 1e-12);
        assert!((spec.optimizer.momentum - 0.9).abs() < 1e-12);
        assert!((spec.optimizer.weight_decay - 5e-4).abs() < 1e-9);
        assert_eq!(spec.evaluation.final_attacks.len(), 3);
        assert_eq!(spec, AdvTrainSpec::default());
    }

    #[test]
    fn test_checkpoint_name_follows_dataset() {
        let mut spec = AdvTrainSpec::default();
        assert_eq!(spec.checkpoint_name(), "bestCIFAR10");
        spec.data.dataset = Dataset::Cifar100;
        assert_eq!(spec.checkpoint_name(), "bestCIFAR100");
        spec.training.checkpoint_name = Some("run1".into());
        assert_eq!(spec.checkpoint_path(), PathBuf::from("./checkpoint/run1"));
    }

    #[test]
    fn test_parse_full_document() {
        let yaml = r#"
data:
  dataset: CIFAR100
  root: /datasets
  batch_size: 64
  download: "true"
adversarial:
  epsilon: 0.0156
  replays: 4
scheduler:
  kind: step_decay
  step_size: 10
  gamma: 0.5
evaluation:
  epoch_attack:
    kind: fgsm
    eps: 0.03
  final_attacks:
    - kind: clean
training:
  epochs: 5
  early_stopping_patience: 2
"#;
        let spec: AdvTrainSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.num_classes(), 100);
        assert!(spec.data.download);
        assert_eq!(spec.data.eval_batch_size(), 64);
        assert_eq!(spec.adversarial.replays, 4);
        assert_eq!(
            spec.scheduler,
            SchedulerSpec::StepDecay {
                step_size: 10,
                gamma: 0.5
            }
        );
        assert_eq!(spec.evaluation.final_attacks, vec![AttackSpec::Clean]);
        assert_eq!(spec.training.early_stopping_patience, Some(2));
    }

    #[test]
    fn test_lenient_bool_rejects_garbage() {
        let yaml = "data:\n  augment: \"maybe\"\n";
        assert!(serde_yaml::from_str::<AdvTrainSpec>(yaml).is_err());
    }
}
