//! Validation error types
//!
//! Defines all validation error variants for adversarial training specifications.

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid eval batch size: {0} (must be > 0)")]
    InvalidEvalBatchSize(usize),

    #[error("Invalid learning rate: {0} (must be > 0.0 and <= 1.0)")]
    InvalidLearningRate(f64),

    #[error("Invalid momentum: {0} (must be in [0.0, 1.0))")]
    InvalidMomentum(f64),

    #[error("Invalid weight decay: {0} (must be >= 0.0)")]
    InvalidWeightDecay(f32),

    #[error("Invalid optimizer: {0} (must be: sgd)")]
    InvalidOptimizer(String),

    #[error("Invalid architecture: {0} (must be: preact_resnet18)")]
    InvalidArchitecture(String),

    #[error("Invalid base width: {0} (must be > 0)")]
    InvalidBaseWidth(usize),

    #[error("Invalid num_classes: {num_classes} ({dataset} labels need at least {required})")]
    InvalidNumClasses {
        num_classes: usize,
        dataset: String,
        required: usize,
    },

    #[error("Invalid epsilon: {0} (must be > 0.0 and <= 1.0)")]
    InvalidEpsilon(f32),

    #[error("Invalid replays: {0} (must be >= 1)")]
    InvalidReplays(usize),

    #[error("Invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid milestones: {0:?} (must be strictly increasing)")]
    InvalidMilestones(Vec<usize>),

    #[error("Invalid step size: {0} (must be > 0)")]
    InvalidStepSize(usize),

    #[error("Invalid gamma: {0} (must be > 0.0 and <= 1.0)")]
    InvalidGamma(f64),

    #[error("Invalid attack {attack}: {reason}")]
    InvalidAttack { attack: String, reason: String },

    #[error("Final attack list cannot be empty")]
    EmptyFinalAttacks,

    #[error("Invalid log interval: {0} (must be > 0)")]
    InvalidLogInterval(usize),

    #[error("Invalid early stopping patience: {0} (must be > 0)")]
    InvalidPatience(usize),

    #[error("Invalid data limit: {0} (must be > 0)")]
    InvalidDataLimit(usize),
}
