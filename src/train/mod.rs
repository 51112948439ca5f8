//! Free adversarial training
//!
//! Each minibatch is replayed `m` times. Every replay takes one SGD step on
//! the weights and one sign-gradient ascent step on a perturbation that is
//! carried over to the next minibatch, so adversarial examples come at the
//! cost of the weight updates already being paid for.
//!
//! - [`PerturbationBuffer`] - the persistent L∞-bounded perturbation
//! - [`FreeAdvTrainer`] - replays, epochs, per-epoch robust evaluation,
//!   best checkpoint saving and resume
//! - [`callback`] - progress reporting and early stopping hooks
//! - [`CrossEntropyLoss`] - the loss shared by training and attacks

pub mod callback;
mod config;
mod loss;
mod metrics;
mod perturbation;
mod trainer;


pub use callback::{
    CallbackAction, CallbackContext, CallbackManager, EarlyStopping, ProgressCallback,
    TrainerCallback,
};
pub use config::TrainConfig;
pub use loss::{count_correct, CrossEntropyLoss, LossFn, Reduction};
pub use metrics::EpochStats;
pub use perturbation::PerturbationBuffer;
pub use trainer::{EpochRecord, FreeAdvTrainer, TrainResult};
