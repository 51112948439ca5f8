//! Checkpoint metadata

use crate::data::Dataset;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What was saved alongside the model weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointMeta {
    /// Epoch (0-based) after which the weights were saved
    pub epoch: usize,
    /// Training accuracy (%) of that epoch, over all replays
    pub train_acc: f64,
    /// Robust accuracy (%) that made this checkpoint the best
    pub robust_acc: f64,
    /// Attack that measured `robust_acc`
    pub robust_attack: String,
    pub dataset: Dataset,
    pub num_classes: usize,
    pub base_width: usize,
    pub seed: u64,
    /// Learning rate in effect during `epoch`
    pub lr: f64,
    pub saved_at: DateTime<Utc>,
}

impl CheckpointMeta {
    /// Epoch a resumed run starts from
    pub fn next_epoch(&self) -> usize {
        self.epoch + 1
    }
}
