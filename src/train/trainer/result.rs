//! Training result types

use serde::{Deserialize, Serialize};

/// Summary of one trained epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    pub epoch: usize,
    pub lr: f64,
    pub loss: f64,
    pub train_acc: f64,
    pub robust_acc: f64,
    /// Whether this epoch's weights became the best checkpoint
    pub saved: bool,
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainResult {
    /// Last epoch trained (0-based), `None` if no epoch ran
    pub final_epoch: Option<usize>,
    /// Best robust accuracy (%), including one carried over on resume
    pub best_robust_acc: Option<f64>,
    /// Epoch of the best checkpoint
    pub best_epoch: Option<usize>,
    /// Training accuracy (%) of the last epoch
    pub final_train_acc: f64,
    /// Whether a callback stopped training early
    pub stopped_early: bool,
    /// Total training time in seconds
    pub elapsed_secs: f64,
    /// Epochs trained in this run
    pub history: Vec<EpochRecord>,
}

impl TrainResult {
    /// Whether some checkpoint (this run's or a resumed one) exists
    pub fn has_checkpoint(&self) -> bool {
        self.best_epoch.is_some()
    }
}
