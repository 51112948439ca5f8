//! Core traits and types for the callback system
//!
//! This module provides the foundational types for training callbacks:
//! - `CallbackContext` - State passed to callbacks
//! - `CallbackAction` - Actions a callback can request
//! - `TrainerCallback` - The trait all callbacks implement

/// Context passed to callbacks with current training state
#[derive(Clone, Debug, Default)]
pub struct CallbackContext {
    /// Current epoch (0-indexed)
    pub epoch: usize,
    /// Total epochs planned
    pub max_epochs: usize,
    /// Batches completed in the current epoch
    pub step: usize,
    /// Total batches in epoch
    pub steps_per_epoch: usize,
    /// Global batch count
    pub global_step: usize,
    /// Mean replay loss so far this epoch
    pub loss: f32,
    /// Training accuracy (%) so far this epoch, over all replays
    pub train_acc: f64,
    /// Hits behind `train_acc`
    pub correct: usize,
    /// Samples behind `train_acc`
    pub total: usize,
    /// Current learning rate
    pub lr: f64,
    /// `|delta|∞` of the persistent perturbation, set at step and epoch end
    pub perturbation_norm: f32,
    /// Robust accuracy (%) measured at the end of this epoch
    pub robust_acc: Option<f64>,
    /// Best robust accuracy (%) so far
    pub best_robust_acc: Option<f64>,
    /// Whether this epoch produced a new best checkpoint
    pub is_best: bool,
    /// Training duration in seconds
    pub elapsed_secs: f64,
}

/// Action to take after a callback
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackAction {
    /// Continue training normally
    Continue,
    /// Stop training (early stopping)
    Stop,
    /// Skip rest of current epoch
    SkipEpoch,
}

/// Trait for training callbacks
///
/// Implement this trait to hook into training events. All methods have
/// default no-op implementations, so you only need to implement the
/// events you care about.
pub trait TrainerCallback: Send {
    /// Called before training starts
    fn on_train_begin(&mut self, _ctx: &CallbackContext) -> CallbackAction {
        CallbackAction::Continue
    }

    /// Called after training ends
    fn on_train_end(&mut self, _ctx: &CallbackContext) {}

    /// Called before each epoch
    fn on_epoch_begin(&mut self, _ctx: &CallbackContext) -> CallbackAction {
        CallbackAction::Continue
    }

    /// Called after each epoch, once robust accuracy is known
    fn on_epoch_end(&mut self, _ctx: &CallbackContext) -> CallbackAction {
        CallbackAction::Continue
    }

    /// Called before each minibatch (all of its replays)
    fn on_step_begin(&mut self, _ctx: &CallbackContext) -> CallbackAction {
        CallbackAction::Continue
    }

    /// Called after each minibatch (all of its replays)
    fn on_step_end(&mut self, _ctx: &CallbackContext) -> CallbackAction {
        CallbackAction::Continue
    }

    /// Get callback name for logging
    fn name(&self) -> &'static str {
        "TrainerCallback"
    }
}
