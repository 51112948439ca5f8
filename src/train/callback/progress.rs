//! Progress callback for logging training progress

use super::traits::{CallbackAction, CallbackContext, TrainerCallback};

/// Prints running accuracy every `log_interval` batches and a summary per epoch
#[derive(Clone, Debug)]
pub struct ProgressCallback {
    /// Log every N batches
    log_interval: usize,
}

impl ProgressCallback {
    /// Create progress callback
    pub fn new(log_interval: usize) -> Self {
        Self { log_interval }
    }
}

impl Default for ProgressCallback {
    fn default() -> Self {
        Self { log_interval: 50 }
    }
}

impl TrainerCallback for ProgressCallback {
    fn on_train_begin(&mut self, ctx: &CallbackContext) -> CallbackAction {
        if ctx.epoch > 0 {
            println!("Resuming at epoch {}/{}", ctx.epoch + 1, ctx.max_epochs);
        }
        CallbackAction::Continue
    }

    fn on_epoch_begin(&mut self, ctx: &CallbackContext) -> CallbackAction {
        println!(
            "\nEpoch {}/{} (lr: {:.2e})",
            ctx.epoch + 1,
            ctx.max_epochs,
            ctx.lr
        );
        CallbackAction::Continue
    }

    fn on_step_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        if self.log_interval > 0 && ctx.step > 0 && ctx.step % self.log_interval == 0 {
            println!(
                "  Batch {}/{}: loss: {:.4} | acc: {:.2}% ({}/{}) | |δ|∞: {:.4}",
                ctx.step,
                ctx.steps_per_epoch,
                ctx.loss,
                ctx.train_acc,
                ctx.correct,
                ctx.total,
                ctx.perturbation_norm
            );
        }
        CallbackAction::Continue
    }

    fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        let robust = ctx
            .robust_acc
            .map(|acc| format!(", robust acc: {acc:.2}%"))
            .unwrap_or_default();
        let best = if ctx.is_best { " *saved*" } else { "" };
        println!(
            "Epoch {}/{}: loss: {:.4}, train acc: {:.2}%{}{} ({:.1}s)",
            ctx.epoch + 1,
            ctx.max_epochs,
            ctx.loss,
            ctx.train_acc,
            robust,
            best,
            ctx.elapsed_secs
        );
        CallbackAction::Continue
    }

    fn on_train_end(&mut self, ctx: &CallbackContext) {
        if let Some(best) = ctx.best_robust_acc {
            println!("Training finished: best robust acc {best:.2}%");
        }
    }

    fn name(&self) -> &'static str {
        "ProgressCallback"
    }
}
