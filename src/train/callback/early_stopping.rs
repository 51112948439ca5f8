//! Early stopping callback to halt training when robust accuracy plateaus

use super::traits::{CallbackAction, CallbackContext, TrainerCallback};

/// Early stopping on robust accuracy
///
/// Stops training if the end-of-epoch robust accuracy has not improved by
/// more than `min_delta` percentage points for `patience` epochs. Epochs
/// without a robust measurement fall back to training accuracy.
///
/// # Example
///
/// ```rust
/// use endurecer::train::callback::EarlyStopping;
///
/// // Stop after 5 epochs without a 0.1-point gain
/// let early_stop = EarlyStopping::new(5, 0.1);
/// ```
#[derive(Clone, Debug)]
pub struct EarlyStopping {
    /// Number of epochs to wait for improvement
    patience: usize,
    /// Minimum improvement to reset patience
    min_delta: f64,
    /// Best accuracy seen so far
    best_acc: f64,
    /// Epochs without improvement
    pub(crate) epochs_without_improvement: usize,
}

impl EarlyStopping {
    /// Create new early stopping callback
    pub fn new(patience: usize, min_delta: f64) -> Self {
        Self {
            patience,
            min_delta,
            best_acc: f64::NEG_INFINITY,
            epochs_without_improvement: 0,
        }
    }

    /// Reset internal state
    pub fn reset(&mut self) {
        self.best_acc = f64::NEG_INFINITY;
        self.epochs_without_improvement = 0;
    }

    /// Check if accuracy improved
    fn check_improvement(&mut self, acc: f64) -> bool {
        if acc > self.best_acc + self.min_delta {
            self.best_acc = acc;
            self.epochs_without_improvement = 0;
            true
        } else {
            self.epochs_without_improvement += 1;
            false
        }
    }
}

impl TrainerCallback for EarlyStopping {
    fn on_train_begin(&mut self, ctx: &CallbackContext) -> CallbackAction {
        if let Some(best) = ctx.best_robust_acc {
            self.best_acc = best;
        }
        CallbackAction::Continue
    }

    fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        self.check_improvement(ctx.robust_acc.unwrap_or(ctx.train_acc));

        if self.epochs_without_improvement >= self.patience {
            eprintln!(
                "Early stopping: no improvement for {} epochs (best acc: {:.2}%)",
                self.patience, self.best_acc
            );
            CallbackAction::Stop
        } else {
            CallbackAction::Continue
        }
    }

    fn name(&self) -> &'static str {
        "EarlyStopping"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epoch_end(es: &mut EarlyStopping, epoch: usize, robust: f64) -> CallbackAction {
        let ctx = CallbackContext {
            epoch,
            robust_acc: Some(robust),
            ..Default::default()
        };
        es.on_epoch_end(&ctx)
    }

    #[test]
    fn test_early_stopping_patience() {
        let mut es = EarlyStopping::new(3, 0.1);
        assert_eq!(epoch_end(&mut es, 0, 30.0), CallbackAction::Continue);
        assert_eq!(epoch_end(&mut es, 1, 35.0), CallbackAction::Continue);
        // within min_delta
        assert_eq!(epoch_end(&mut es, 2, 35.05), CallbackAction::Continue);
        assert_eq!(epoch_end(&mut es, 3, 34.0), CallbackAction::Continue);
        assert_eq!(epoch_end(&mut es, 4, 35.0), CallbackAction::Stop);
    }

    #[test]
    fn test_improvement_resets() {
        let mut es = EarlyStopping::new(2, 0.0);
        epoch_end(&mut es, 0, 40.0);
        epoch_end(&mut es, 1, 39.0);
        assert_eq!(es.epochs_without_improvement, 1);
        assert_eq!(epoch_end(&mut es, 2, 41.0), CallbackAction::Continue);
        assert_eq!(es.epochs_without_improvement, 0);
    }

    #[test]
    fn test_falls_back_to_train_accuracy() {
        let mut es = EarlyStopping::new(1, 0.0);
        let ctx = CallbackContext {
            train_acc: 50.0,
            ..Default::default()
        };
        assert_eq!(es.on_epoch_end(&ctx), CallbackAction::Continue);
        assert_eq!(es.best_acc, 50.0);
    }

    #[test]
    fn test_resume_seeds_best_from_context() {
        let mut es = EarlyStopping::new(1, 0.0);
        let ctx = CallbackContext {
            best_robust_acc: Some(45.0),
            ..Default::default()
        };
        es.on_train_begin(&ctx);
        assert_eq!(epoch_end(&mut es, 5, 44.0), CallbackAction::Stop);
    }

    #[test]
    fn test_reset() {
        let mut es = EarlyStopping::new(3, 0.0);
        epoch_end(&mut es, 0, 10.0);
        es.reset();
        assert_eq!(es.best_acc, f64::NEG_INFINITY);
        assert_eq!(es.epochs_without_improvement, 0);
        assert_eq!(es.name(), "EarlyStopping");
    }
}
