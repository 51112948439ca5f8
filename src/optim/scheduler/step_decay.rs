//! Step decay learning rate scheduler

use super::LRScheduler;

/// Step Decay Learning Rate Scheduler
///
/// Multiplies learning rate by gamma every step_size epochs.
///
/// Formula: lr_t = lr_initial * gamma^(floor(epoch / step_size))
#[derive(Debug, Clone)]
pub struct StepDecayLR {
    lr_initial: f64,
    gamma: f64,
    step_size: usize,
    current_epoch: usize,
}

impl StepDecayLR {
    /// Create a new step decay scheduler
    ///
    /// # Arguments
    /// * `lr_initial` - Initial learning rate
    /// * `step_size` - Decay LR every step_size epochs
    /// * `gamma` - Multiplicative factor (e.g., 0.1 for 10x reduction)
    pub fn new(lr_initial: f64, step_size: usize, gamma: f64) -> Self {
        Self {
            lr_initial,
            gamma,
            step_size,
            current_epoch: 0,
        }
    }
}

impl LRScheduler for StepDecayLR {
    fn get_lr(&self) -> f64 {
        if self.step_size == 0 {
            return self.lr_initial;
        }
        let num_decays = self.current_epoch / self.step_size;
        self.lr_initial * self.gamma.powi(num_decays as i32)
    }

    fn step(&mut self) {
        self.current_epoch += 1;
    }

    fn set_epoch(&mut self, epoch: usize) {
        self.current_epoch = epoch;
    }
}
