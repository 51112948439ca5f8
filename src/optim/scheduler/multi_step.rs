//! Milestone learning rate scheduler

use super::LRScheduler;

/// Multiplies the learning rate by `gamma` once for every milestone reached.
///
/// Formula: lr_t = lr_initial * gamma^|{m in milestones : m <= epoch}|
///
/// With milestones `[12, 22]`, gamma 0.1 and lr 0.1, epochs 0-11 train at
/// 0.1, epochs 12-21 at 0.01 and epochs 22+ at 0.001.
#[derive(Debug, Clone)]
pub struct MultiStepLR {
    lr_initial: f64,
    milestones: Vec<usize>,
    gamma: f64,
    current_epoch: usize,
}

impl MultiStepLR {
    pub fn new(lr_initial: f64, milestones: Vec<usize>, gamma: f64) -> Self {
        Self {
            lr_initial,
            milestones,
            gamma,
            current_epoch: 0,
        }
    }

    pub fn milestones(&self) -> &[usize] {
        &self.milestones
    }
}

impl LRScheduler for MultiStepLR {
    fn get_lr(&self) -> f64 {
        let passed = self
            .milestones
            .iter()
            .filter(|&&m| m <= self.current_epoch)
            .count();
        self.lr_initial * self.gamma.powi(passed as i32)
    }

    fn step(&mut self) {
        self.current_epoch += 1;
    }

    fn set_epoch(&mut self, epoch: usize) {
        self.current_epoch = epoch;
    }
}
