//! Learning rate schedulers
//!
//! Epoch-based schedules; `get_lr` is the rate for the current epoch and
//! `step` advances to the next one.
//! - `MultiStepLR` - Decay by `gamma` at fixed milestone epochs
//! - `StepDecayLR` - Decay by `gamma` every N epochs
//! - `ConstantLR` - No decay

mod constant;
mod multi_step;
mod step_decay;

#[cfg(test)]
mod tests;

pub use constant::ConstantLR;
pub use multi_step::MultiStepLR;
pub use step_decay::StepDecayLR;

use crate::config::SchedulerSpec;

/// Learning rate scheduler trait
pub trait LRScheduler {
    /// Get the current learning rate
    fn get_lr(&self) -> f64;

    /// Step the scheduler (called once per epoch)
    fn step(&mut self);

    /// Jump to `epoch` (0-based), used when resuming
    fn set_epoch(&mut self, epoch: usize);
}

/// Build the scheduler described by `spec`, starting at `lr_initial`
pub fn build_scheduler(spec: &SchedulerSpec, lr_initial: f64) -> Box<dyn LRScheduler> {
    match spec {
        SchedulerSpec::MultiStep { milestones, gamma } => {
            Box::new(MultiStepLR::new(lr_initial, milestones.clone(), *gamma))
        }
        SchedulerSpec::StepDecay { step_size, gamma } => {
            Box::new(StepDecayLR::new(lr_initial, *step_size, *gamma))
        }
        SchedulerSpec::Constant => Box::new(ConstantLR::new(lr_initial)),
    }
}
