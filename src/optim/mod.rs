//! Optimizer construction and learning rate schedules
//!
//! Parameter updates are burn's SGD; this module maps the YAML optimizer
//! section onto it and drives its learning rate per epoch.

mod scheduler;
mod sgd;

pub use scheduler::{build_scheduler, ConstantLR, LRScheduler, MultiStepLR, StepDecayLR};
pub use sgd::{build_sgd, sgd_config};
