//! Free adversarial trainer
//!
//! [`FreeAdvTrainer`] orchestrates the training loop:
//! - Minibatch replays with a persistent perturbation (`step`)
//! - Epoch-level iteration with step callbacks (`epoch`)
//! - Multi-epoch training with per-epoch robust evaluation, best
//!   checkpoint saving and resume (`train_loop`)
//!
//! # Example
//!
//! ```no_run
//! use endurecer::config::AdvTrainSpec;
//! use endurecer::model::{PreActResNet, PreActResNetConfig};
//! use endurecer::optim::{build_scheduler, build_sgd};
//! use endurecer::train::{FreeAdvTrainer, ProgressCallback, TrainConfig};
//! use burn::backend::{Autodiff, NdArray};
//!
//! type B = Autodiff<NdArray<f32>>;
//!
//! let spec = AdvTrainSpec::default();
//! let device = Default::default();
//! let model = PreActResNetConfig::resnet18(10).init::<B>(&device);
//! let mut trainer = FreeAdvTrainer::new(
//!     build_sgd::<B, PreActResNet<B>>(&spec.optimizer),
//!     build_scheduler(&spec.scheduler, spec.optimizer.lr),
//!     TrainConfig::from_spec(&spec),
//!     device,
//! );
//! trainer.add_callback(ProgressCallback::new(50));
//! // let (model, result) = trainer.fit(model, &train_loader, &test_loader)?;
//! ```

mod core;
mod epoch;
mod result;
mod step;
mod train_loop;

pub use core::FreeAdvTrainer;
pub use result::{EpochRecord, TrainResult};
